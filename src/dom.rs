//! Thin helpers over `web_sys` lookups that report failures as [`DomError`]
//! instead of panicking, so a single handler can bail out without taking the
//! rest of the page with it.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element not found: {0}")]
    Missing(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type DomResult<T> = Result<T, DomError>;

pub fn window() -> DomResult<Window> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> DomResult<Document> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn body() -> DomResult<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| DomError::Missing("body".to_string()))
}

pub fn by_id(id: &str) -> DomResult<HtmlElement> {
    document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| DomError::Missing(format!("#{}", id)))
}

pub fn query(selector: &str) -> DomResult<HtmlElement> {
    document()?
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| DomError::Missing(selector.to_string()))
}

/// All elements matching `selector` below `root`, or below the document when
/// `root` is `None`. Elements that are not `HtmlElement`s are skipped.
pub fn query_all(root: Option<&Element>, selector: &str) -> DomResult<Vec<HtmlElement>> {
    let list = match root {
        Some(root) => root.query_selector_all(selector)?,
        None => document()?.query_selector_all(selector)?,
    };
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn scroll_y() -> DomResult<f64> {
    Ok(window()?.scroll_y()?)
}

pub fn viewport_height() -> DomResult<f64> {
    window()?
        .inner_height()?
        .as_f64()
        .ok_or_else(|| DomError::Js("innerHeight is not a number".to_string()))
}

/// Locks or releases page scrolling by toggling `overflow` on the body.
pub fn set_body_scroll_locked(locked: bool) -> DomResult<()> {
    let value = if locked { "hidden" } else { "auto" };
    body()?.style().set_property("overflow", value)?;
    Ok(())
}

pub fn is_touch_device() -> bool {
    web_sys::window()
        .map(|w| JsValue::from_str("ontouchstart").js_in(&w))
        .unwrap_or(false)
}
