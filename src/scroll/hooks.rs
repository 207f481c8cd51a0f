use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};
use yew::prelude::*;

use super::scrub::Scrub;
use super::trigger::{Action, Geometry, TriggerSpec, TriggerState, Transition};
use crate::dom::{self, DomResult};
use crate::motion::frame::FrameLoop;

/// Window `scroll` + `resize` subscription, removed again on drop.
pub struct ScrollListener {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl ScrollListener {
    /// Subscribes `on_scroll` and runs it once straight away so bindings see
    /// the initial scroll position.
    pub fn attach<F>(on_scroll: F) -> DomResult<Self>
    where
        F: FnMut() + 'static,
    {
        let window = dom::window()?;
        let handler = Rc::new(RefCell::new(on_scroll));
        (*handler.borrow_mut())();
        let callback = Closure::wrap(Box::new(move || (*handler.borrow_mut())()) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        Ok(Self { window, callback })
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.callback.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
    }
}

pub fn measure(el: &Element) -> DomResult<Geometry> {
    let rect = el.get_bounding_client_rect();
    Ok(Geometry {
        top: rect.top(),
        height: rect.height(),
        viewport_height: dom::viewport_height()?,
    })
}

/// The element a binding measures: a rendered node, or the whole document
/// when `None`.
fn trigger_element(node: &Option<NodeRef>) -> Option<Element> {
    match node {
        Some(node) => node.cast::<Element>(),
        None => dom::document().ok().and_then(|doc| doc.document_element()),
    }
}

/// Reports trigger crossings for `node` as the page scrolls.
#[hook]
pub fn use_scroll_trigger(
    node: NodeRef,
    spec: TriggerSpec,
    on_fire: Callback<(Transition, Action)>,
) {
    use_effect_with_deps(
        move |_| {
            let state = Rc::new(RefCell::new(TriggerState::new(spec)));
            let target = Some(node);
            let listener = ScrollListener::attach(move || {
                if state.borrow().is_retired() {
                    return;
                }
                let Some(el) = trigger_element(&target) else {
                    return;
                };
                match measure(&el) {
                    Ok(geometry) => {
                        let fired = state.borrow_mut().update(&geometry);
                        for event in fired {
                            on_fire.emit(event);
                        }
                    }
                    Err(e) => warn!("scroll trigger skipped: {}", e),
                }
            });
            if let Err(e) = &listener {
                warn!("could not attach scroll trigger: {}", e);
            }
            move || drop(listener)
        },
        (),
    );
}

/// Drives `apply` with scroll progress through `spec`'s range, smoothed by
/// `lag` seconds. `node` of `None` measures the whole document.
#[hook]
pub fn use_scrub(node: Option<NodeRef>, spec: TriggerSpec, lag: f64, apply: Callback<f64>) {
    use_effect_with_deps(
        move |_| {
            let scrub = Rc::new(RefCell::new(Scrub::new(lag)));
            let frames: Rc<RefCell<Option<FrameLoop>>> = Rc::new(RefCell::new(None));
            let measured = Rc::new(RefCell::new(false));

            let listener = ScrollListener::attach(move || {
                let Some(el) = trigger_element(&node) else {
                    return;
                };
                let progress = match measure(&el) {
                    Ok(geometry) => spec.progress(&geometry),
                    Err(e) => {
                        warn!("scrub skipped: {}", e);
                        return;
                    }
                };
                if !*measured.borrow() {
                    *measured.borrow_mut() = true;
                    scrub.borrow_mut().snap(progress);
                    apply.emit(scrub.borrow().current());
                    return;
                }
                scrub.borrow_mut().set_target(progress);
                if scrub.borrow().is_settled() {
                    apply.emit(scrub.borrow().current());
                    return;
                }
                let running = frames.borrow().as_ref().map_or(false, FrameLoop::is_running);
                if running {
                    return;
                }
                let scrub = scrub.clone();
                let apply = apply.clone();
                let mut last = 0.0;
                match FrameLoop::start(move |elapsed| {
                    let value = scrub.borrow_mut().advance(elapsed - last);
                    last = elapsed;
                    apply.emit(value);
                    !scrub.borrow().is_settled()
                }) {
                    Ok(frame) => *frames.borrow_mut() = Some(frame),
                    Err(e) => warn!("scrub frame loop unavailable: {}", e),
                }
            });
            if let Err(e) = &listener {
                warn!("could not attach scrub: {}", e);
            }
            move || drop(listener)
        },
        (),
    );
}
