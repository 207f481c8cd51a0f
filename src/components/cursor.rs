use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::dom::{self, DomResult};
use crate::motion::ease::Ease;
use crate::motion::player;
use crate::motion::style::Style;

/// Elements that enlarge the cursor while hovered.
pub const INTERACTIVE: &str = "a, button, .challenge-card, .faq-question, .social-link";

const RING_SECONDS: f64 = 0.3;
const DOT_SECONDS: f64 = 0.1;

pub fn follow(x: f64, y: f64) -> Style {
    Style::new().x(x).y(y)
}

/// Whether a mouse event landed on, or inside, something interactive.
fn over_interactive(e: &MouseEvent) -> bool {
    e.target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE).ok().flatten())
        .is_some()
}

/// A document-level mouse listener, removed on drop.
struct DocumentListener {
    document: Document,
    event: &'static str,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl DocumentListener {
    fn attach<F>(event: &'static str, handler: F) -> DomResult<Self>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let document = dom::document()?;
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            document,
            event,
            callback,
        })
    }
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

#[function_component(Cursor)]
pub fn cursor() -> Html {
    let enabled = use_state(|| !dom::is_touch_device());
    let active = use_state_eq(|| false);
    let ring_ref = use_node_ref();
    let dot_ref = use_node_ref();

    {
        let active = active.clone();
        let ring_ref = ring_ref.clone();
        let dot_ref = dot_ref.clone();
        use_effect_with_deps(
            move |enabled| {
                let mut listeners = Vec::new();
                if *enabled {
                    info!("Custom cursor enabled");
                    let moved = DocumentListener::attach("mousemove", move |e: MouseEvent| {
                        let to = follow(e.client_x() as f64, e.client_y() as f64);
                        for (node, seconds) in [(&ring_ref, RING_SECONDS), (&dot_ref, DOT_SECONDS)] {
                            if let Some(el) = node.cast::<HtmlElement>() {
                                if let Err(e) = player::tween(&el, &to, seconds, Ease::Power2Out) {
                                    debug!("cursor move skipped: {}", e);
                                }
                            }
                        }
                    });
                    let entered = {
                        let active = active.clone();
                        DocumentListener::attach("mouseover", move |e: MouseEvent| {
                            active.set(over_interactive(&e))
                        })
                    };
                    let left = DocumentListener::attach("mouseout", move |e: MouseEvent| {
                        if over_interactive(&e) {
                            active.set(false)
                        }
                    });
                    for listener in [moved, entered, left] {
                        match listener {
                            Ok(listener) => listeners.push(listener),
                            Err(e) => warn!("cursor listener not attached: {}", e),
                        }
                    }
                }
                move || drop(listeners)
            },
            *enabled,
        );
    }

    if !*enabled {
        return html! {};
    }

    let state = (*active).then(|| "active");
    html! {
        <>
            <div class={classes!("custom-cursor", state)} ref={ring_ref} aria-hidden="true"></div>
            <div class={classes!("cursor-dot", state)} ref={dot_ref} aria-hidden="true"></div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_translates_to_pointer() {
        let style = follow(120.0, 48.0);
        assert_eq!(style.x, Some(120.0));
        assert_eq!(style.y, Some(48.0));
        assert_eq!(style.property_names(), vec!["transform"]);
    }

    #[test]
    fn dot_is_quicker_than_ring() {
        assert!(DOT_SECONDS < RING_SECONDS);
        assert!(INTERACTIVE.split(", ").any(|s| s == ".faq-question"));
    }
}
