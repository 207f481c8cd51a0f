use log::warn;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::motion::player;
use crate::motion::style::Style;
use crate::scroll::hooks::use_scrub;
use crate::scroll::trigger::TriggerSpec;

/// Star layers with the distance each one drifts up over the whole page.
pub const LAYERS: [(&str, f64); 3] = [("stars", -200.0), ("stars2", -400.0), ("stars3", -600.0)];

pub fn layer_offsets(progress: f64) -> [f64; 3] {
    LAYERS.map(|(_, travel)| travel * progress.clamp(0.0, 1.0))
}

#[function_component(Starfield)]
pub fn starfield() -> Html {
    let refs = [use_node_ref(), use_node_ref(), use_node_ref()];

    let spec = TriggerSpec::parse("top top", Some("bottom bottom")).unwrap_or_default();
    let apply = {
        let refs = refs.clone();
        Callback::from(move |progress: f64| {
            for (node, offset) in refs.iter().zip(layer_offsets(progress)) {
                if let Some(layer) = node.cast::<HtmlElement>() {
                    if let Err(e) = player::set(&layer, &Style::new().y(offset)) {
                        warn!("parallax layer not moved: {}", e);
                    }
                }
            }
        })
    };
    use_scrub(None, spec, 1.0, apply);

    html! {
        <div class="starfield" aria-hidden="true">
            { for LAYERS.iter().zip(refs.iter()).map(|((id, _), node)| html! {
                <div id={*id} class="stars-layer" ref={node.clone()}></div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deeper_layers_travel_further() {
        assert_eq!(layer_offsets(0.0), [0.0, 0.0, 0.0]);
        assert_eq!(layer_offsets(0.5), [-100.0, -200.0, -300.0]);
        assert_eq!(layer_offsets(1.0), [-200.0, -400.0, -600.0]);
    }

    #[test]
    fn progress_outside_the_page_is_clamped() {
        assert_eq!(layer_offsets(1.5), layer_offsets(1.0));
        assert_eq!(layer_offsets(-0.2), layer_offsets(0.0));
    }
}
