use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::motion::ease::Ease;
use crate::motion::player::{self, Playback};
use crate::motion::style::Style;
use crate::motion::timeline::{Position, Stagger, Step, Target, Timeline};
use crate::scroll::hooks::use_scroll_trigger;
use crate::scroll::trigger::{Action, Transition, TriggerSpec};

/// Hides the targets of `build`'s timeline inside `node` straight away and
/// plays the timeline the first time `node` crosses `start`.
#[hook]
pub fn use_reveal(node: NodeRef, start: &'static str, build: fn() -> Timeline) {
    let playback: Rc<RefCell<Option<Playback>>> = use_mut_ref(|| None);

    {
        let node = node.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(root) = node.cast::<Element>() {
                    player::prepare(&build(), Some(&root));
                }
                || ()
            },
            (),
        );
    }

    let spec = reveal_spec(start);

    let on_fire = {
        let node = node.clone();
        Callback::from(move |(_, action): (Transition, Action)| {
            if action != Action::Play {
                return;
            }
            if let Some(root) = node.cast::<Element>() {
                *playback.borrow_mut() = Some(player::play(&build(), Some(&root), None));
            }
        })
    };

    use_scroll_trigger(node, spec, on_fire);
}

/// A reveal fires on the first enter only, whatever happens afterwards.
pub fn reveal_spec(start: &str) -> TriggerSpec {
    TriggerSpec::parse(start, None)
        .unwrap_or_else(|e| {
            warn!("bad reveal threshold {:?}: {}", start, e);
            TriggerSpec::default()
        })
        .once()
}

/// One group sliding/fading in from `from`.
pub fn entrance(selector: &'static str, from: Style, duration: f64, stagger: f64) -> Step {
    let step = Step::from(Target::Selector(selector), from, duration).ease(Ease::Power3Out);
    if stagger > 0.0 {
        step.stagger(Stagger::Each(stagger))
    } else {
        step
    }
}

/// Several groups revealed together by the same trigger.
pub fn together(steps: Vec<Step>) -> Timeline {
    steps
        .into_iter()
        .fold(Timeline::new(), |tl, step| tl.add(step.at(Position::At(0.0))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::trigger::Anchor;

    #[test]
    fn together_starts_every_group_at_zero() {
        let tl = together(vec![
            entrance(".about-text", Style::new().x(-100.0).opacity(0.0), 1.0, 0.0),
            entrance(".about-image", Style::new().x(100.0).opacity(0.0), 1.0, 0.0),
        ]);
        let slots = tl.schedule(&[1, 1]);
        assert_eq!(slots[0].start, 0.0);
        assert_eq!(slots[1].start, 0.0);
        assert_eq!(tl.duration(&[1, 1]), 1.0);
    }

    #[test]
    fn reveal_triggers_are_single_use() {
        let spec = reveal_spec("top 90%");
        assert!(spec.once);
        assert_eq!(spec.start, "top 90%".parse::<Anchor>().unwrap());
        assert_eq!(reveal_spec("sideways").start, TriggerSpec::default().start);
    }

    #[test]
    fn entrance_staggers_only_when_asked() {
        let plain = entrance(".a", Style::new().y(30.0), 0.8, 0.0);
        assert_eq!(plain.stagger, Stagger::None);
        let staggered = entrance(".a", Style::new().y(30.0), 0.8, 0.2);
        assert_eq!(staggered.stagger, Stagger::Each(0.2));
        assert_eq!(staggered.ease, Ease::Power3Out);
    }
}
