use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Element, HtmlElement};

use super::ease::Ease;
use super::frame::FrameLoop;
use super::style::Style;
use super::timeline::{Target, Timeline};
use crate::dom::{self, DomResult};

/// Writes `style` immediately, without a transition.
pub fn set(el: &HtmlElement, style: &Style) -> DomResult<()> {
    let css = el.style();
    css.set_property("transition", "none")?;
    for (name, value) in style.declarations() {
        css.set_property(name, &value)?;
    }
    Ok(())
}

/// Transitions `el` to `style` over `duration` seconds.
pub fn tween(el: &HtmlElement, style: &Style, duration: f64, ease: Ease) -> DomResult<()> {
    let css = el.style();
    let transition = style
        .property_names()
        .iter()
        .map(|name| format!("{} {}s {}", name, duration, ease.css()))
        .collect::<Vec<_>>()
        .join(", ");
    css.set_property("transition", &transition)?;
    // Flush pending style changes so the transition starts from what is on
    // screen now rather than from a value set in the same task.
    let _ = el.offset_width();
    for (name, value) in style.declarations() {
        css.set_property(name, &value)?;
    }
    Ok(())
}

pub fn set_all(elements: &[HtmlElement], style: &Style) {
    for el in elements {
        if let Err(e) = set(el, style) {
            debug!("skipping style on element: {}", e);
        }
    }
}

fn millis(seconds: f64) -> u32 {
    (seconds.max(0.0) * 1000.0).round() as u32
}

fn resolve(target: &Target, root: Option<&Element>) -> Vec<HtmlElement> {
    let selectors: Vec<&'static str> = match target {
        Target::Selector(selector) => vec![*selector],
        Target::Group(selectors) => selectors.clone(),
        Target::Value(_) => return Vec::new(),
    };
    selectors
        .into_iter()
        .flat_map(|selector| match dom::query_all(root, selector) {
            Ok(found) => {
                if found.is_empty() {
                    debug!("no elements for {}", selector);
                }
                found
            }
            Err(e) => {
                debug!("lookup failed for {}: {}", selector, e);
                Vec::new()
            }
        })
        .collect()
}

/// Applies every step's `from` style right away so targets start hidden
/// before the timeline is played.
pub fn prepare(timeline: &Timeline, root: Option<&Element>) {
    for step in timeline.steps() {
        if let Some(from) = &step.from {
            set_all(&resolve(&step.target, root), from);
        }
    }
}

/// A running timeline. Dropping it cancels every transition and callback
/// that has not started yet.
#[derive(Default)]
pub struct Playback {
    timeouts: Vec<Timeout>,
    frames: Rc<RefCell<Vec<FrameLoop>>>,
}

/// Plays `timeline` against elements found under `root` (or the whole
/// document). Missing targets are skipped; `on_complete` still fires when the
/// timeline's time runs out.
pub fn play(
    timeline: &Timeline,
    root: Option<&Element>,
    on_complete: Option<Box<dyn FnOnce()>>,
) -> Playback {
    let resolved: Vec<Vec<HtmlElement>> = timeline
        .steps()
        .iter()
        .map(|step| resolve(&step.target, root))
        .collect();
    let counts: Vec<usize> = timeline
        .steps()
        .iter()
        .zip(resolved.iter())
        .map(|(step, elements)| match step.target {
            Target::Value(_) => 1,
            _ => elements.len(),
        })
        .collect();
    let slots = timeline.schedule(&counts);
    let total = timeline.duration(&counts);

    for (step, elements) in timeline.steps().iter().zip(resolved.iter()) {
        if let Some(from) = &step.from {
            set_all(elements, from);
        }
    }

    let mut playback = Playback::default();
    for ((step, elements), slot) in timeline
        .steps()
        .iter()
        .zip(resolved.into_iter())
        .zip(slots.into_iter())
    {
        match &step.target {
            Target::Value(apply) => {
                let apply = apply.clone();
                let frames = playback.frames.clone();
                let duration = step.duration;
                let ease = step.ease;
                playback.timeouts.push(Timeout::new(millis(slot.start), move || {
                    let apply_frame = apply.clone();
                    let started = FrameLoop::start(move |elapsed| {
                        let t = if duration > 0.0 { elapsed / duration } else { 1.0 };
                        apply_frame(ease.apply(t));
                        t < 1.0
                    });
                    match started {
                        Ok(frame) => frames.borrow_mut().push(frame),
                        Err(e) => {
                            debug!("frame loop unavailable, jumping to end: {}", e);
                            apply(1.0);
                        }
                    }
                }));
            }
            _ => {
                for (el, delay) in elements.into_iter().zip(slot.delays.iter()) {
                    let to = step.to.clone();
                    let duration = step.duration;
                    let ease = step.ease;
                    playback
                        .timeouts
                        .push(Timeout::new(millis(slot.start + delay), move || {
                            if let Err(e) = tween(&el, &to, duration, ease) {
                                debug!("tween skipped: {}", e);
                            }
                        }));
                }
            }
        }
    }

    if let Some(on_complete) = on_complete {
        playback
            .timeouts
            .push(Timeout::new(millis(total), move || on_complete()));
    }
    playback
}
