use std::rc::Rc;

use log::{info, warn};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config;
use crate::dom;
use crate::motion::ease::Ease;
use crate::motion::player;
use crate::motion::style::Style;
use crate::motion::timeline::{Position, Stagger, StaggerFrom, Step, Target, Timeline};

const TITLE: &str = "SPACETECH";

fn char_start() -> Style {
    Style::new().opacity(0.0).y(50.0).rotation_y(90.0).scale(0.5)
}

fn subtitle_start() -> Style {
    Style::new().opacity(0.0).y(20.0)
}

fn logo_start() -> Style {
    Style::new().scale(0.0).rotation(180.0)
}

fn connector_start() -> Style {
    Style::new().scale(0.0).opacity(0.0)
}

/// Seconds of float animation and its start delay for the `index`th title
/// character.
pub fn float_timing(index: usize) -> (f64, f64) {
    (2.0 + index as f64 * 0.1, 3.0 + index as f64 * 0.1)
}

/// Inline `animation` declaration for the `index`th character's float.
pub fn float_animation(index: usize) -> String {
    let (duration, delay) = float_timing(index);
    format!(
        "animation: loading-float {}s {} {}s infinite alternate;",
        duration,
        Ease::SineInOut.css(),
        delay
    )
}

/// The splash sequence. `percent` receives the counter value (0..=100).
pub fn loading_timeline(percent: Rc<dyn Fn(u32)>) -> Timeline {
    Timeline::new()
        .add(
            Step::to(
                Target::Selector(".loading-logo"),
                Style::new().scale(1.0).rotation(0.0),
                1.0,
            )
            .stagger(Stagger::Each(0.3))
            .ease(Ease::BackOut(1.7)),
        )
        .add(
            Step::to(
                Target::Selector(".loading-connector"),
                Style::new().scale(1.0).opacity(1.0),
                0.5,
            )
            .ease(Ease::BackOut(1.2))
            .at(Position::Offset(-0.3)),
        )
        .add(
            Step::to(
                Target::Selector(".loading-text-char"),
                Style::new().opacity(1.0).y(0.0).rotation_y(0.0).scale(1.0),
                0.8,
            )
            .stagger(Stagger::Amount {
                amount: 2.0,
                from: StaggerFrom::Start,
                ease: Ease::Power2Out,
            })
            .ease(Ease::BackOut(1.2))
            .at(Position::Offset(-0.5)),
        )
        .add(
            Step::to(
                Target::Selector(".loading-subtitle"),
                Style::new().opacity(1.0).y(0.0),
                0.6,
            )
            .ease(Ease::Power2Out)
            .at(Position::Offset(-1.0)),
        )
        .add(
            Step::to(
                Target::Selector("#loadingPercentage"),
                Style::new().opacity(1.0),
                0.3,
            )
            .ease(Ease::Linear)
            .at(Position::Offset(-0.5)),
        )
        .add(
            Step::to(
                Target::Selector("#loadingBar"),
                Style::new().width_pct(100.0),
                3.0,
            )
            .ease(Ease::Power2InOut),
        )
        .add(
            Step::to(
                Target::Value(Rc::new(move |progress: f64| {
                    percent((progress * 100.0).round() as u32)
                })),
                Style::new(),
                3.0,
            )
            .ease(Ease::Power2InOut)
            .at(Position::Offset(-3.0)),
        )
        .add(
            Step::to(
                Target::Selector(".loading-text-char"),
                Style::new().opacity(0.0).y(-30.0).rotation_y(-90.0).scale(1.2),
                0.6,
            )
            .stagger(Stagger::Amount {
                amount: 0.8,
                from: StaggerFrom::Center,
                ease: Ease::Power2In,
            })
            .ease(Ease::Power2In)
            .at(Position::Offset(0.5)),
        )
        .add(
            Step::to(
                Target::Group(vec![
                    ".loading-logo",
                    ".loading-connector",
                    ".loading-subtitle",
                    "#loadingPercentage",
                    ".loading-progress",
                ]),
                Style::new().opacity(0.0).y(-50.0).scale(0.8),
                0.8,
            )
            .stagger(Stagger::Each(0.1))
            .ease(Ease::Power2In)
            .at(Position::Offset(-0.3)),
        )
        .add(
            Step::to(
                Target::Selector("#loadingScreen"),
                Style::new().opacity(0.0).scale(1.1),
                1.0,
            )
            .ease(Ease::Power2InOut),
        )
}

#[derive(Properties, PartialEq)]
pub struct LoadingScreenProps {
    pub on_finished: Callback<()>,
}

#[function_component(LoadingScreen)]
pub fn loading_screen(props: &LoadingScreenProps) -> Html {
    let done = use_state(|| false);
    let percent_ref = use_node_ref();

    {
        let done = done.clone();
        let percent_ref = percent_ref.clone();
        let on_finished = props.on_finished.clone();
        use_effect_with_deps(
            move |_| {
                if let Err(e) = dom::set_body_scroll_locked(true) {
                    warn!("could not lock scrolling during load: {}", e);
                }

                let percent: Rc<dyn Fn(u32)> = Rc::new(move |value: u32| {
                    if let Some(el) = percent_ref.cast::<HtmlElement>() {
                        el.set_text_content(Some(&format!("{}%", value)));
                    }
                });
                let playback = player::play(
                    &loading_timeline(percent),
                    None,
                    Some(Box::new(move || {
                        done.set(true);
                        if let Err(e) = dom::set_body_scroll_locked(false) {
                            warn!("could not restore scrolling: {}", e);
                        }
                        info!("Loading sequence finished");
                        on_finished.emit(());
                    })),
                );
                move || drop(playback)
            },
            (),
        );
    }

    let overlay_style = if *done {
        "display: none;".to_string()
    } else {
        String::new()
    };

    html! {
        <div id="loadingScreen" class="loading-screen" style={overlay_style}>
            <style>
                {r#"
                    @keyframes loading-float {
                        from { translate: 0 0; }
                        to { translate: 0 10px; }
                    }
                    .loading-text-char {
                        display: inline-block;
                    }
                "#}
            </style>
            <div class="loading-content">
                <div class="loading-logos">
                    <div class="loading-logo" style={logo_start().inline()}>
                        <i class="fas fa-rocket"></i>
                    </div>
                    <div class="loading-connector" style={connector_start().inline()}></div>
                    <div class="loading-logo" style={logo_start().inline()}>
                        <i class="fas fa-satellite"></i>
                    </div>
                </div>
                <h1 class="loading-text">
                    { for TITLE.chars().enumerate().map(|(index, ch)| {
                        let style = format!("{} {}", char_start().inline(), float_animation(index));
                        html! {
                            <span class="loading-text-char" {style}>{ch}</span>
                        }
                    }) }
                </h1>
                <p class="loading-subtitle" style={subtitle_start().inline()}>
                    {config::EVENT_NAME}
                </p>
                <div class="loading-progress">
                    <div id="loadingBar" class="loading-bar" style="width: 0%;"></div>
                </div>
                <div id="loadingPercentage" ref={percent_ref} class="loading-percentage" style="opacity: 0;">
                    {"0%"}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> Vec<usize> {
        // logos, connector, chars, subtitle, percentage, bar, counter,
        // chars out, group out, overlay
        vec![2, 1, TITLE.len(), 1, 1, 1, 1, TITLE.len(), 6, 1]
    }

    #[test]
    fn counter_runs_alongside_the_bar() {
        let tl = loading_timeline(Rc::new(|_: u32| {}));
        let slots = tl.schedule(&counts());
        assert_eq!(slots[5].start, slots[6].start);
        assert_eq!(slots[5].end, slots[6].end);
    }

    #[test]
    fn overlay_fades_last() {
        let tl = loading_timeline(Rc::new(|_: u32| {}));
        let slots = tl.schedule(&counts());
        let overlay = slots.last().unwrap();
        assert!(slots.iter().all(|slot| slot.end <= overlay.end));
        assert!((overlay.end - overlay.start - 1.0).abs() < 1e-9);
    }

    #[test]
    fn characters_enter_within_the_stagger_amount() {
        let tl = loading_timeline(Rc::new(|_: u32| {}));
        let slots = tl.schedule(&counts());
        let chars = &slots[2];
        assert_eq!(chars.delays.first(), Some(&0.0));
        assert!((chars.delays.last().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn float_timing_grows_per_character() {
        assert_eq!(float_timing(0), (2.0, 3.0));
        let (duration, delay) = float_timing(3);
        assert!((duration - 2.3).abs() < 1e-9);
        assert!((delay - 3.3).abs() < 1e-9);
    }

    #[test]
    fn float_uses_sine_curve() {
        let animation = float_animation(0);
        assert!(animation.contains(&Ease::SineInOut.css()));
        assert!(animation.starts_with("animation: loading-float 2s "));
        assert!(animation.ends_with(" 3s infinite alternate;"));
    }
}
