use log::debug;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::config;
use crate::motion::ease::Ease;
use crate::motion::player;
use crate::motion::style::Style;

/// Which FAQ entry is open. Opening one closes the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    expanded: Option<usize>,
}

impl Accordion {
    /// Activating the open entry closes it; any other entry becomes the only
    /// open one.
    pub fn activate(self, index: usize) -> Self {
        if self.expanded == Some(index) {
            Self { expanded: None }
        } else {
            Self {
                expanded: Some(index),
            }
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }
}

pub const FAQ_ENTRIES: &[(&str, &str)] = &[
    (
        "Who can participate?",
        "Students, professionals and hobbyists over 18 are welcome. You don't need a background in aerospace, only curiosity and a willingness to build.",
    ),
    (
        "How big can a team be?",
        "Teams have between two and five members. If you register alone we will help you find a team during the opening session.",
    ),
    (
        "Does it cost anything?",
        "No. Participation is free, including meals, drinks and access to the hardware lab during the event.",
    ),
    (
        "What should I bring?",
        "Your laptop, chargers, any hardware you want to hack on and a sleeping bag if you plan to stay overnight.",
    ),
    (
        "Can I join remotely?",
        "Yes. Remote teams get the same challenges, mentor hours and judging slots through our online stage.",
    ),
    (
        "Who owns the projects?",
        "You do. Teams keep full ownership of everything they build; sponsors only get to see the demos.",
    ),
];

fn collapsed() -> Style {
    Style::new().max_height(0.0).padding("0 20px")
}

fn expanded() -> Style {
    Style::new()
        .max_height(config::FAQ_ANSWER_MAX_HEIGHT_PX)
        .padding("0 20px 20px")
}

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    index: usize,
    question: AttrValue,
    answer: AttrValue,
    expanded: bool,
    on_activate: Callback<usize>,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let answer_ref = use_node_ref();

    {
        let answer_ref = answer_ref.clone();
        use_effect_with_deps(
            move |is_open| {
                if let Some(answer) = answer_ref.cast::<HtmlElement>() {
                    let result = if *is_open {
                        player::tween(&answer, &expanded(), 0.4, Ease::Power2Out)
                    } else {
                        player::tween(&answer, &collapsed(), 0.3, Ease::Power2Out)
                    };
                    if let Err(e) = result {
                        debug!("faq answer animation skipped: {}", e);
                    }
                }
                || ()
            },
            props.expanded,
        );
    }

    let onclick = {
        let on_activate = props.on_activate.clone();
        let index = props.index;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_activate.emit(index);
        })
    };

    let onkeydown = {
        let on_activate = props.on_activate.clone();
        let index = props.index;
        Callback::from(move |e: KeyboardEvent| {
            let key = e.key();
            if key == "Enter" || key == " " {
                e.prevent_default();
                on_activate.emit(index);
            }
        })
    };

    let icon = if props.expanded { "fas fa-minus" } else { "fas fa-plus" };

    html! {
        <div class="faq-item">
            <div
                class="faq-question"
                tabindex="0"
                role="button"
                aria-expanded={props.expanded.to_string()}
                {onclick}
                {onkeydown}
            >
                <h3>{props.question.clone()}</h3>
                <span class={classes!("faq-toggle", props.expanded.then(|| "active"))}>
                    <i class={icon}></i>
                </span>
            </div>
            <div
                ref={answer_ref}
                class={classes!("faq-answer", props.expanded.then(|| "active"))}
                style={collapsed().inline()}
            >
                <p>{props.answer.clone()}</p>
            </div>
        </div>
    }
}

#[function_component(FaqAccordion)]
pub fn faq_accordion() -> Html {
    let accordion = use_state_eq(Accordion::default);

    let on_activate = {
        let accordion = accordion.clone();
        Callback::from(move |index: usize| {
            accordion.set(accordion.activate(index));
        })
    };

    html! {
        <div class="faq-container">
            { for FAQ_ENTRIES.iter().enumerate().map(|(index, (question, answer))| html! {
                <FaqItem
                    key={index}
                    {index}
                    question={*question}
                    answer={*answer}
                    expanded={accordion.is_expanded(index)}
                    on_activate={on_activate.clone()}
                />
            }) }
        </div>
    }
}
