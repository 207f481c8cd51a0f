use gloo_timers::future::TimeoutFuture;
use log::{debug, info};
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement, SubmitEvent};
use yew::prelude::*;

use crate::config;
use crate::motion::ease::Ease;
use crate::motion::player;
use crate::motion::style::Style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    Idle,
    Submitting,
    Submitted,
}

impl Submission {
    /// Label for the submit control, or `None` once the form is gone.
    pub fn button_label(self) -> Option<&'static str> {
        match self {
            Submission::Idle => Some("Register Now"),
            Submission::Submitting => Some("Submitting..."),
            Submission::Submitted => None,
        }
    }

    pub fn is_busy(self) -> bool {
        self == Submission::Submitting
    }

    /// Starting a submission only works from a fresh form.
    pub fn submit(self) -> Option<Self> {
        (self == Submission::Idle).then_some(Submission::Submitting)
    }
}

/// Field values as a future registration endpoint would receive them.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub team: String,
    pub track: String,
    pub experience: String,
}

pub const TRACKS: &[(&str, &str)] = &[
    ("satellite", "Satellite Data"),
    ("propulsion", "Propulsion & Launch"),
    ("habitat", "Space Habitats"),
    ("open", "Open Innovation"),
];

pub const EXPERIENCE_LEVELS: &[(&str, &str)] = &[
    ("beginner", "Beginner"),
    ("intermediate", "Intermediate"),
    ("advanced", "Advanced"),
];

fn success_from() -> Style {
    Style::new().y(30.0).opacity(0.0)
}

#[function_component(RegistrationForm)]
pub fn registration_form() -> Html {
    let submission = use_state_eq(|| Submission::Idle);
    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let team_ref = use_node_ref();
    let track_ref = use_node_ref();
    let experience_ref = use_node_ref();
    let success_ref = use_node_ref();

    {
        let success_ref = success_ref.clone();
        use_effect_with_deps(
            move |state| {
                if *state == Submission::Submitted {
                    if let Some(message) = success_ref.cast::<HtmlElement>() {
                        let rest = success_from().rest_of();
                        if let Err(e) = player::tween(&message, &rest, 0.8, Ease::Power3Out) {
                            debug!("success message animation skipped: {}", e);
                        }
                    }
                }
                || ()
            },
            *submission,
        );
    }

    let onsubmit = {
        let submission = submission.clone();
        let refs = (
            name_ref.clone(),
            email_ref.clone(),
            team_ref.clone(),
            track_ref.clone(),
            experience_ref.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(next) = submission.submit() else {
                return;
            };
            let input = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|el| el.value())
                    .unwrap_or_default()
            };
            let select = |node: &NodeRef| {
                node.cast::<HtmlSelectElement>()
                    .map(|el| el.value())
                    .unwrap_or_default()
            };
            let registration = Registration {
                name: input(&refs.0),
                email: input(&refs.1),
                team: input(&refs.2),
                track: select(&refs.3),
                experience: select(&refs.4),
            };
            match serde_json::to_string(&registration) {
                Ok(payload) => debug!("registration payload: {}", payload),
                Err(e) => debug!("registration payload not serializable: {}", e),
            }
            submission.set(next);

            let submission = submission.clone();
            spawn_local(async move {
                TimeoutFuture::new(config::SUBMIT_DELAY_MS).await;
                info!("Registration submitted");
                submission.set(Submission::Submitted);
            });
        })
    };

    let state = *submission;
    html! {
        <div class="register-form">
            {
                match state.button_label() {
                    Some(label) => html! {
                        <form id="registration-form" {onsubmit}>
                            <div class="form-group">
                                <label for="name">{"Full Name"}</label>
                                <input ref={name_ref} type="text" id="name" name="name" required=true />
                            </div>
                            <div class="form-group">
                                <label for="email">{"Email Address"}</label>
                                <input ref={email_ref} type="email" id="email" name="email" required=true />
                            </div>
                            <div class="form-group">
                                <label for="team">{"Team Name (optional)"}</label>
                                <input ref={team_ref} type="text" id="team" name="team" />
                            </div>
                            <div class="form-group">
                                <label for="track">{"Challenge Track"}</label>
                                <select ref={track_ref} id="track" name="track" required=true>
                                    <option value="" selected=true disabled=true>{"Select a track"}</option>
                                    { for TRACKS.iter().map(|(value, label)| html! {
                                        <option value={*value}>{*label}</option>
                                    }) }
                                </select>
                            </div>
                            <div class="form-group">
                                <label for="experience">{"Experience Level"}</label>
                                <select ref={experience_ref} id="experience" name="experience">
                                    { for EXPERIENCE_LEVELS.iter().map(|(value, label)| html! {
                                        <option value={*value}>{*label}</option>
                                    }) }
                                </select>
                            </div>
                            <button type="submit" class="btn btn-primary" disabled={state.is_busy()}>
                                {label}
                            </button>
                        </form>
                    },
                    None => html! {
                        <div ref={success_ref} class="success-message" style={success_from().inline()}>
                            <i class="fas fa-check-circle" style="font-size: 3rem; color: var(--secondary-color); margin-bottom: 20px;"></i>
                            <h3>{"Registration Successful!"}</h3>
                            <p>
                                {format!("Thank you for registering for the {}. We've sent a confirmation email with further details.", config::EVENT_NAME)}
                            </p>
                        </div>
                    },
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitting_disables_and_relabels() {
        let state = Submission::Idle.submit().unwrap();
        assert!(state.is_busy());
        assert_eq!(state.button_label(), Some("Submitting..."));
    }

    #[test]
    fn submitted_form_has_no_control() {
        assert_eq!(Submission::Submitted.button_label(), None);
        assert!(!Submission::Submitted.is_busy());
    }

    #[test]
    fn cannot_submit_twice() {
        assert_eq!(Submission::Submitting.submit(), None);
        assert_eq!(Submission::Submitted.submit(), None);
    }

    #[test]
    fn payload_serializes_every_field() {
        let registration = Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            track: "satellite".into(),
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["team"], "");
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
