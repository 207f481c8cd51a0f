use gloo_timers::callback::Timeout;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::{HtmlInputElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::config;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Returns the trimmed address when it looks like `local@domain.tld`.
pub fn validate_email(input: &str) -> Option<&str> {
    let email = input.trim();
    (!email.is_empty() && EMAIL_RE.is_match(email)).then_some(email)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Idle,
    Subscribed,
    Invalid,
}

impl Feedback {
    pub fn for_input(input: &str) -> Self {
        match validate_email(input) {
            Some(_) => Feedback::Subscribed,
            None => Feedback::Invalid,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Feedback::Idle => "Enter your email",
            Feedback::Subscribed => "Thanks for subscribing!",
            Feedback::Invalid => "Please enter a valid email",
        }
    }

    /// How long this feedback stays before returning to `Idle`.
    pub fn reset_after_ms(self) -> Option<u32> {
        match self {
            Feedback::Idle => None,
            Feedback::Subscribed => Some(config::NEWSLETTER_SUCCESS_RESET_MS),
            Feedback::Invalid => Some(config::NEWSLETTER_ERROR_RESET_MS),
        }
    }
}

#[function_component(Newsletter)]
pub fn newsletter() -> Html {
    let feedback = use_state_eq(|| Feedback::Idle);
    let input_ref = use_node_ref();
    let reset = use_mut_ref(|| None::<Timeout>);

    let submit = {
        let feedback = feedback.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_: ()| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let value = input.value();
            let next = Feedback::for_input(&value);
            if let Some(email) = validate_email(&value) {
                info!("Newsletter signup for: {}", email);
                input.set_value("");
            }
            feedback.set(next);

            // A new click replaces any pending reset.
            let feedback = feedback.clone();
            *reset.borrow_mut() = next.reset_after_ms().map(|ms| {
                Timeout::new(ms, move || feedback.set(Feedback::Idle))
            });
        })
    };

    let onclick = {
        let submit = submit.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    let onkeypress = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            e.prevent_default();
            submit.emit(());
        }
    });

    let subscribed = *feedback == Feedback::Subscribed;
    let input_style = (*feedback == Feedback::Invalid).then(|| "border-color: #f44336;");
    let button_style = subscribed.then(|| "background: #4CAF50;");

    html! {
        <div class="newsletter-form">
            <input
                ref={input_ref}
                type="email"
                class="newsletter-input"
                placeholder={feedback.placeholder()}
                style={input_style}
                {onkeypress}
            />
            <button class="newsletter-btn" style={button_style} {onclick} aria-label="Subscribe">
                if subscribed {
                    <i class="fas fa-check"></i>
                } else {
                    <i class="fas fa-paper-plane"></i>
                }
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_address() {
        assert_eq!(validate_email("a@b.co"), Some("a@b.co"));
    }

    #[test]
    fn rejects_missing_at() {
        assert_eq!(validate_email("not-an-email"), None);
    }

    #[test]
    fn rejects_missing_top_level_domain() {
        assert_eq!(validate_email("a@b"), None);
    }

    #[test]
    fn trims_before_checking() {
        assert_eq!(validate_email(" a@b.co "), Some("a@b.co"));
    }

    #[test]
    fn rejects_blank_and_inner_whitespace() {
        assert_eq!(validate_email("   "), None);
        assert_eq!(validate_email("a b@c.de"), None);
        assert_eq!(validate_email("a@@b.co"), None);
    }

    #[test]
    fn feedback_follows_validation() {
        assert_eq!(Feedback::for_input(" a@b.co "), Feedback::Subscribed);
        assert_eq!(Feedback::for_input("a@b"), Feedback::Invalid);
    }

    #[test]
    fn error_resets_sooner_than_success() {
        let ok = Feedback::Subscribed.reset_after_ms().unwrap();
        let err = Feedback::Invalid.reset_after_ms().unwrap();
        assert_eq!(ok, 3_000);
        assert_eq!(err, 2_000);
        assert_eq!(Feedback::Idle.reset_after_ms(), None);
        assert_eq!(Feedback::Idle.placeholder(), "Enter your email");
    }
}
