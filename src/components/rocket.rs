use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::motion::ease::Ease;
use crate::motion::player;
use crate::motion::style::Style;
use crate::scroll::hooks::{use_scroll_trigger, use_scrub};
use crate::scroll::trigger::{Action, ToggleActions, Transition, TriggerSpec};

const LAUNCH_SECONDS: f64 = 5.0;
const RESET_AFTER_LEAVE_MS: u32 = 1_000;
const RESET_AFTER_LAUNCH_MS: u32 = 2_000;

fn grounded() -> Style {
    Style::new().y(0.0).scale(1.0).opacity(1.0)
}

fn launched() -> Style {
    Style::new().y(-800.0).scale(0.3).opacity(0.0)
}

/// Where the scrubbed flight puts the rocket at scroll `progress`.
pub fn flight_at(progress: f64) -> Style {
    Style::lerp(&grounded(), &launched(), Ease::Power2Out.apply(progress))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launch {
    Idle,
    /// Lifted off because the schedule scrolled into view.
    Scrolled,
    /// Lifted off by a click; scrolling leaves it alone until it resets.
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RocketEvent {
    Scroll(Transition),
    Click,
    ResetDue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Nothing,
    Ignite,
    Launch,
    ResetIn(u32),
    ResetNow,
}

impl Launch {
    pub fn handle(self, event: RocketEvent) -> (Self, Command) {
        use Launch::*;
        match (self, event) {
            (Manual, RocketEvent::ResetDue) => (Idle, Command::ResetNow),
            (Manual, _) => (Manual, Command::Nothing),
            (_, RocketEvent::Scroll(Transition::Enter)) => (Scrolled, Command::Ignite),
            (Scrolled, RocketEvent::Scroll(Transition::Leave)) => {
                (Scrolled, Command::ResetIn(RESET_AFTER_LEAVE_MS))
            }
            (_, RocketEvent::Scroll(Transition::EnterBack)) => (Idle, Command::ResetNow),
            (Idle, RocketEvent::Click) => (Manual, Command::Launch),
            (Scrolled, RocketEvent::ResetDue) => (Idle, Command::ResetNow),
            (state, _) => (state, Command::Nothing),
        }
    }

    /// Whether scroll progress should still drive the rocket's position.
    pub fn follows_scroll(self) -> bool {
        self != Launch::Manual
    }
}

#[derive(Clone)]
struct RocketHandle {
    rocket: NodeRef,
    exhaust: NodeRef,
    state: Rc<RefCell<Launch>>,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl RocketHandle {
    fn dispatch(&self, event: RocketEvent) {
        let current = *self.state.borrow();
        let (next, command) = current.handle(event);
        *self.state.borrow_mut() = next;
        if command == Command::ResetNow && event != RocketEvent::ResetDue {
            self.pending.borrow_mut().take();
        }
        self.run(command);
    }

    fn run(&self, command: Command) {
        let Some(rocket) = self.rocket.cast::<HtmlElement>() else {
            return;
        };
        let result = match command {
            Command::Nothing => Ok(()),
            Command::Ignite => self.ignite(&rocket, true),
            Command::Launch => {
                info!("Rocket launched");
                self.schedule_reset((LAUNCH_SECONDS * 1000.0) as u32 + RESET_AFTER_LAUNCH_MS);
                self.ignite(&rocket, true)
                    .and_then(|_| player::tween(&rocket, &launched(), LAUNCH_SECONDS, Ease::Power2Out))
            }
            Command::ResetIn(ms) => {
                self.schedule_reset(ms);
                Ok(())
            }
            Command::ResetNow => self
                .ignite(&rocket, false)
                .and_then(|_| player::set(&rocket, &grounded())),
        };
        if let Err(e) = result {
            debug!("rocket update skipped: {}", e);
        }
    }

    fn ignite(&self, rocket: &HtmlElement, on: bool) -> crate::dom::DomResult<()> {
        let classes = rocket.class_list();
        if on {
            classes.add_1("rocket-launching")?;
        } else {
            classes.remove_1("rocket-launching")?;
        }
        if let Some(exhaust) = self.exhaust.cast::<HtmlElement>() {
            exhaust
                .style()
                .set_property("opacity", if on { "1" } else { "0" })?;
        }
        Ok(())
    }

    fn schedule_reset(&self, ms: u32) {
        let handle = self.clone();
        *self.pending.borrow_mut() = Some(Timeout::new(ms, move || {
            handle.dispatch(RocketEvent::ResetDue)
        }));
    }

    fn follow(&self, progress: f64) {
        if !self.state.borrow().follows_scroll() {
            return;
        }
        if let Some(rocket) = self.rocket.cast::<HtmlElement>() {
            if let Err(e) = player::set(&rocket, &flight_at(progress)) {
                debug!("rocket scrub skipped: {}", e);
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RocketProps {
    /// The section whose scroll range flies the rocket.
    pub section: NodeRef,
}

#[function_component(Rocket)]
pub fn rocket(props: &RocketProps) -> Html {
    let rocket_ref = use_node_ref();
    let exhaust_ref = use_node_ref();
    let state = use_mut_ref(|| Launch::Idle);
    let pending = use_mut_ref(|| None::<Timeout>);

    let handle = RocketHandle {
        rocket: rocket_ref.clone(),
        exhaust: exhaust_ref.clone(),
        state,
        pending,
    };

    let spec = TriggerSpec::parse("top 50%", Some("bottom 20%"))
        .unwrap_or_default()
        .actions(ToggleActions {
            on_enter: Action::Play,
            on_leave: Action::Reset,
            on_enter_back: Action::Reset,
            on_leave_back: Action::None,
        });

    let on_scrub = {
        let handle = handle.clone();
        Callback::from(move |progress: f64| handle.follow(progress))
    };
    use_scrub(Some(props.section.clone()), spec, 2.0, on_scrub);

    let on_fire = {
        let handle = handle.clone();
        Callback::from(move |(transition, _): (Transition, Action)| {
            handle.dispatch(RocketEvent::Scroll(transition))
        })
    };
    use_scroll_trigger(props.section.clone(), spec, on_fire);

    let onclick = Callback::from(move |_: MouseEvent| handle.dispatch(RocketEvent::Click));

    html! {
        <div class="rocket-3d" ref={rocket_ref} {onclick} title="Click to launch">
            <div class="rocket-body">
                <i class="fas fa-rocket"></i>
            </div>
            <div class="rocket-exhaust" ref={exhaust_ref} style="opacity: 0;"></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_in_ignites() {
        let (state, command) = Launch::Idle.handle(RocketEvent::Scroll(Transition::Enter));
        assert_eq!(state, Launch::Scrolled);
        assert_eq!(command, Command::Ignite);
    }

    #[test]
    fn leaving_resets_after_a_second() {
        let (state, command) = Launch::Scrolled.handle(RocketEvent::Scroll(Transition::Leave));
        assert_eq!(state, Launch::Scrolled);
        assert_eq!(command, Command::ResetIn(1_000));
        assert_eq!(state.handle(RocketEvent::ResetDue), (Launch::Idle, Command::ResetNow));
    }

    #[test]
    fn scrolling_back_resets_immediately() {
        let (state, command) =
            Launch::Scrolled.handle(RocketEvent::Scroll(Transition::EnterBack));
        assert_eq!(state, Launch::Idle);
        assert_eq!(command, Command::ResetNow);
    }

    #[test]
    fn click_launches_only_from_the_ground() {
        assert_eq!(Launch::Idle.handle(RocketEvent::Click), (Launch::Manual, Command::Launch));
        assert_eq!(
            Launch::Scrolled.handle(RocketEvent::Click),
            (Launch::Scrolled, Command::Nothing)
        );
        assert_eq!(Launch::Manual.handle(RocketEvent::Click), (Launch::Manual, Command::Nothing));
    }

    #[test]
    fn manual_flight_ignores_scroll_until_reset() {
        let state = Launch::Manual;
        assert!(!state.follows_scroll());
        for transition in [Transition::Enter, Transition::Leave, Transition::EnterBack] {
            assert_eq!(
                state.handle(RocketEvent::Scroll(transition)),
                (Launch::Manual, Command::Nothing)
            );
        }
        assert_eq!(state.handle(RocketEvent::ResetDue), (Launch::Idle, Command::ResetNow));
    }

    #[test]
    fn scrubbed_flight_eases_out() {
        let mid = flight_at(0.5);
        assert_eq!(mid.y, Some(-700.0));
        assert!((mid.scale.unwrap() - 0.3875).abs() < 1e-9);
        assert_eq!(mid.opacity, Some(0.125));
        assert_eq!(flight_at(0.0), grounded());
        assert_eq!(flight_at(1.0).y, Some(-800.0));
    }
}
