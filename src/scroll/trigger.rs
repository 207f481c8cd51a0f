//! Scroll trigger state: where a trigger starts and ends relative to the
//! viewport, which phase the page is in, and what to do on each crossing.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TriggerParseError {
    #[error("expected \"<element edge> <viewport position>\", got {0:?}")]
    Shape(String),
    #[error("unknown position {0:?}")]
    Position(String),
    #[error("unknown toggle action {0:?}")]
    Action(String),
    #[error("toggle actions need four entries, got {0}")]
    ActionCount(usize),
}

/// A position expressed as a fraction of an element's or the viewport's height.
fn parse_fraction(token: &str) -> Result<f64, TriggerParseError> {
    match token {
        "top" => Ok(0.0),
        "center" => Ok(0.5),
        "bottom" => Ok(1.0),
        pct if pct.ends_with('%') => pct[..pct.len() - 1]
            .parse::<f64>()
            .map(|v| v / 100.0)
            .map_err(|_| TriggerParseError::Position(token.to_string())),
        other => Err(TriggerParseError::Position(other.to_string())),
    }
}

/// Pairs a point on the trigger element with a line in the viewport, e.g.
/// `"top 80%"`: the trigger's top edge meets the line 80% down the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub element: f64,
    pub viewport: f64,
}

impl FromStr for Anchor {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Anchor {
                element: parse_fraction(element)?,
                viewport: parse_fraction(viewport)?,
            }),
            _ => Err(TriggerParseError::Shape(s.to_string())),
        }
    }
}

impl Anchor {
    /// Scroll distance still to go before this anchor is reached, given the
    /// element's current bounding box. Zero or negative once reached.
    fn remaining(&self, geometry: &Geometry) -> f64 {
        geometry.top + self.element * geometry.height - self.viewport * geometry.viewport_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    None,
}

impl FromStr for Action {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Action::Play),
            "pause" => Ok(Action::Pause),
            "resume" => Ok(Action::Resume),
            "reverse" => Ok(Action::Reverse),
            "restart" => Ok(Action::Restart),
            "reset" => Ok(Action::Reset),
            "complete" => Ok(Action::Complete),
            "none" => Ok(Action::None),
            other => Err(TriggerParseError::Action(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleActions {
    pub on_enter: Action,
    pub on_leave: Action,
    pub on_enter_back: Action,
    pub on_leave_back: Action,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: Action::Play,
            on_leave: Action::None,
            on_enter_back: Action::None,
            on_leave_back: Action::None,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(Action::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            other => Err(TriggerParseError::ActionCount(other.len())),
        }
    }
}

impl ToggleActions {
    /// `play none none none`: nothing after the first enter can change the
    /// animation, so the trigger can stop listening.
    pub fn is_one_shot(&self) -> bool {
        self.on_enter == Action::Play
            && self.on_leave == Action::None
            && self.on_enter_back == Action::None
            && self.on_leave_back == Action::None
    }

    pub fn for_transition(&self, transition: Transition) -> Action {
        match transition {
            Transition::Enter => self.on_enter,
            Transition::Leave => self.on_leave,
            Transition::EnterBack => self.on_enter_back,
            Transition::LeaveBack => self.on_leave_back,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Before,
    Active,
    After,
}

/// The trigger element's bounding box relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerSpec {
    pub start: Anchor,
    pub end: Anchor,
    pub actions: ToggleActions,
    pub once: bool,
}

impl Default for TriggerSpec {
    /// `top 80%` to `bottom top` with `play none none none`, which retires
    /// after the first enter.
    fn default() -> Self {
        Self {
            start: Anchor {
                element: 0.0,
                viewport: 0.8,
            },
            end: Anchor {
                element: 1.0,
                viewport: 0.0,
            },
            actions: ToggleActions::default(),
            once: false,
        }
    }
}

impl TriggerSpec {
    /// Builds a trigger from threshold strings; `end` defaults to `"bottom top"`.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, TriggerParseError> {
        Ok(Self {
            start: start.parse()?,
            end: end.unwrap_or("bottom top").parse()?,
            actions: ToggleActions::default(),
            once: false,
        })
    }

    pub fn actions(mut self, actions: ToggleActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Unclamped progress through the trigger range: below 0 before the start,
    /// above 1 past the end.
    pub fn progress(&self, geometry: &Geometry) -> f64 {
        let to_start = self.start.remaining(geometry);
        let to_end = self.end.remaining(geometry);
        let span = to_end - to_start;
        if span <= 0.0 {
            // Degenerate range: behave like a single line at the start.
            return if to_start <= 0.0 { 1.0 } else { -1.0 };
        }
        -to_start / span
    }

    pub fn phase(&self, geometry: &Geometry) -> Phase {
        let progress = self.progress(geometry);
        if progress < 0.0 {
            Phase::Before
        } else if progress > 1.0 {
            Phase::After
        } else {
            Phase::Active
        }
    }
}

/// Tracks one trigger across scroll updates and reports what fired.
#[derive(Clone, Debug)]
pub struct TriggerState {
    spec: TriggerSpec,
    phase: Phase,
    retired: bool,
}

impl TriggerState {
    pub fn new(spec: TriggerSpec) -> Self {
        Self {
            spec,
            phase: Phase::Before,
            retired: false,
        }
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Feeds the latest geometry and returns the crossings it caused, each
    /// paired with its configured action, in the order they happened.
    pub fn update(&mut self, geometry: &Geometry) -> Vec<(Transition, Action)> {
        if self.retired {
            return Vec::new();
        }
        let next = self.spec.phase(geometry);
        let transitions = match (self.phase, next) {
            (Phase::Before, Phase::Active) => vec![Transition::Enter],
            (Phase::Before, Phase::After) => vec![Transition::Enter, Transition::Leave],
            (Phase::Active, Phase::After) => vec![Transition::Leave],
            (Phase::After, Phase::Active) => vec![Transition::EnterBack],
            (Phase::After, Phase::Before) => vec![Transition::EnterBack, Transition::LeaveBack],
            (Phase::Active, Phase::Before) => vec![Transition::LeaveBack],
            _ => Vec::new(),
        };
        self.phase = next;

        let mut fired = Vec::with_capacity(transitions.len());
        for transition in transitions {
            fired.push((transition, self.spec.actions.for_transition(transition)));
            if transition == Transition::Enter && (self.spec.once || self.spec.actions.is_one_shot()) {
                self.retired = true;
                break;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(top: f64) -> Geometry {
        Geometry {
            top,
            height: 500.0,
            viewport_height: 1000.0,
        }
    }

    #[test]
    fn parses_anchor_keywords_and_percentages() {
        assert_eq!(
            "top 80%".parse::<Anchor>().unwrap(),
            Anchor { element: 0.0, viewport: 0.8 }
        );
        assert_eq!(
            "bottom bottom".parse::<Anchor>().unwrap(),
            Anchor { element: 1.0, viewport: 1.0 }
        );
        assert_eq!(
            "center 50%".parse::<Anchor>().unwrap(),
            Anchor { element: 0.5, viewport: 0.5 }
        );
    }

    #[test]
    fn rejects_malformed_anchor() {
        assert!(matches!("top".parse::<Anchor>(), Err(TriggerParseError::Shape(_))));
        assert!(matches!(
            "top middle".parse::<Anchor>(),
            Err(TriggerParseError::Position(_))
        ));
        assert!(matches!("top 8x%".parse::<Anchor>(), Err(TriggerParseError::Position(_))));
    }

    #[test]
    fn default_spec_matches_common_entrance() {
        assert_eq!(
            TriggerSpec::parse("top 80%", None).unwrap(),
            TriggerSpec::default()
        );
    }

    #[test]
    fn parses_toggle_actions() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(actions.on_enter, Action::Play);
        assert_eq!(actions.on_leave_back, Action::Reverse);
        assert_eq!(
            "play none".parse::<ToggleActions>(),
            Err(TriggerParseError::ActionCount(2))
        );
        assert!("play none none jump".parse::<ToggleActions>().is_err());
    }

    #[test]
    fn progress_follows_the_trigger_range() {
        let spec = TriggerSpec::parse("top 80%", Some("bottom 20%")).unwrap();
        // Start when top hits 800px, end when bottom (top + 500) hits 200px.
        assert!(spec.progress(&at(900.0)) < 0.0);
        assert_eq!(spec.progress(&at(800.0)), 0.0);
        assert_eq!(spec.progress(&at(-300.0)), 1.0);
        assert!((spec.progress(&at(250.0)) - 0.5).abs() < 1e-9);
        assert_eq!(spec.phase(&at(-400.0)), Phase::After);
    }

    #[test]
    fn play_none_none_none_fires_once() {
        let spec = TriggerSpec::parse("top 80%", None)
            .unwrap()
            .actions("play none none none".parse().unwrap());
        let mut state = TriggerState::new(spec);

        let mut fired = Vec::new();
        // Above the start, into range, back out above, and into range again.
        for top in [1200.0, 700.0, 1200.0, 700.0, -900.0, 700.0] {
            fired.extend(state.update(&at(top)));
        }
        assert_eq!(fired, vec![(Transition::Enter, Action::Play)]);
        assert!(state.is_retired());
    }

    #[test]
    fn reversible_trigger_keeps_reporting() {
        let spec = TriggerSpec::parse("top 80%", None)
            .unwrap()
            .actions("play none none reverse".parse().unwrap());
        let mut state = TriggerState::new(spec);
        assert_eq!(state.update(&at(700.0)), vec![(Transition::Enter, Action::Play)]);
        assert_eq!(
            state.update(&at(1200.0)),
            vec![(Transition::LeaveBack, Action::Reverse)]
        );
        assert_eq!(state.update(&at(700.0)), vec![(Transition::Enter, Action::Play)]);
        assert!(!state.is_retired());
    }

    #[test]
    fn default_spec_retires_through_its_actions() {
        let spec = TriggerSpec::default();
        assert!(!spec.once);
        assert!(spec.actions.is_one_shot());
        let mut state = TriggerState::new(spec);
        assert_eq!(state.update(&at(700.0)), vec![(Transition::Enter, Action::Play)]);
        assert!(state.is_retired());
    }

    #[test]
    fn once_trigger_retires_after_enter() {
        let spec = TriggerSpec::parse("top 80%", None).unwrap().once();
        let mut state = TriggerState::new(spec);
        assert_eq!(state.update(&at(700.0)), vec![(Transition::Enter, Action::Play)]);
        assert!(state.is_retired());
        assert!(state.update(&at(1200.0)).is_empty());
        assert!(state.update(&at(700.0)).is_empty());
    }

    #[test]
    fn already_in_range_on_first_update_enters() {
        let spec = TriggerSpec::parse("top 80%", None).unwrap();
        let mut state = TriggerState::new(spec);
        assert_eq!(state.update(&at(100.0)), vec![(Transition::Enter, Action::Play)]);
        assert!(state.is_retired());
    }

    #[test]
    fn jumping_past_the_range_reports_both_edges() {
        let spec = TriggerSpec::parse("top 80%", Some("bottom 20%"))
            .unwrap()
            .actions("play reverse play reverse".parse().unwrap());
        let mut state = TriggerState::new(spec);
        let fired: Vec<Transition> = state.update(&at(-2000.0)).into_iter().map(|(t, _)| t).collect();
        assert_eq!(fired, vec![Transition::Enter, Transition::Leave]);
        let fired: Vec<Transition> = state.update(&at(2000.0)).into_iter().map(|(t, _)| t).collect();
        assert_eq!(fired, vec![Transition::EnterBack, Transition::LeaveBack]);
    }
}
