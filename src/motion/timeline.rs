use std::rc::Rc;

use super::ease::Ease;
use super::style::Style;

/// Where a step is placed relative to what is already on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline.
    Next,
    /// Seconds relative to the current end; negative values overlap.
    Offset(f64),
    /// Absolute seconds from the start of the timeline.
    At(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StaggerFrom {
    Start,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stagger {
    None,
    /// Fixed delay between consecutive elements.
    Each(f64),
    /// Total delay spread across the group, measured from the start or the
    /// middle. `ease` shapes how the delay grows with distance.
    Amount {
        amount: f64,
        from: StaggerFrom,
        ease: Ease,
    },
}

impl Stagger {
    /// Delay in seconds for each of `count` elements.
    pub fn delays(&self, count: usize) -> Vec<f64> {
        match *self {
            Stagger::None => vec![0.0; count],
            Stagger::Each(each) => (0..count).map(|i| i as f64 * each).collect(),
            Stagger::Amount { amount, from, ease } => {
                if count < 2 {
                    return vec![0.0; count];
                }
                let last = (count - 1) as f64;
                let distances: Vec<f64> = (0..count)
                    .map(|i| {
                        let i = i as f64;
                        match from {
                            StaggerFrom::Start => i,
                            StaggerFrom::Center => (i - last / 2.0).abs(),
                        }
                    })
                    .collect();
                let max = distances.iter().cloned().fold(0.0, f64::max);
                if max == 0.0 {
                    return vec![0.0; count];
                }
                distances
                    .into_iter()
                    .map(|d| ease.apply(d / max) * amount)
                    .collect()
            }
        }
    }
}

/// What a step animates.
#[derive(Clone)]
pub enum Target {
    /// Elements matching a CSS selector, resolved when the timeline plays.
    Selector(&'static str),
    /// Several selectors animated as one group, in order.
    Group(Vec<&'static str>),
    /// A plain value driven every frame; receives eased progress in `[0, 1]`.
    Value(Rc<dyn Fn(f64)>),
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Selector(s) => write!(f, "Selector({})", s),
            Target::Group(g) => write!(f, "Group({:?})", g),
            Target::Value(_) => write!(f, "Value(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Step {
    pub target: Target,
    /// Applied immediately when the timeline starts playing.
    pub from: Option<Style>,
    pub to: Style,
    pub duration: f64,
    pub ease: Ease,
    pub stagger: Stagger,
    pub position: Position,
}

impl Step {
    pub fn to(target: Target, to: Style, duration: f64) -> Self {
        Self {
            target,
            from: None,
            to,
            duration,
            ease: Ease::default(),
            stagger: Stagger::None,
            position: Position::Next,
        }
    }

    /// Animates from `from` to the elements' resting state.
    pub fn from(target: Target, from: Style, duration: f64) -> Self {
        let to = from.rest_of();
        Self {
            from: Some(from),
            ..Self::to(target, to, duration)
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Start time and per-element delays resolved for one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub start: f64,
    pub delays: Vec<f64>,
    pub end: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Resolves every step to absolute times given how many elements each
    /// step's target matched. Value targets always count as one.
    pub fn schedule(&self, counts: &[usize]) -> Vec<Slot> {
        let mut end = 0.0_f64;
        let mut slots = Vec::with_capacity(self.steps.len());
        for (step, &count) in self.steps.iter().zip(counts.iter()) {
            let start = match step.position {
                Position::Next => end,
                Position::Offset(offset) => (end + offset).max(0.0),
                Position::At(at) => at.max(0.0),
            };
            let delays = step.stagger.delays(count);
            let last_delay = delays.iter().cloned().fold(0.0, f64::max);
            let step_end = start + last_delay + step.duration;
            end = end.max(step_end);
            slots.push(Slot {
                start,
                delays,
                end: step_end,
            });
        }
        slots
    }

    pub fn duration(&self, counts: &[usize]) -> f64 {
        self.schedule(counts)
            .iter()
            .map(|slot| slot.end)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &'static str) -> Target {
        Target::Selector(s)
    }

    #[test]
    fn each_stagger_is_linear() {
        assert_eq!(Stagger::Each(0.2).delays(3), vec![0.0, 0.2, 0.4]);
        assert!(Stagger::Each(0.2).delays(0).is_empty());
    }

    #[test]
    fn amount_stagger_spreads_total() {
        let delays = Stagger::Amount {
            amount: 2.0,
            from: StaggerFrom::Start,
            ease: Ease::Linear,
        }
        .delays(5);
        assert_eq!(delays, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn center_stagger_starts_in_the_middle() {
        let delays = Stagger::Amount {
            amount: 0.8,
            from: StaggerFrom::Center,
            ease: Ease::Linear,
        }
        .delays(5);
        assert_eq!(delays[2], 0.0);
        assert_eq!(delays[0], 0.8);
        assert_eq!(delays[4], 0.8);
        assert!((delays[1] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn single_element_amount_has_no_delay() {
        let stagger = Stagger::Amount {
            amount: 2.0,
            from: StaggerFrom::Center,
            ease: Ease::Linear,
        };
        assert_eq!(stagger.delays(1), vec![0.0]);
    }

    #[test]
    fn eased_amount_stagger_bunches_delays() {
        let eased = Stagger::Amount {
            amount: 2.0,
            from: StaggerFrom::Start,
            ease: Ease::Power2Out,
        }
        .delays(3);
        assert_eq!(eased[0], 0.0);
        assert!((eased[1] - 1.75).abs() < 1e-9);
        assert!((eased[2] - 2.0).abs() < 1e-9);

        let eased_in = Stagger::Amount {
            amount: 0.8,
            from: StaggerFrom::Center,
            ease: Ease::Power2In,
        }
        .delays(5);
        assert_eq!(eased_in[2], 0.0);
        assert!((eased_in[1] - 0.1).abs() < 1e-9);
        assert!((eased_in[0] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn offsets_are_relative_to_timeline_end() {
        let tl = Timeline::new()
            .add(Step::to(sel(".a"), Style::new().opacity(1.0), 1.0))
            .add(Step::to(sel(".b"), Style::new().opacity(1.0), 0.5).at(Position::Offset(-0.3)))
            .add(Step::to(sel(".c"), Style::new().opacity(1.0), 1.0).at(Position::Offset(0.5)));
        let slots = tl.schedule(&[1, 1, 1]);
        assert_eq!(slots[0].start, 0.0);
        assert!((slots[1].start - 0.7).abs() < 1e-9);
        assert!((slots[2].start - 1.7).abs() < 1e-9);
        assert!((tl.duration(&[1, 1, 1]) - 2.7).abs() < 1e-9);
    }

    #[test]
    fn stagger_extends_step_end() {
        let tl = Timeline::new().add(
            Step::to(sel(".logo"), Style::new().scale(1.0), 1.0).stagger(Stagger::Each(0.3)),
        );
        assert!((tl.duration(&[2]) - 1.3).abs() < 1e-9);
    }

    #[test]
    fn overlapping_step_does_not_shrink_end() {
        let tl = Timeline::new()
            .add(Step::to(sel(".a"), Style::new(), 3.0))
            .add(Step::to(sel(".b"), Style::new(), 1.0).at(Position::At(0.0)))
            .add(Step::to(sel(".c"), Style::new(), 1.0));
        let slots = tl.schedule(&[1, 1, 1]);
        assert_eq!(slots[2].start, 3.0);
    }

    #[test]
    fn from_step_targets_rest() {
        let step = Step::from(sel(".hero h1"), Style::new().y(50.0).opacity(0.0), 1.0);
        assert_eq!(step.to, Style::new().y(0.0).opacity(1.0));
    }
}
