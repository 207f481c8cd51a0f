/// Progress that follows scroll position with a lag. A lag of zero tracks the
/// target exactly; otherwise the value eases towards it and takes roughly
/// `lag` seconds to catch up.
#[derive(Clone, Debug, PartialEq)]
pub struct Scrub {
    lag: f64,
    current: f64,
    target: f64,
}

// Fraction of the gap left after `lag` seconds.
const SETTLE_RESIDUE: f64 = 0.01;
const SNAP_EPSILON: f64 = 1e-4;

impl Scrub {
    pub fn new(lag: f64) -> Self {
        Self {
            lag: lag.max(0.0),
            current: 0.0,
            target: 0.0,
        }
    }

    pub fn set_target(&mut self, progress: f64) {
        self.target = progress.clamp(0.0, 1.0);
        if self.lag == 0.0 {
            self.current = self.target;
        }
    }

    /// Jumps straight to `progress`, e.g. when the binding is first measured.
    pub fn snap(&mut self, progress: f64) {
        self.target = progress.clamp(0.0, 1.0);
        self.current = self.target;
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Moves the value `dt` seconds closer to the target and returns it.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.lag == 0.0 || dt <= 0.0 {
            if self.lag == 0.0 {
                self.current = self.target;
            }
            return self.current;
        }
        let keep = SETTLE_RESIDUE.powf(dt / self.lag);
        self.current = self.target + (self.current - self.target) * keep;
        if (self.current - self.target).abs() < SNAP_EPSILON {
            self.current = self.target;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_lag_tracks_immediately() {
        let mut scrub = Scrub::new(0.0);
        scrub.set_target(0.4);
        assert_eq!(scrub.current(), 0.4);
        assert!(scrub.is_settled());
    }

    #[test]
    fn lagged_value_approaches_without_overshoot() {
        let mut scrub = Scrub::new(1.0);
        scrub.set_target(1.0);
        let mut last = 0.0;
        for _ in 0..30 {
            let value = scrub.advance(1.0 / 60.0);
            assert!(value >= last);
            assert!(value <= 1.0);
            last = value;
        }
        assert!(last > 0.5 && last < 1.0);
    }

    #[test]
    fn settles_after_the_lag() {
        let mut scrub = Scrub::new(2.0);
        scrub.set_target(1.0);
        for _ in 0..300 {
            scrub.advance(1.0 / 60.0);
        }
        assert!(scrub.is_settled());
        assert_eq!(scrub.current(), 1.0);
    }

    #[test]
    fn moving_back_decreases() {
        let mut scrub = Scrub::new(1.0);
        scrub.snap(1.0);
        scrub.set_target(0.0);
        let value = scrub.advance(0.1);
        assert!(value < 1.0 && value > 0.0);
    }

    #[test]
    fn targets_are_clamped() {
        let mut scrub = Scrub::new(0.0);
        scrub.set_target(3.0);
        assert_eq!(scrub.current(), 1.0);
        scrub.set_target(-1.0);
        assert_eq!(scrub.current(), 0.0);
    }
}
