use std::f64::consts::PI;

/// Easing curves used by the page. Each curve has an exact progress function
/// for frame-driven values and a CSS timing function for transition-driven
/// styles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3Out,
    /// Overshoots by the given strength before settling.
    BackOut(f64),
    SineInOut,
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power2Out
    }
}

impl Ease {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t.powi(3),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    pub fn css(self) -> String {
        match self {
            Ease::Linear => "linear".to_string(),
            Ease::Power2In => "cubic-bezier(0.55, 0.055, 0.675, 0.19)".to_string(),
            Ease::Power2Out => "cubic-bezier(0.215, 0.61, 0.355, 1)".to_string(),
            Ease::Power2InOut => "cubic-bezier(0.645, 0.045, 0.355, 1)".to_string(),
            Ease::Power3Out => "cubic-bezier(0.165, 0.84, 0.44, 1)".to_string(),
            // 1.7 maps onto the classic easeOutBack curve; scale the overshoot
            // handle for other strengths.
            Ease::BackOut(s) => format!(
                "cubic-bezier(0.175, 0.885, 0.32, {:.3})",
                1.0 + 0.275 * (s / 1.70158)
            ),
            Ease::SineInOut => "cubic-bezier(0.445, 0.05, 0.55, 0.95)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::Power3Out,
        Ease::BackOut(1.7),
        Ease::SineInOut,
    ];

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-9, "{:?} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at 1", ease);
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::Power2Out.apply(-1.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(2.0), 1.0);
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.7).apply(i as f64 / 100.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn in_out_is_symmetric_at_midpoint() {
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn out_curves_lead_linear_progress() {
        assert!(Ease::Power2Out.apply(0.3) > 0.3);
        assert!(Ease::Power3Out.apply(0.3) > Ease::Power2Out.apply(0.3));
        assert!(Ease::Power2In.apply(0.3) < 0.3);
    }

    #[test]
    fn css_back_out_uses_classic_curve() {
        assert_eq!(
            Ease::BackOut(1.70158).css(),
            "cubic-bezier(0.175, 0.885, 0.32, 1.275)"
        );
    }
}
