/// A partial set of animatable properties. Unset fields are left alone when
/// the style is applied; transform components are composed into a single
/// `transform` declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub opacity: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub rotation_y: Option<f64>,
    pub width_pct: Option<f64>,
    pub max_height: Option<f64>,
    pub padding: Option<&'static str>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, value: f64) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn rotation_y(mut self, degrees: f64) -> Self {
        self.rotation_y = Some(degrees);
        self
    }

    pub fn width_pct(mut self, value: f64) -> Self {
        self.width_pct = Some(value);
        self
    }

    pub fn max_height(mut self, px: f64) -> Self {
        self.max_height = Some(px);
        self
    }

    pub fn padding(mut self, value: &'static str) -> Self {
        self.padding = Some(value);
        self
    }

    /// The resting counterpart of a `from` style: every property this style
    /// sets, returned to its natural value.
    pub fn rest_of(&self) -> Self {
        Self {
            opacity: self.opacity.map(|_| 1.0),
            x: self.x.map(|_| 0.0),
            y: self.y.map(|_| 0.0),
            scale: self.scale.map(|_| 1.0),
            rotation: self.rotation.map(|_| 0.0),
            rotation_y: self.rotation_y.map(|_| 0.0),
            width_pct: self.width_pct.map(|_| 100.0),
            max_height: None,
            padding: None,
        }
    }

    fn has_transform(&self) -> bool {
        self.x.is_some()
            || self.y.is_some()
            || self.scale.is_some()
            || self.rotation.is_some()
            || self.rotation_y.is_some()
    }

    /// CSS property names touched by this style, used to build the
    /// `transition-property` list.
    pub fn property_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.opacity.is_some() {
            names.push("opacity");
        }
        if self.has_transform() {
            names.push("transform");
        }
        if self.width_pct.is_some() {
            names.push("width");
        }
        if self.max_height.is_some() {
            names.push("max-height");
        }
        if self.padding.is_some() {
            names.push("padding");
        }
        names
    }

    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(opacity) = self.opacity {
            out.push(("opacity", format!("{}", opacity)));
        }
        if self.has_transform() {
            out.push(("transform", self.transform()));
        }
        if let Some(width) = self.width_pct {
            out.push(("width", format!("{}%", width)));
        }
        if let Some(max_height) = self.max_height {
            out.push(("max-height", format!("{}px", max_height)));
        }
        if let Some(padding) = self.padding {
            out.push(("padding", padding.to_string()));
        }
        out
    }

    pub fn transform(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg) rotateY({}deg) scale({})",
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.rotation.unwrap_or(0.0),
            self.rotation_y.unwrap_or(0.0),
            self.scale.unwrap_or(1.0),
        )
    }

    /// Interpolates numeric properties set on both sides. `padding` snaps to
    /// the target once `t` reaches the end.
    pub fn lerp(from: &Style, to: &Style, t: f64) -> Style {
        fn mix(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a + (b - a) * t),
                (None, b) => b,
                (a, None) => a,
            }
        }
        Style {
            opacity: mix(from.opacity, to.opacity, t),
            x: mix(from.x, to.x, t),
            y: mix(from.y, to.y, t),
            scale: mix(from.scale, to.scale, t),
            rotation: mix(from.rotation, to.rotation, t),
            rotation_y: mix(from.rotation_y, to.rotation_y, t),
            width_pct: mix(from.width_pct, to.width_pct, t),
            max_height: mix(from.max_height, to.max_height, t),
            padding: if t >= 1.0 { to.padding.or(from.padding) } else { from.padding.or(to.padding) },
        }
    }

    /// Inline `style` attribute text, for rendering initial states from `html!`.
    pub fn inline(&self) -> String {
        self.declarations()
            .into_iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_components_are_composed() {
        let style = Style::new().y(50.0).rotation_y(90.0).scale(0.5);
        assert_eq!(
            style.transform(),
            "translate(0px, 50px) rotate(0deg) rotateY(90deg) scale(0.5)"
        );
        assert_eq!(style.property_names(), vec!["transform"]);
    }

    #[test]
    fn rest_returns_only_touched_properties() {
        let from = Style::new().x(-100.0).opacity(0.0);
        let rest = from.rest_of();
        assert_eq!(rest.x, Some(0.0));
        assert_eq!(rest.opacity, Some(1.0));
        assert_eq!(rest.y, None);
        assert_eq!(rest.scale, None);
    }

    #[test]
    fn inline_renders_declarations() {
        let style = Style::new().opacity(0.0).width_pct(0.0);
        assert_eq!(style.inline(), "opacity: 0; width: 0%;");
    }

    #[test]
    fn lerp_mixes_shared_properties() {
        let from = Style::new().y(0.0).scale(1.0).opacity(1.0);
        let to = Style::new().y(-800.0).scale(0.3).opacity(0.0);
        let mid = Style::lerp(&from, &to, 0.5);
        assert_eq!(mid.y, Some(-400.0));
        assert!((mid.scale.unwrap() - 0.65).abs() < 1e-9);
        assert_eq!(mid.opacity, Some(0.5));
    }

    #[test]
    fn padding_snaps_at_end() {
        let from = Style::new().padding("0 20px");
        let to = Style::new().padding("0 20px 20px");
        assert_eq!(Style::lerp(&from, &to, 0.5).padding, Some("0 20px"));
        assert_eq!(Style::lerp(&from, &to, 1.0).padding, Some("0 20px 20px"));
    }
}
