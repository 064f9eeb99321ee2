//! Animatable element properties.

use crate::color::Color;
use crate::errors::{Result, StageError};
use keyframe::CanTween;
use serde::Serialize;
use std::str::FromStr;

/// A length resolved against the current viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    Px(f64),
    Vh(f64),
    Vw(f64),
}

impl Length {
    pub fn resolve(&self, viewport: &Viewport) -> f64 {
        match *self {
            Length::Px(px) => px,
            Length::Vh(n) => viewport.height * n / 100.0,
            Length::Vw(n) => viewport.width * n / 100.0,
        }
    }

    /// Full viewport height.
    pub const fn screen() -> Self {
        Length::Vh(100.0)
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

impl FromStr for Length {
    type Err = StageError;

    /// Accepts `120`, `120px`, `50vh`, `-100vw`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || StageError::InvalidLength(s.to_string());
        let (number, ctor): (&str, fn(f64) -> Length) = if let Some(n) = s.strip_suffix("vh") {
            (n, Length::Vh)
        } else if let Some(n) = s.strip_suffix("vw") {
            (n, Length::Vw)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Length::Px)
        } else {
            (s, Length::Px)
        };
        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(ctor(value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1440.0, 900.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    X,
    Y,
    YPercent,
    Scale,
    BackgroundColor,
    /// Numeric content shown as text (counters).
    TextValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f32),
    Color(Color),
}

impl PropValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PropValue::Number(n) => Some(*n),
            PropValue::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropValue::Color(c) => Some(*c),
            PropValue::Number(_) => None,
        }
    }

    /// Rounds numbers to the nearest multiple of `increment`.
    pub fn snapped(self, increment: Option<f32>) -> Self {
        match (self, increment) {
            (PropValue::Number(n), Some(inc)) if inc > 0.0 => {
                PropValue::Number((n / inc).round() * inc)
            }
            _ => self,
        }
    }
}

impl Default for PropValue {
    fn default() -> Self {
        PropValue::Number(0.0)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Number(value)
    }
}

impl From<Color> for PropValue {
    fn from(value: Color) -> Self {
        PropValue::Color(value)
    }
}

impl CanTween for PropValue {
    fn ease(from: Self, to: Self, time: impl keyframe::num_traits::Float) -> Self {
        let t = time.to_f32().unwrap_or(0.0);
        match (from, to) {
            (PropValue::Number(a), PropValue::Number(b)) => PropValue::Number(a + (b - a) * t),
            (PropValue::Color(a), PropValue::Color(b)) => PropValue::Color(a.lerp(&b, t)),
            // Mismatched kinds cannot blend; hold until the segment completes.
            (a, b) => {
                if t >= 1.0 {
                    b
                } else {
                    a
                }
            }
        }
    }
}

/// Interpolates two values at eased progress `t`.
pub fn blend(from: PropValue, to: PropValue, t: f64) -> PropValue {
    PropValue::ease(from, to, t)
}

/// Visual state of one element.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Style {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub y_percent: f32,
    pub scale: f32,
    pub background: Option<Color>,
    pub text_value: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            background: None,
            text_value: 0.0,
        }
    }
}

impl Style {
    pub fn get(&self, property: Property) -> PropValue {
        match property {
            Property::Opacity => self.opacity.into(),
            Property::X => self.x.into(),
            Property::Y => self.y.into(),
            Property::YPercent => self.y_percent.into(),
            Property::Scale => self.scale.into(),
            Property::BackgroundColor => self.background.unwrap_or_default().into(),
            Property::TextValue => self.text_value.into(),
        }
    }

    /// Writes `value` if its kind matches `property`; mismatches are ignored.
    pub fn set(&mut self, property: Property, value: PropValue) {
        match (property, value) {
            (Property::Opacity, PropValue::Number(n)) => self.opacity = n.clamp(0.0, 1.0),
            (Property::X, PropValue::Number(n)) => self.x = n,
            (Property::Y, PropValue::Number(n)) => self.y = n,
            (Property::YPercent, PropValue::Number(n)) => self.y_percent = n,
            (Property::Scale, PropValue::Number(n)) => self.scale = n,
            (Property::BackgroundColor, PropValue::Color(c)) => self.background = Some(c),
            (Property::TextValue, PropValue::Number(n)) => self.text_value = n,
            (property, value) => {
                tracing::debug!(?property, ?value, "ignoring value of the wrong kind");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_resolve_against_viewport() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!("50vh".parse::<Length>().unwrap().resolve(&vp), 400.0);
        assert_eq!("-100vw".parse::<Length>().unwrap().resolve(&vp), -1000.0);
        assert_eq!("12px".parse::<Length>().unwrap().resolve(&vp), 12.0);
        assert_eq!("7".parse::<Length>().unwrap().resolve(&vp), 7.0);
        assert!("abc".parse::<Length>().is_err());
    }

    #[test]
    fn snapping_rounds_to_increment() {
        assert_eq!(PropValue::Number(2.6).snapped(Some(1.0)), PropValue::Number(3.0));
        assert_eq!(PropValue::Number(2.6).snapped(None), PropValue::Number(2.6));
    }

    #[test]
    fn opacity_is_clamped() {
        let mut style = Style::default();
        style.set(Property::Opacity, PropValue::Number(1.5));
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn wrong_kind_is_ignored() {
        let mut style = Style::default();
        style.set(Property::Opacity, PropValue::Color(Color::rgb(1, 2, 3)));
        assert_eq!(style.opacity, 1.0);
    }
}
