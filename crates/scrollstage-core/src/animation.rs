//! # Easing and Keyframe Tracks
//!
//! `EasingType` maps the engine's named curves onto `keyframe` functions and
//! `Animated<T>` wraps a `keyframe::AnimationSequence` for runtime tweens.

use crate::errors::{Result, StageError};
use keyframe::{AnimationSequence, CanTween, EasingFunction, Keyframe};
use std::fmt;
use std::str::FromStr;

/// Easing curves understood by timelines and tweens.
///
/// The `PowerN` families follow the usual web animation naming:
/// power1 = quadratic, power2 = cubic, power3 = quartic, power4 = quintic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    Power4In,
    Power4Out,
    Power4InOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        use keyframe::functions::*;
        match self {
            EasingType::Linear => Linear.y(x),
            EasingType::EaseIn => EaseIn.y(x),
            EasingType::EaseOut => EaseOut.y(x),
            EasingType::EaseInOut => EaseInOut.y(x),
            EasingType::Power1In => EaseInQuad.y(x),
            EasingType::Power1Out => EaseOutQuad.y(x),
            EasingType::Power1InOut => EaseInOutQuad.y(x),
            EasingType::Power2In => EaseInCubic.y(x),
            EasingType::Power2Out => EaseOutCubic.y(x),
            EasingType::Power2InOut => EaseInOutCubic.y(x),
            EasingType::Power3In => EaseInQuart.y(x),
            EasingType::Power3Out => EaseOutQuart.y(x),
            EasingType::Power3InOut => EaseInOutQuart.y(x),
            EasingType::Power4In => EaseInQuint.y(x),
            EasingType::Power4Out => EaseOutQuint.y(x),
            EasingType::Power4InOut => EaseInOutQuint.y(x),
        }
    }
}

impl EasingType {
    /// Evaluates the curve, clamping the input to `[0, 1]`.
    pub fn eval(&self, x: f64) -> f64 {
        self.y(x.clamp(0.0, 1.0))
    }
}

impl FromStr for EasingType {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self> {
        let easing = match s.trim() {
            "none" | "linear" => EasingType::Linear,
            "ease-in" => EasingType::EaseIn,
            "ease-out" => EasingType::EaseOut,
            "ease-in-out" => EasingType::EaseInOut,
            "power1.in" => EasingType::Power1In,
            "power1" | "power1.out" => EasingType::Power1Out,
            "power1.inOut" => EasingType::Power1InOut,
            "power2.in" => EasingType::Power2In,
            "power2" | "power2.out" => EasingType::Power2Out,
            "power2.inOut" => EasingType::Power2InOut,
            "power3.in" => EasingType::Power3In,
            "power3" | "power3.out" => EasingType::Power3Out,
            "power3.inOut" => EasingType::Power3InOut,
            "power4.in" => EasingType::Power4In,
            "power4" | "power4.out" => EasingType::Power4Out,
            "power4.inOut" => EasingType::Power4InOut,
            other => return Err(StageError::UnknownEasing(other.to_string())),
        };
        Ok(easing)
    }
}

/// A single eased segment held in a keyframe sequence.
///
/// Every keyframe carries the same easing, so the active segment is eased
/// identically whichever end of it `keyframe` reads the function from.
#[derive(Clone)]
pub struct Animated<T>
where
    T: Clone + CanTween + Default,
{
    sequence: AnimationSequence<T>,
    pub current_value: T,
}

impl<T> Animated<T>
where
    T: Clone + CanTween + Default,
{
    /// Holds `value` forever.
    pub fn constant(value: T) -> Self {
        let kf = Keyframe::new(value.clone(), 0.0, EasingType::Linear);
        Self {
            sequence: AnimationSequence::from(vec![kf]),
            current_value: value,
        }
    }

    /// Interpolates `from -> to` over `duration` seconds.
    pub fn segment(from: T, to: T, duration: f64, easing: EasingType) -> Self {
        if duration <= 0.0 {
            return Self::constant(to);
        }
        let frames = vec![
            Keyframe::new(from.clone(), 0.0, easing),
            Keyframe::new(to, duration, easing),
        ];
        Self {
            sequence: AnimationSequence::from(frames),
            current_value: from,
        }
    }

    pub fn duration(&self) -> f64 {
        self.sequence.duration()
    }

    pub fn update(&mut self, time: f64) {
        self.sequence.advance_to(time.clamp(0.0, self.duration()));
        self.current_value = self.sequence.now();
    }
}

impl<T> fmt::Debug for Animated<T>
where
    T: Clone + CanTween + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animated")
            .field("current_value", &self.current_value)
            .field("duration", &self.duration())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gsap_style_names() {
        assert_eq!("power4.out".parse::<EasingType>().unwrap(), EasingType::Power4Out);
        assert_eq!("power1.inOut".parse::<EasingType>().unwrap(), EasingType::Power1InOut);
        assert_eq!("none".parse::<EasingType>().unwrap(), EasingType::Linear);
        assert!("bounce".parse::<EasingType>().is_err());
    }

    #[test]
    fn curves_hit_their_endpoints() {
        for easing in [
            EasingType::Linear,
            EasingType::Power1InOut,
            EasingType::Power2Out,
            EasingType::Power4Out,
        ] {
            assert!(easing.eval(0.0).abs() < 1e-9, "{easing:?} at 0");
            assert!((easing.eval(1.0) - 1.0).abs() < 1e-9, "{easing:?} at 1");
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        assert!(EasingType::Power4Out.eval(0.25) > EasingType::Linear.eval(0.25));
        assert!(EasingType::Power2In.eval(0.25) < EasingType::Linear.eval(0.25));
    }

    #[test]
    fn segment_interpolates_and_clamps() {
        let mut anim = Animated::segment(0.0f32, 10.0f32, 2.0, EasingType::Linear);
        anim.update(1.0);
        assert!((anim.current_value - 5.0).abs() < 1e-4);
        anim.update(5.0);
        assert!((anim.current_value - 10.0).abs() < 1e-4);
        anim.update(-1.0);
        assert!(anim.current_value.abs() < 1e-4);
    }

    #[test]
    fn zero_duration_segment_is_the_target() {
        let mut anim = Animated::segment(0.0f32, 3.0f32, 0.0, EasingType::Linear);
        anim.update(0.0);
        assert_eq!(anim.current_value, 3.0);
    }
}
