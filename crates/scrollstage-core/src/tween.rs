//! # Runtime Tweens
//!
//! Fire-and-forget tweens started by trigger callbacks. Unlike a `Timeline`,
//! a tween captures the element's value at the moment it starts, so a
//! reversal mid-flight continues from wherever the element is.

use crate::animation::Animated;
use crate::scene::{ElementId, Scene};
use crate::style::{PropValue, Property};
use crate::timeline::TweenOptions;
use tracing::trace;

#[derive(Clone, Debug)]
pub struct Tween {
    pub element: ElementId,
    pub property: Property,
    to: PropValue,
    delay: f64,
    elapsed: f64,
    snap: Option<f32>,
    track: Animated<PropValue>,
}

impl Tween {
    pub fn new(
        element: ElementId,
        property: Property,
        from: PropValue,
        to: PropValue,
        delay: f64,
        opts: &TweenOptions,
    ) -> Self {
        Self {
            element,
            property,
            to,
            delay: delay.max(0.0),
            elapsed: 0.0,
            snap: opts.snap,
            track: Animated::segment(from, to, opts.duration, opts.easing),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.track.duration()
    }

    /// Advances by `dt` and returns the (snapped) value to display.
    pub fn advance(&mut self, dt: f64) -> PropValue {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            return self.to.snapped(self.snap);
        }
        self.track.update(self.elapsed - self.delay);
        self.track.current_value.snapped(self.snap)
    }
}

/// The set of in-flight tweens owned by one component.
#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    tweens: Vec<Tween>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tweens from the current values of `targets` to `props`.
    ///
    /// In-flight tweens on the same element and property are replaced.
    /// Missing elements are skipped.
    pub fn to(
        &mut self,
        scene: &Scene,
        targets: &[ElementId],
        props: &[(Property, PropValue)],
        opts: TweenOptions,
    ) -> usize {
        let live: Vec<ElementId> = targets
            .iter()
            .copied()
            .filter(|&id| scene.get(id).is_some())
            .collect();
        let count = live.len();
        let mut started = 0;
        for (i, &element) in live.iter().enumerate() {
            let Some(el) = scene.get(element) else {
                continue;
            };
            let delay = opts.stagger_offset(i, count);
            for &(property, to) in props {
                self.tweens
                    .retain(|t| !(t.element == element && t.property == property));
                let from = el.style.get(property);
                self.tweens.push(Tween::new(element, property, from, to, delay, &opts));
                started += 1;
            }
        }
        trace!(started, "started tweens");
        started
    }

    /// Advances every tween and writes its value; finished tweens are dropped.
    pub fn tick(&mut self, dt: f64, scene: &mut Scene) {
        for tween in &mut self.tweens {
            let value = tween.advance(dt);
            if let Some(el) = scene.get_mut(tween.element) {
                el.style.set(tween.property, value);
            }
        }
        self.tweens.retain(|t| !t.is_finished());
    }

    pub fn kill_all(&mut self) {
        self.tweens.clear();
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
