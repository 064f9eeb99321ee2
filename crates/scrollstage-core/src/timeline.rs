//! # Timelines
//!
//! An ordered list of tween steps compiled into per-property tracks and
//! sampled by a single time-driven interpolator.
//!
//! ## Responsibilities
//! - **Sequencing**: `AfterPrevious`, `WithPrevious`, `At`, `Offset` step positions.
//! - **Stagger**: Per-target offsets, reversed when the stagger is negative.
//! - **Sampling**: `sample(time)` is pure; `apply` writes the result to a scene.
//! - **Playback**: `Playback` drives a timeline by wall-clock time in either
//!   direction and reacts to toggle actions.

use crate::animation::EasingType;
use crate::scene::{ElementId, Scene};
use crate::style::{blend, PropValue, Property};
use crate::trigger::ToggleAction;
use std::collections::HashMap;
use tracing::debug;

/// Where a step is inserted relative to the timeline built so far.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StepPosition {
    /// At the current end of the timeline.
    #[default]
    AfterPrevious,
    /// At the start of the previous step.
    WithPrevious,
    /// At an absolute time.
    At(f64),
    /// Relative to the current end (negative overlaps).
    Offset(f64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    #[default]
    Once,
    /// Extra iterations after the first.
    Count(u32),
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenOptions {
    pub duration: f64,
    pub easing: EasingType,
    /// Delay between consecutive targets; negative runs the targets last-first.
    pub stagger: f64,
    pub snap: Option<f32>,
    pub position: StepPosition,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            duration: 0.5,
            easing: EasingType::default(),
            stagger: 0.0,
            snap: None,
            position: StepPosition::AfterPrevious,
        }
    }
}

impl TweenOptions {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            ..Self::default()
        }
    }

    pub fn ease(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn snap(mut self, increment: f32) -> Self {
        self.snap = Some(increment);
        self
    }

    pub fn at(mut self, position: StepPosition) -> Self {
        self.position = position;
        self
    }

    /// Start offset for the `index`-th of `count` targets.
    pub fn stagger_offset(&self, index: usize, count: usize) -> f64 {
        let order = if self.stagger < 0.0 {
            count.saturating_sub(1 + index)
        } else {
            index
        };
        order as f64 * self.stagger.abs()
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Segment {
    start: f64,
    duration: f64,
    from: PropValue,
    to: PropValue,
    easing: EasingType,
    snap: Option<f32>,
}

impl Segment {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn value_at(&self, time: f64) -> PropValue {
        if self.duration <= 0.0 || time >= self.end() {
            return self.to.snapped(self.snap);
        }
        let t = self.easing.eval((time - self.start) / self.duration);
        blend(self.from, self.to, t).snapped(self.snap)
    }
}

#[derive(Clone, Debug)]
struct Track {
    element: ElementId,
    property: Property,
    /// Ordered by start; equal starts keep declaration order.
    segments: Vec<Segment>,
}

impl Track {
    fn insert(&mut self, segment: Segment) {
        let pos = self.segments.partition_point(|s| s.start <= segment.start);
        self.segments.insert(pos, segment);
    }

    fn value_at(&self, time: f64) -> Option<PropValue> {
        let first = self.segments.first()?;
        let active = self.segments.iter().rev().find(|s| s.start <= time);
        Some(match active {
            Some(segment) => segment.value_at(time),
            // Not started yet: hold the first segment's starting value.
            None => first.from.snapped(first.snap),
        })
    }

    fn last_value(&self) -> Option<PropValue> {
        self.segments.last().map(|s| s.to)
    }
}

/// A compiled, immutable timeline.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
    duration: f64,
    repeat: Repeat,
    yoyo: bool,
}

impl Timeline {
    pub fn builder(scene: &Scene) -> TimelineBuilder<'_> {
        TimelineBuilder::new(scene)
    }

    /// Length of one iteration.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Length of all iterations, or `None` when repeating forever.
    pub fn total_duration(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Once => Some(self.duration),
            Repeat::Count(n) => Some(self.duration * (n as f64 + 1.0)),
            Repeat::Infinite => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Every animated element/property pair.
    pub fn targets(&self) -> Vec<(ElementId, Property)> {
        self.tracks.iter().map(|t| (t.element, t.property)).collect()
    }

    /// Maps playhead time onto time within one iteration.
    pub fn local_time(&self, time: f64) -> f64 {
        let d = self.duration;
        if d <= 0.0 {
            return 0.0;
        }
        let time = match self.total_duration() {
            Some(total) => time.clamp(0.0, total),
            None => time.max(0.0),
        };
        if self.repeat == Repeat::Once {
            return time;
        }

        let mut iteration = (time / d).floor();
        let mut local = time - iteration * d;
        if let Some(total) = self.total_duration() {
            if time >= total {
                iteration = (total / d).round() - 1.0;
                local = d;
            }
        }
        if self.yoyo && iteration as u64 % 2 == 1 {
            d - local
        } else {
            local
        }
    }

    /// Values of every track at `time`. Pure.
    pub fn sample(&self, time: f64) -> Vec<(ElementId, Property, PropValue)> {
        let local = self.local_time(time);
        self.tracks
            .iter()
            .filter_map(|t| t.value_at(local).map(|v| (t.element, t.property, v)))
            .collect()
    }

    /// Writes `sample(time)` into `scene`. Destroyed elements are skipped.
    pub fn apply(&self, time: f64, scene: &mut Scene) {
        for (element, property, value) in self.sample(time) {
            if let Some(el) = scene.get_mut(element) {
                el.style.set(property, value);
            }
        }
    }
}

/// Builds a `Timeline`, resolving implicit start values from the scene.
pub struct TimelineBuilder<'a> {
    scene: &'a Scene,
    tracks: Vec<Track>,
    index: HashMap<(ElementId, Property), usize>,
    last_start: f64,
    end: f64,
    repeat: Repeat,
    yoyo: bool,
}

impl<'a> TimelineBuilder<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            tracks: Vec::new(),
            index: HashMap::new(),
            last_start: 0.0,
            end: 0.0,
            repeat: Repeat::Once,
            yoyo: false,
        }
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Animates from the current values to `props`.
    pub fn to(
        self,
        targets: &[ElementId],
        props: &[(Property, PropValue)],
        opts: TweenOptions,
    ) -> Self {
        self.step(targets, props.iter().map(|&(p, v)| (p, None, Some(v))), opts)
    }

    /// Animates from `props` to the current values.
    pub fn from(
        self,
        targets: &[ElementId],
        props: &[(Property, PropValue)],
        opts: TweenOptions,
    ) -> Self {
        self.step(targets, props.iter().map(|&(p, v)| (p, Some(v), None)), opts)
    }

    /// Animates between explicit values. Properties missing from `to` keep
    /// their current value as the destination.
    pub fn from_to(
        self,
        targets: &[ElementId],
        from: &[(Property, PropValue)],
        to: &[(Property, PropValue)],
        opts: TweenOptions,
    ) -> Self {
        let pairs: Vec<_> = from
            .iter()
            .map(|&(p, f)| {
                let t = to.iter().find(|(q, _)| *q == p).map(|&(_, v)| v);
                (p, Some(f), t)
            })
            .collect();
        self.step(targets, pairs.into_iter(), opts)
    }

    fn step(
        mut self,
        targets: &[ElementId],
        props: impl Iterator<Item = (Property, Option<PropValue>, Option<PropValue>)>,
        opts: TweenOptions,
    ) -> Self {
        let targets: Vec<ElementId> = targets
            .iter()
            .copied()
            .filter(|&id| self.scene.get(id).is_some())
            .collect();
        if targets.is_empty() {
            debug!("timeline step has no live targets; skipped");
            return self;
        }
        let props: Vec<_> = props.collect();

        let start = match opts.position {
            StepPosition::AfterPrevious => self.end,
            StepPosition::WithPrevious => self.last_start,
            StepPosition::At(t) => t.max(0.0),
            StepPosition::Offset(d) => (self.end + d).max(0.0),
        };

        let count = targets.len();
        let mut step_end = start;
        for (i, &element) in targets.iter().enumerate() {
            let seg_start = start + opts.stagger_offset(i, count);
            for &(property, from, to) in &props {
                let current = self.current_value(element, property);
                let segment = Segment {
                    start: seg_start,
                    duration: opts.duration,
                    from: from.unwrap_or(current),
                    to: to.unwrap_or(current),
                    easing: opts.easing,
                    snap: opts.snap,
                };
                step_end = step_end.max(segment.end());
                self.track_mut(element, property).insert(segment);
            }
        }

        self.last_start = start;
        self.end = self.end.max(step_end);
        self
    }

    fn current_value(&self, element: ElementId, property: Property) -> PropValue {
        self.index
            .get(&(element, property))
            .and_then(|&i| self.tracks[i].last_value())
            .or_else(|| self.scene.get(element).map(|e| e.style.get(property)))
            .unwrap_or_default()
    }

    fn track_mut(&mut self, element: ElementId, property: Property) -> &mut Track {
        let next = self.tracks.len();
        let i = *self.index.entry((element, property)).or_insert(next);
        if i == next {
            self.tracks.push(Track {
                element,
                property,
                segments: Vec::new(),
            });
        }
        &mut self.tracks[i]
    }

    pub fn build(self) -> Timeline {
        Timeline {
            tracks: self.tracks,
            duration: self.end,
            repeat: self.repeat,
            yoyo: self.yoyo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Wall-clock driver for a timeline.
#[derive(Clone, Debug)]
pub struct Playback {
    timeline: Timeline,
    time: f64,
    direction: Direction,
    paused: bool,
}

impl Playback {
    /// A paused playback at time zero.
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            time: 0.0,
            direction: Direction::Forward,
            paused: true,
        }
    }

    /// Starts playing forward immediately.
    pub fn playing(timeline: Timeline) -> Self {
        let mut playback = Self::new(timeline);
        playback.play();
        playback
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fraction of the full run, `0.0` for endless timelines.
    pub fn progress(&self) -> f64 {
        match self.timeline.total_duration() {
            Some(total) if total > 0.0 => (self.time / total).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.paused = false;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Backward;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn restart(&mut self) {
        self.time = 0.0;
        self.play();
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.direction = Direction::Forward;
        self.paused = true;
    }

    pub fn complete(&mut self) {
        if let Some(total) = self.timeline.total_duration() {
            self.time = total;
        }
        self.paused = true;
    }

    pub fn apply_action(&mut self, action: ToggleAction) {
        match action {
            ToggleAction::Play => self.play(),
            ToggleAction::Pause => self.pause(),
            ToggleAction::Resume => self.resume(),
            ToggleAction::Reverse => self.reverse(),
            ToggleAction::Restart => self.restart(),
            ToggleAction::Reset => self.reset(),
            ToggleAction::Complete => self.complete(),
            ToggleAction::None => {}
        }
    }

    /// Advances the playhead; stops at either end. Returns `true` if it moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.paused || dt <= 0.0 {
            return false;
        }
        let before = self.time;
        let end = self.timeline.total_duration().unwrap_or(f64::INFINITY);
        self.time = match self.direction {
            Direction::Forward => (self.time + dt).min(end),
            Direction::Backward => (self.time - dt).max(0.0),
        };
        let at_rest = match self.direction {
            Direction::Forward => self.time >= end,
            Direction::Backward => self.time <= 0.0,
        };
        if at_rest {
            self.paused = true;
        }
        self.time != before
    }

    pub fn render(&self, scene: &mut Scene) {
        self.timeline.apply(self.time, scene);
    }
}
