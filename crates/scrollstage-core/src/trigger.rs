//! # Scroll Triggers
//!
//! Maps the document scroll offset onto per-binding progress values and
//! discrete crossing events.
//!
//! ## Responsibilities
//! - **Positions**: Parses `"top 80%"`, `"top+=50vh top"`, `"+=300vh"`.
//! - **Bounds**: Resolves positions against element layout and viewport.
//! - **Phases/Events**: Before/Active/After phases and the four crossing events.
//! - **Service**: `TriggerService`, the capability object orchestrators receive
//!   instead of registering with process-wide state.
//!
//! Progress is a pure function of the offset:
//! `clamp((offset - start) / (end - start), 0, 1)`.

use crate::errors::{Result, StageError};
use crate::scene::{ElementId, Rect, Scene};
use crate::style::{Length, Viewport};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Pure progress mapping. A degenerate range acts as a step at `start`.
pub fn scroll_progress(offset: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if offset >= start { 1.0 } else { 0.0 };
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}

/// One side of a position: an anchor within a box plus a length offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub anchor: Anchor,
    pub offset: Length,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Fraction of the box extent: top = 0, center = 0.5, bottom = 1.
    Fraction(f64),
    Pixels(f64),
}

impl Edge {
    pub const fn top() -> Self {
        Self {
            anchor: Anchor::Fraction(0.0),
            offset: Length::Px(0.0),
        }
    }

    pub const fn center() -> Self {
        Self::fraction(0.5)
    }

    pub const fn bottom() -> Self {
        Self::fraction(1.0)
    }

    /// `fraction` of the box extent, so `0.8` is `80%`.
    pub const fn fraction(fraction: f64) -> Self {
        Self {
            anchor: Anchor::Fraction(fraction),
            offset: Length::Px(0.0),
        }
    }

    pub fn with_offset(mut self, offset: Length) -> Self {
        self.offset = offset;
        self
    }

    /// Distance from the top of a box of height `extent`.
    pub fn resolve(&self, extent: f64, viewport: &Viewport) -> f64 {
        let base = match self.anchor {
            Anchor::Fraction(f) => extent * f,
            Anchor::Pixels(px) => px,
        };
        base + self.offset.resolve(viewport)
    }
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(token: &str) -> std::result::Result<Self, String> {
        let (head, offset) = match token.find("+=").or_else(|| token.find("-=")) {
            Some(i) => {
                let sign = if &token[i..i + 1] == "-" { -1.0 } else { 1.0 };
                let length: Length = token[i + 2..]
                    .parse()
                    .map_err(|_| format!("bad offset in `{token}`"))?;
                (&token[..i], scale(length, sign))
            }
            None => (token, Length::Px(0.0)),
        };

        let anchor = match head {
            "top" => Anchor::Fraction(0.0),
            "center" => Anchor::Fraction(0.5),
            "bottom" => Anchor::Fraction(1.0),
            other => {
                if let Some(pct) = other.strip_suffix('%') {
                    let pct: f64 = pct.parse().map_err(|_| format!("bad percentage `{other}`"))?;
                    Anchor::Fraction(pct / 100.0)
                } else {
                    let px: f64 = other
                        .trim_end_matches("px")
                        .parse()
                        .map_err(|_| format!("unknown edge `{other}`"))?;
                    Anchor::Pixels(px)
                }
            }
        };
        Ok(Edge { anchor, offset })
    }
}

fn scale(length: Length, factor: f64) -> Length {
    match length {
        Length::Px(v) => Length::Px(v * factor),
        Length::Vh(v) => Length::Vh(v * factor),
        Length::Vw(v) => Length::Vw(v * factor),
    }
}

/// Where a trigger starts or ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPosition {
    /// The scroll offset at which `element` edge meets `viewport` edge.
    Anchored { element: Edge, viewport: Edge },
    /// Relative to the resolved start (only meaningful for ends).
    Relative(Length),
}

impl TriggerPosition {
    pub fn anchored(element: Edge, viewport: Edge) -> Self {
        TriggerPosition::Anchored { element, viewport }
    }

    /// Absolute offset for a trigger element occupying `rect`.
    pub fn resolve(&self, rect: Rect, viewport: &Viewport, start: Option<f64>) -> f64 {
        match self {
            TriggerPosition::Anchored { element, viewport: vp_edge } => {
                rect.top + element.resolve(rect.height, viewport)
                    - vp_edge.resolve(viewport.height, viewport)
            }
            TriggerPosition::Relative(len) => {
                start.unwrap_or(rect.top) + len.resolve(viewport)
            }
        }
    }
}

impl FromStr for TriggerPosition {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let invalid = |reason: String| StageError::InvalidPosition {
            input: input.to_string(),
            reason,
        };

        for (prefix, sign) in [("+=", 1.0), ("-=", -1.0)] {
            if let Some(rest) = input.strip_prefix(prefix) {
                let length: Length = rest.parse().map_err(|e: StageError| invalid(e.to_string()))?;
                return Ok(TriggerPosition::Relative(scale(length, sign)));
            }
        }

        let tokens: Vec<&str> = input.split_whitespace().collect();
        match tokens.as_slice() {
            [element] => Ok(TriggerPosition::Anchored {
                element: element.parse().map_err(invalid)?,
                viewport: Edge::top(),
            }),
            [element, viewport] => Ok(TriggerPosition::Anchored {
                element: element.parse().map_err(invalid)?,
                viewport: viewport.parse().map_err(invalid)?,
            }),
            _ => Err(invalid("expected `<element> <viewport>` or `+=<length>`".into())),
        }
    }
}

/// Resolved `[start, end]` scroll range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerBounds {
    pub start: f64,
    pub end: f64,
}

impl TriggerBounds {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if end <= start {
            return Err(StageError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn progress(&self, offset: f64) -> f64 {
        scroll_progress(offset, self.start, self.end)
    }

    pub fn phase(&self, offset: f64) -> Phase {
        if offset < self.start {
            Phase::Before
        } else if offset > self.end {
            Phase::After
        } else {
            Phase::Active
        }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Events produced by moving from `prev` to `next`, in crossing order.
pub fn crossing_events(prev: Phase, next: Phase) -> Vec<TriggerEvent> {
    use Phase::*;
    use TriggerEvent::*;
    match (prev, next) {
        (Before, Active) => vec![Enter],
        (Before, After) => vec![Enter, Leave],
        (Active, After) => vec![Leave],
        (Active, Before) => vec![LeaveBack],
        (After, Active) => vec![EnterBack],
        (After, Before) => vec![EnterBack, LeaveBack],
        _ => Vec::new(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    #[default]
    None,
}

impl FromStr for ToggleAction {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Ok(match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return Err(()),
        })
    }
}

/// Actions for enter, leave, enter-back, leave-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    pub fn action_for(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || StageError::InvalidToggleActions(s.to_string());
        let actions = s
            .split_whitespace()
            .map(|t| t.parse::<ToggleAction>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;
        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Smooths visual progress toward the scroll progress over `lag` seconds.
///
/// With no lag the visual progress is the scroll progress. With lag it
/// converges on it and settles exactly, so rest states never drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrub {
    lag: Option<f64>,
    target: f64,
    current: f64,
}

const SCRUB_SETTLE_EPSILON: f64 = 1e-4;

impl Scrub {
    pub fn new(lag: Option<f64>) -> Self {
        Self {
            lag: lag.filter(|l| *l > 0.0),
            target: 0.0,
            current: 0.0,
        }
    }

    /// Sets the scroll progress; returns `true` when the visual value moved.
    pub fn seek(&mut self, progress: f64) -> bool {
        self.target = progress;
        if self.lag.is_none() {
            let moved = self.current != progress;
            self.current = progress;
            return moved;
        }
        false
    }

    /// Advances smoothing; returns `true` when the visual value moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(lag) = self.lag else {
            return false;
        };
        if self.current == self.target {
            return false;
        }
        let alpha = 1.0 - (-dt * 4.0 / lag).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < SCRUB_SETTLE_EPSILON {
            self.current = self.target;
        }
        true
    }

    /// Jumps straight to the target.
    pub fn settle(&mut self) {
        self.current = self.target;
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

/// How a binding consumes its range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerMode {
    /// Continuous progress reported on every change.
    Scrub,
    /// Events reported only when a boundary is crossed.
    Events,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(pub u64);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

/// Opaque owner tag, normally the mounting component's id.
pub type OwnerId = u64;

#[derive(Clone, Debug)]
pub struct TriggerSpec {
    pub element: ElementId,
    pub start: TriggerPosition,
    pub end: TriggerPosition,
    pub mode: TriggerMode,
    pub pin: bool,
    /// Progress increment to snap to when scrolling stops.
    pub snap: Option<f64>,
}

impl TriggerSpec {
    pub fn new(element: ElementId, start: TriggerPosition, end: TriggerPosition) -> Self {
        Self {
            element,
            start,
            end,
            mode: TriggerMode::Events,
            pin: false,
            snap: None,
        }
    }

    pub fn scrub(mut self) -> Self {
        self.mode = TriggerMode::Scrub;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pin = true;
        self
    }

    pub fn snap(mut self, increment: f64) -> Self {
        self.snap = (increment.is_finite() && increment > 0.0).then_some(increment);
        self
    }
}

#[derive(Clone, Debug)]
struct Binding {
    id: TriggerId,
    owner: OwnerId,
    spec: TriggerSpec,
    bounds: Option<TriggerBounds>,
    phase: Phase,
    last_progress: Option<f64>,
}

/// A change observed by `TriggerService::update`.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerUpdate {
    pub id: TriggerId,
    pub owner: OwnerId,
    pub element: ElementId,
    pub progress: f64,
    pub events: Vec<TriggerEvent>,
}

/// Registry of live scroll bindings.
#[derive(Debug, Default)]
pub struct TriggerService {
    bindings: Vec<Binding>,
    next_id: u64,
}

impl TriggerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding. Bounds are resolved on the next `refresh`.
    pub fn register(&mut self, owner: OwnerId, spec: TriggerSpec) -> TriggerId {
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        debug!(%id, owner, element = spec.element, pin = spec.pin, "registered scroll trigger");
        self.bindings.push(Binding {
            id,
            owner,
            spec,
            bounds: None,
            phase: Phase::Before,
            last_progress: None,
        });
        id
    }

    pub fn kill(&mut self, id: TriggerId, scene: &mut Scene) {
        if let Some(pos) = self.bindings.iter().position(|b| b.id == id) {
            let binding = self.bindings.remove(pos);
            release_pin(&binding, scene);
        }
    }

    /// Removes every binding registered by `owner`; returns how many.
    pub fn kill_owned(&mut self, owner: OwnerId, scene: &mut Scene) -> usize {
        let (killed, kept): (Vec<Binding>, Vec<Binding>) =
            self.bindings.drain(..).partition(|b| b.owner == owner);
        self.bindings = kept;
        for binding in &killed {
            release_pin(binding, scene);
        }
        if !killed.is_empty() {
            debug!(owner, count = killed.len(), "killed scroll triggers");
        }
        killed.len()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bounds(&self, id: TriggerId) -> Option<TriggerBounds> {
        self.bindings.iter().find(|b| b.id == id).and_then(|b| b.bounds)
    }

    /// Resolves every binding against the current layout and re-applies pin
    /// spacing, repeating until the layout settles.
    pub fn refresh(&mut self, scene: &mut Scene, viewport: &Viewport) {
        // Each pass can only move elements that sit after a pinned one.
        for _ in 0..=self.bindings.len() {
            scene.layout(viewport);
            let mut changed = false;
            for binding in &mut self.bindings {
                binding.bounds = resolve_bounds(&binding.spec, scene, viewport);
                if binding.spec.pin {
                    let spacing = binding.bounds.map(|b| b.len()).unwrap_or(0.0);
                    if let Some(el) = scene.get_mut(binding.spec.element) {
                        if el.pin_spacing != spacing {
                            el.pin_spacing = spacing;
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        trace!(bindings = self.bindings.len(), "refreshed scroll triggers");
    }

    /// Evaluates all bindings at `offset`.
    ///
    /// Scrub bindings report whenever progress changes; event bindings report
    /// only when a boundary is crossed. Pinned elements get their translate.
    pub fn update(&mut self, offset: f64, scene: &mut Scene) -> Vec<TriggerUpdate> {
        let mut updates = Vec::new();
        for binding in &mut self.bindings {
            let Some(bounds) = binding.bounds else {
                continue;
            };
            let phase = bounds.phase(offset);
            let progress = bounds.progress(offset);
            let events = crossing_events(binding.phase, phase);
            binding.phase = phase;

            if binding.spec.pin {
                if let Some(el) = scene.get_mut(binding.spec.element) {
                    el.pin_translate = (offset - bounds.start).clamp(0.0, bounds.len());
                }
            }

            let progress_changed = binding.last_progress != Some(progress);
            binding.last_progress = Some(progress);
            let report = match binding.spec.mode {
                TriggerMode::Scrub => progress_changed || !events.is_empty(),
                TriggerMode::Events => !events.is_empty(),
            };
            if report {
                if !events.is_empty() {
                    debug!(id = %binding.id, ?events, offset, "trigger crossed");
                }
                updates.push(TriggerUpdate {
                    id: binding.id,
                    owner: binding.owner,
                    element: binding.spec.element,
                    progress,
                    events,
                });
            }
        }
        updates
    }

    /// Scroll offset the binding would settle on from `offset`, if it snaps
    /// and `offset` lies inside its range.
    pub fn snap_offset(&self, id: TriggerId, offset: f64) -> Option<f64> {
        let binding = self.bindings.iter().find(|b| b.id == id)?;
        let increment = binding.spec.snap?;
        let bounds = binding.bounds?;
        if bounds.phase(offset) != Phase::Active {
            return None;
        }
        let snapped = snap_progress(bounds.progress(offset), increment);
        Some(bounds.start + snapped * bounds.len())
    }
}

/// Rounds `progress` to the nearest multiple of `increment` within `[0, 1]`.
pub fn snap_progress(progress: f64, increment: f64) -> f64 {
    if increment.is_nan() || increment <= 0.0 {
        return progress;
    }
    ((progress / increment).round() * increment).clamp(0.0, 1.0)
}

fn resolve_bounds(spec: &TriggerSpec, scene: &Scene, viewport: &Viewport) -> Option<TriggerBounds> {
    let Some(rect) = scene.rect(spec.element) else {
        debug!(element = spec.element, "trigger element missing; binding stays inert");
        return None;
    };
    let start = spec.start.resolve(rect, viewport, None);
    let end = spec.end.resolve(rect, viewport, Some(start));
    match TriggerBounds::new(start, end) {
        Ok(bounds) => Some(bounds),
        Err(err) => {
            debug!(element = spec.element, %err, "trigger range is empty; binding stays inert");
            None
        }
    }
}

fn release_pin(binding: &Binding, scene: &mut Scene) {
    if binding.spec.pin {
        if let Some(el) = scene.get_mut(binding.spec.element) {
            el.pin_spacing = 0.0;
            el.pin_translate = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Element;

    fn vp() -> Viewport {
        Viewport::new(1000.0, 800.0)
    }

    #[test]
    fn progress_is_clamped_and_linear() {
        assert_eq!(scroll_progress(-10.0, 0.0, 100.0), 0.0);
        assert_eq!(scroll_progress(25.0, 0.0, 100.0), 0.25);
        assert_eq!(scroll_progress(500.0, 0.0, 100.0), 1.0);
        assert_eq!(scroll_progress(5.0, 10.0, 10.0), 0.0);
        assert_eq!(scroll_progress(10.0, 10.0, 10.0), 1.0);
    }

    #[test]
    fn parses_keyword_and_percentage_positions() {
        let rect = Rect { top: 2000.0, height: 400.0 };
        let pos: TriggerPosition = "top 80%".parse().unwrap();
        assert_eq!(pos.resolve(rect, &vp(), None), 2000.0 - 640.0);

        let pos: TriggerPosition = "bottom center".parse().unwrap();
        assert_eq!(pos.resolve(rect, &vp(), None), 2400.0 - 400.0);

        let pos: TriggerPosition = "top top".parse().unwrap();
        assert_eq!(pos.resolve(rect, &vp(), None), 2000.0);
    }

    #[test]
    fn parses_offsets_and_relative_ends() {
        let rect = Rect { top: 800.0, height: 800.0 };
        let pos: TriggerPosition = "top+=200vh top".parse().unwrap();
        assert_eq!(pos.resolve(rect, &vp(), None), 800.0 + 1600.0);

        let pos: TriggerPosition = "top-=100 top".parse().unwrap();
        assert_eq!(pos.resolve(rect, &vp(), None), 700.0);

        let end: TriggerPosition = "+=300vh".parse().unwrap();
        assert_eq!(end.resolve(rect, &vp(), Some(800.0)), 800.0 + 2400.0);
    }

    #[test]
    fn rejects_malformed_positions() {
        assert!("".parse::<TriggerPosition>().is_err());
        assert!("top sideways".parse::<TriggerPosition>().is_err());
        assert!("a b c".parse::<TriggerPosition>().is_err());
        assert!("+=lots".parse::<TriggerPosition>().is_err());
    }

    #[test]
    fn toggle_actions_parse() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(actions.on_enter, ToggleAction::Play);
        assert_eq!(actions.on_leave_back, ToggleAction::Reverse);
        assert!("play none".parse::<ToggleActions>().is_err());
        assert!("play none none dance".parse::<ToggleActions>().is_err());
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(TriggerBounds::new(10.0, 10.0).is_err());
        assert!(TriggerBounds::new(10.0, 5.0).is_err());
    }

    #[test]
    fn jumps_produce_paired_events() {
        assert_eq!(
            crossing_events(Phase::Before, Phase::After),
            vec![TriggerEvent::Enter, TriggerEvent::Leave]
        );
        assert_eq!(
            crossing_events(Phase::After, Phase::Before),
            vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
        );
        assert!(crossing_events(Phase::Active, Phase::Active).is_empty());
    }

    #[test]
    fn snap_rounds_to_nearest_point() {
        assert_eq!(snap_progress(0.2, 1.0 / 3.0), 1.0 / 3.0);
        assert_eq!(snap_progress(0.1, 1.0 / 3.0), 0.0);
        assert_eq!(snap_progress(0.97, 1.0 / 3.0), 1.0);
    }

    #[test]
    fn scrub_lag_converges_exactly() {
        let mut scrub = Scrub::new(Some(1.0));
        assert!(!scrub.seek(1.0));
        assert_eq!(scrub.current(), 0.0);
        for _ in 0..600 {
            scrub.tick(1.0 / 60.0);
        }
        assert_eq!(scrub.current(), 1.0);

        let mut immediate = Scrub::new(None);
        assert!(immediate.seek(0.5));
        assert_eq!(immediate.current(), 0.5);
    }

    #[test]
    fn service_reports_scrub_progress_and_events() {
        let mut scene = Scene::new();
        let el = scene.add_element(Element::new("div").with_height(Length::Px(100.0)));
        let mut service = TriggerService::new();
        let scrub = service.register(
            1,
            TriggerSpec::new(el, "top top".parse().unwrap(), "+=400".parse().unwrap()).scrub(),
        );
        let events = service.register(
            1,
            TriggerSpec::new(el, "top top".parse().unwrap(), "+=400".parse().unwrap()),
        );
        service.refresh(&mut scene, &vp());

        let updates = service.update(200.0, &mut scene);
        let scrub_update = updates.iter().find(|u| u.id == scrub).unwrap();
        assert_eq!(scrub_update.progress, 0.5);
        let event_update = updates.iter().find(|u| u.id == events).unwrap();
        assert_eq!(event_update.events, vec![TriggerEvent::Enter]);

        let updates = service.update(250.0, &mut scene);
        assert_eq!(updates.len(), 1, "event bindings stay quiet without crossings");

        assert_eq!(service.kill_owned(1, &mut scene), 2);
        assert!(service.update(0.0, &mut scene).is_empty());
    }

    #[test]
    fn pin_reserves_spacing_until_killed() {
        let mut scene = Scene::new();
        let page = scene.add_element(Element::new("main"));
        let pinned = scene.append(page, Element::new("section").with_height(Length::screen()));
        let after = scene.append(page, Element::new("section").with_height(Length::screen()));
        let mut service = TriggerService::new();
        let id = service.register(
            7,
            TriggerSpec::new(pinned, "top top".parse().unwrap(), "+=200vh".parse().unwrap())
                .scrub()
                .pinned(),
        );
        service.refresh(&mut scene, &vp());
        assert_eq!(scene.rect(after).unwrap().top, 800.0 + 1600.0);

        service.update(500.0, &mut scene);
        assert_eq!(scene.get(pinned).unwrap().pin_translate, 500.0);

        service.kill(id, &mut scene);
        scene.layout(&vp());
        assert_eq!(scene.rect(after).unwrap().top, 800.0);
        assert_eq!(scene.get(pinned).unwrap().pin_translate, 0.0);
    }
}
