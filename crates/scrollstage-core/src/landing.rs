//! # Landing Page
//!
//! Independent entrance animations gated by visibility:
//!
//! - **Hero**: a timeline toggled by crossing the hero text trigger
//!   (`play none none reverse` by default).
//! - **Services**: cards batched per trigger event and tweened in or out
//!   with a stagger whose direction follows the scroll direction.
//! - **Counters**: integers tweened up to their `data-target` on enter and
//!   back to zero on leave-back, always displayed as whole numbers.
//! - **Floaters**: an endless yoyo independent of scrolling.

use crate::animation::EasingType;
use crate::context::AnimationContext;
use crate::scene::{Element, ElementId, Scene};
use crate::stage::{Orchestrator, StageContext};
use crate::style::{Length, PropValue, Property};
use crate::timeline::{Playback, Repeat, StepPosition, Timeline, TweenOptions};
use crate::trigger::{
    Edge, ToggleAction, ToggleActions, TriggerEvent, TriggerId, TriggerPosition, TriggerSpec,
    TriggerUpdate,
};
use crate::tween::TweenSet;
use tracing::{debug, info, warn};

/// Seconds a service batch waits for more cards to cross in the same direction.
const BATCH_INTERVAL: f64 = 0.1;

/// Largest counter target an `f32` text value holds exactly.
const MAX_COUNTER_TARGET: u32 = 1 << 24;

/// Turns an animated counter value into display text.
pub trait CounterFormat {
    fn format(&self, value: f32) -> String;
}

/// Plain whole numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerText;

impl CounterFormat for IntegerText {
    fn format(&self, value: f32) -> String {
        format!("{}", value.round() as i64)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceSpec {
    pub icon: String,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatSpec {
    /// Raw `data-target` attribute; non-integers and values above 2^24 leave
    /// the counter static.
    pub target: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandingContent {
    pub word_left: String,
    pub word_right: String,
    pub subtitle: String,
    pub cta: String,
    pub services: Vec<ServiceSpec>,
    pub stats: Vec<StatSpec>,
}

impl Default for LandingContent {
    fn default() -> Self {
        let service = |icon: &str, title: &str, body: &str| ServiceSpec {
            icon: icon.into(),
            title: title.into(),
            body: body.into(),
        };
        let stat = |target: &str, label: &str| StatSpec {
            target: target.into(),
            label: label.into(),
        };
        Self {
            word_left: "Innovate".into(),
            word_right: "Earn".into(),
            subtitle: "We craft innovative digital solutions that help brands thrive in the modern marketplace".into(),
            cta: "Get Started".into(),
            services: vec![
                service(
                    "🎯",
                    "Digital Strategy",
                    "Data-driven strategies that align with your business goals and target audience",
                ),
                service(
                    "💻",
                    "Web Development",
                    "Custom websites and applications built with cutting-edge technologies",
                ),
                service(
                    "📱",
                    "Social Media",
                    "Engaging social media campaigns that build brand awareness and drive engagement",
                ),
            ],
            stats: vec![
                stat("150", "Happy Clients"),
                stat("500", "Projects Completed"),
                stat("98", "Success Rate"),
            ],
        }
    }
}

#[derive(Debug)]
struct HeroBinding {
    trigger: TriggerId,
    playback: Playback,
}

#[derive(Clone, Copy, Debug)]
struct Counter {
    trigger: TriggerId,
    element: ElementId,
    target: f32,
}

#[derive(Debug)]
struct PendingBatch {
    event: TriggerEvent,
    elements: Vec<ElementId>,
    waited: f64,
}

#[derive(Debug, Default)]
struct Mounted {
    hero: Option<HeroBinding>,
    services: Vec<(TriggerId, ElementId)>,
    counters: Vec<Counter>,
    floaters: Option<Playback>,
    tweens: TweenSet,
    pending: Vec<PendingBatch>,
}

pub struct LandingPage {
    root: ElementId,
    hero_actions: ToggleActions,
    format: Box<dyn CounterFormat>,
    context: AnimationContext,
    mounted: Option<Mounted>,
}

impl LandingPage {
    pub fn new(root: ElementId, format: Box<dyn CounterFormat>) -> Self {
        Self {
            root,
            hero_actions: ToggleActions {
                on_enter: ToggleAction::Play,
                on_leave: ToggleAction::None,
                on_enter_back: ToggleAction::None,
                on_leave_back: ToggleAction::Reverse,
            },
            format,
            context: AnimationContext::new(),
            mounted: None,
        }
    }

    pub fn with_hero_actions(mut self, actions: ToggleActions) -> Self {
        self.hero_actions = actions;
        self
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Hero timeline progress in `[0, 1]`, if the hero was found.
    pub fn hero_progress(&self) -> Option<f64> {
        Some(self.mounted.as_ref()?.hero.as_ref()?.playback.progress())
    }

    /// Builds the landing markup under `parent` and returns its root.
    pub fn render(scene: &mut Scene, parent: ElementId, content: &LandingContent) -> ElementId {
        let root = scene.append(parent, Element::new("div").with_class("landing"));

        let hero = scene.append(
            root,
            Element::new("section")
                .with_class("hero")
                .with_height(Length::screen()),
        );
        scene.append(
            hero,
            Element::new("div")
                .with_class("floating-element")
                .with_height(Length::Px(128.0))
                .absolute(Length::Px(80.0)),
        );
        scene.append(
            hero,
            Element::new("div")
                .with_class("floating-element")
                .with_height(Length::Px(160.0))
                .absolute(Length::Vh(60.0)),
        );
        let text = scene.append(hero, Element::new("div").with_class("hero-text"));
        let h1 = scene.append(text, Element::new("h1").with_height(Length::Px(96.0)));
        scene.append(
            h1,
            Element::new("span")
                .with_class("hero-word-left")
                .with_text(content.word_left.as_str()),
        );
        scene.append(
            h1,
            Element::new("span")
                .with_class("hero-word-right")
                .with_text(content.word_right.as_str()),
        );
        scene.append(
            text,
            Element::new("p")
                .with_class("hero-subtitle")
                .with_text(content.subtitle.as_str())
                .with_height(Length::Px(64.0)),
        );
        let cta = scene.append(text, Element::new("div"));
        scene.append(
            cta,
            Element::new("button")
                .with_class("hero-cta")
                .with_text(content.cta.as_str())
                .with_height(Length::Px(56.0)),
        );

        let services = scene.append(root, Element::new("section").with_class("services"));
        scene.append(
            services,
            Element::new("h2")
                .with_text("Our Services")
                .with_height(Length::Px(112.0)),
        );
        for service in &content.services {
            let card = scene.append(
                services,
                Element::new("div")
                    .with_class("service-card")
                    .with_height(Length::Px(320.0)),
            );
            scene.append(card, Element::new("div").with_text(service.icon.as_str()));
            scene.append(card, Element::new("h3").with_text(service.title.as_str()));
            scene.append(card, Element::new("p").with_text(service.body.as_str()));
        }

        let stats = scene.append(
            root,
            Element::new("section")
                .with_class("stats")
                .with_height(Length::Px(320.0)),
        );
        for stat in &content.stats {
            let cell = scene.append(stats, Element::new("div"));
            scene.append(
                cell,
                Element::new("div")
                    .with_class("stat-number")
                    .with_attr("data-target", stat.target.as_str())
                    .with_text("0")
                    .with_height(Length::Px(60.0)),
            );
            scene.append(cell, Element::new("p").with_text(stat.label.as_str()));
        }
        root
    }

    fn mount_hero(&mut self, ctx: &mut StageContext<'_>) -> Option<HeroBinding> {
        let text = ctx.scene.query_one(self.root, ".hero-text")?;
        let left = ctx.scene.select(self.root, ".hero-word-left");
        let right = ctx.scene.select(self.root, ".hero-word-right");
        let subtitle = ctx.scene.select(self.root, ".hero-subtitle");
        let cta = ctx.scene.select(self.root, ".hero-cta");

        let hidden = [(Property::Opacity, PropValue::Number(0.0))];
        for targets in [&left, &right, &subtitle, &cta] {
            self.context.set(ctx.scene, targets, &hidden);
        }

        let offscreen = Length::Vw(100.0).resolve(&ctx.viewport) as f32;
        let slide = TweenOptions::new(1.0).ease(EasingType::Power4Out);
        let words: Vec<ElementId> = left.iter().chain(right.iter()).copied().collect();
        let timeline = Timeline::builder(ctx.scene)
            .from(
                &left,
                &[
                    (Property::X, PropValue::Number(-offscreen)),
                    (Property::Opacity, PropValue::Number(0.0)),
                ],
                slide,
            )
            .from(
                &right,
                &[
                    (Property::X, PropValue::Number(offscreen)),
                    (Property::Opacity, PropValue::Number(0.0)),
                ],
                slide.at(StepPosition::WithPrevious),
            )
            .to(
                &words,
                &[
                    (Property::X, PropValue::Number(0.0)),
                    (Property::Opacity, PropValue::Number(1.0)),
                ],
                TweenOptions::new(1.0),
            )
            .from_to(
                &subtitle,
                &[
                    (Property::Y, PropValue::Number(50.0)),
                    (Property::Opacity, PropValue::Number(0.0)),
                ],
                &[
                    (Property::Y, PropValue::Number(0.0)),
                    (Property::Opacity, PropValue::Number(1.0)),
                ],
                TweenOptions::new(0.8),
            )
            .from_to(
                &cta,
                &[
                    (Property::Scale, PropValue::Number(0.8)),
                    (Property::Opacity, PropValue::Number(0.0)),
                ],
                &[
                    (Property::Scale, PropValue::Number(1.0)),
                    (Property::Opacity, PropValue::Number(1.0)),
                ],
                TweenOptions::new(0.5),
            )
            .build();
        for (element, _) in timeline.targets() {
            self.context.record(ctx.scene, element);
        }

        let playback = Playback::new(timeline);
        playback.render(ctx.scene);

        let spec = TriggerSpec::new(
            text,
            TriggerPosition::anchored(Edge::top(), Edge::fraction(0.8)),
            TriggerPosition::anchored(Edge::bottom(), Edge::center()),
        );
        Some(HeroBinding {
            trigger: ctx.triggers.register(ctx.owner, spec),
            playback,
        })
    }

    fn mount_services(&mut self, ctx: &mut StageContext<'_>) -> Vec<(TriggerId, ElementId)> {
        let cards = ctx.scene.select(self.root, ".service-card");
        self.context.set(
            ctx.scene,
            &cards,
            &[
                (Property::Y, PropValue::Number(100.0)),
                (Property::Opacity, PropValue::Number(0.0)),
            ],
        );
        cards
            .into_iter()
            .map(|card| {
                let spec = TriggerSpec::new(
                    card,
                    TriggerPosition::anchored(Edge::top(), Edge::fraction(0.85)),
                    TriggerPosition::anchored(Edge::bottom(), Edge::top()),
                );
                (ctx.triggers.register(ctx.owner, spec), card)
            })
            .collect()
    }

    fn mount_counters(&mut self, ctx: &mut StageContext<'_>) -> Vec<Counter> {
        let Some(section) = ctx.scene.query_one(self.root, ".stats") else {
            return Vec::new();
        };
        let mut counters = Vec::new();
        for element in ctx.scene.select(self.root, ".stat-number") {
            let raw = ctx
                .scene
                .get(element)
                .and_then(|el| el.attr("data-target"))
                .unwrap_or_default();
            let target = match raw.trim().parse::<u32>() {
                Ok(target) if target <= MAX_COUNTER_TARGET => target as f32,
                Ok(_) => {
                    warn!(
                        element,
                        target = raw,
                        max = MAX_COUNTER_TARGET,
                        "stat counter target too large to count exactly; skipped"
                    );
                    continue;
                }
                Err(_) => {
                    warn!(element, target = raw, "stat counter target is not an integer; skipped");
                    continue;
                }
            };
            self.context.set(
                ctx.scene,
                &[element],
                &[(Property::TextValue, PropValue::Number(0.0))],
            );
            if let Some(el) = ctx.scene.get_mut(element) {
                el.text = Some(self.format.format(0.0));
            }
            let spec = TriggerSpec::new(
                section,
                TriggerPosition::anchored(Edge::top(), Edge::fraction(0.8)),
                TriggerPosition::anchored(Edge::bottom(), Edge::top()),
            );
            counters.push(Counter {
                trigger: ctx.triggers.register(ctx.owner, spec),
                element,
                target,
            });
        }
        counters
    }

    fn mount_floaters(&mut self, ctx: &mut StageContext<'_>) -> Option<Playback> {
        let floaters = ctx.scene.select(self.root, ".floating-element");
        if floaters.is_empty() {
            return None;
        }
        self.context.record_all(ctx.scene, floaters.iter().copied());
        let timeline = Timeline::builder(ctx.scene)
            .repeat(Repeat::Infinite)
            .yoyo(true)
            .to(
                &floaters,
                &[(Property::Y, PropValue::Number(20.0))],
                TweenOptions::new(2.0).ease(EasingType::Power1InOut),
            )
            .build();
        Some(Playback::playing(timeline))
    }
}

/// Tween options for a service batch, by the event that released it.
fn service_tween(event: TriggerEvent) -> ([(Property, PropValue); 2], TweenOptions) {
    let shown = |y: f32, opacity: f32| {
        [
            (Property::Y, PropValue::Number(y)),
            (Property::Opacity, PropValue::Number(opacity)),
        ]
    };
    let opts = TweenOptions::new(0.8);
    match event {
        TriggerEvent::Enter => (shown(0.0, 1.0), opts.stagger(0.2).ease(EasingType::Power2Out)),
        TriggerEvent::Leave => (shown(-50.0, 0.0), opts.stagger(0.2)),
        TriggerEvent::EnterBack => (shown(0.0, 1.0), opts.stagger(-0.2)),
        TriggerEvent::LeaveBack => (shown(50.0, 0.0), opts.stagger(-0.2)),
    }
}

impl Mounted {
    fn queue(&mut self, event: TriggerEvent, element: ElementId) {
        match self.pending.iter_mut().find(|b| b.event == event) {
            Some(batch) => batch.elements.push(element),
            None => self.pending.push(PendingBatch {
                event,
                elements: vec![element],
                waited: 0.0,
            }),
        }
    }

    fn flush_batches(&mut self, dt: f64, scene: &Scene) {
        for batch in &mut self.pending {
            batch.waited += dt;
        }
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|b| b.waited >= BATCH_INTERVAL);
        self.pending = waiting;
        for batch in ready {
            let (props, opts) = service_tween(batch.event);
            debug!(event = ?batch.event, cards = batch.elements.len(), "service batch");
            self.tweens.to(scene, &batch.elements, &props, opts);
        }
    }
}

impl Orchestrator for LandingPage {
    fn name(&self) -> &str {
        "landing"
    }

    fn mount(&mut self, ctx: &mut StageContext<'_>) {
        let hero = self.mount_hero(ctx);
        if hero.is_none() {
            debug!(root = self.root, "no hero text; hero entrance skipped");
        }
        let services = self.mount_services(ctx);
        let counters = self.mount_counters(ctx);
        let floaters = self.mount_floaters(ctx);
        info!(
            hero = hero.is_some(),
            services = services.len(),
            counters = counters.len(),
            floaters = floaters.is_some(),
            "landing page mounted"
        );
        self.mounted = Some(Mounted {
            hero,
            services,
            counters,
            floaters,
            ..Mounted::default()
        });
    }

    fn on_trigger(&mut self, update: &TriggerUpdate, ctx: &mut StageContext<'_>) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };

        if let Some(hero) = mounted.hero.as_mut().filter(|h| h.trigger == update.id) {
            for &event in &update.events {
                hero.playback.apply_action(self.hero_actions.action_for(event));
            }
            return;
        }

        if let Some(&(_, card)) = mounted.services.iter().find(|(id, _)| *id == update.id) {
            for &event in &update.events {
                mounted.queue(event, card);
            }
            return;
        }

        let Some(counter) = mounted
            .counters
            .iter()
            .find(|c| c.trigger == update.id)
            .copied()
        else {
            return;
        };
        for &event in &update.events {
            let (to, opts) = match event {
                TriggerEvent::Enter => (
                    counter.target,
                    TweenOptions::new(2.0)
                        .ease(EasingType::Power1InOut)
                        .snap(1.0),
                ),
                TriggerEvent::LeaveBack => (0.0, TweenOptions::new(1.0).snap(1.0)),
                _ => continue,
            };
            mounted.tweens.to(
                ctx.scene,
                &[counter.element],
                &[(Property::TextValue, PropValue::Number(to))],
                opts,
            );
        }
    }

    fn tick(&mut self, dt: f64, ctx: &mut StageContext<'_>) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        if let Some(hero) = mounted.hero.as_mut() {
            if hero.playback.tick(dt) {
                hero.playback.render(ctx.scene);
            }
        }
        if let Some(floaters) = mounted.floaters.as_mut() {
            if floaters.tick(dt) {
                floaters.render(ctx.scene);
            }
        }

        mounted.tweens.tick(dt, ctx.scene);
        for counter in &mounted.counters {
            if let Some(el) = ctx.scene.get_mut(counter.element) {
                el.text = Some(self.format.format(el.style.text_value));
            }
        }
        mounted.flush_batches(dt, ctx.scene);
    }

    fn unmount(&mut self, ctx: &mut StageContext<'_>) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.tweens.kill_all();
        }
        self.context.revert(ctx.scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_text_rounds() {
        assert_eq!(IntegerText.format(97.6), "98");
        assert_eq!(IntegerText.format(0.0), "0");
    }

    #[test]
    fn render_carries_stat_targets() {
        let mut scene = Scene::new();
        let page = scene.add_element(Element::new("main"));
        let root = LandingPage::render(&mut scene, page, &LandingContent::default());

        let targets: Vec<_> = scene
            .select(root, ".stat-number")
            .into_iter()
            .filter_map(|id| scene.get(id)?.attr("data-target").map(str::to_string))
            .collect();
        assert_eq!(targets, ["150", "500", "98"]);
        assert_eq!(scene.select(root, ".service-card").len(), 3);
        assert_eq!(scene.select(root, ".floating-element").len(), 2);
    }

    #[test]
    fn batch_stagger_follows_direction() {
        assert_eq!(service_tween(TriggerEvent::Enter).1.stagger, 0.2);
        assert_eq!(service_tween(TriggerEvent::EnterBack).1.stagger, -0.2);
        assert_eq!(service_tween(TriggerEvent::LeaveBack).0[0].1, PropValue::Number(50.0));
    }
}
