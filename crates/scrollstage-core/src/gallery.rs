//! # Scroll Gallery
//!
//! N cards stacked at the same screen position inside a pinned region of
//! `(N - 1)` viewport heights. Scrolling through the region cross-fades
//! card `i` into card `i + 1` and blends each card's content panel from its
//! palette color to the next one.
//!
//! Everything the gallery shows is a pure function of the scroll offset:
//! timelines are sampled at `progress * (N - 1)`, never advanced by deltas.

use crate::animation::EasingType;
use crate::color::{Color, Palette};
use crate::context::AnimationContext;
use crate::scene::{Element, ElementId, Scene};
use crate::stage::{Orchestrator, StageContext};
use crate::style::{Length, PropValue, Property};
use crate::timeline::{StepPosition, Timeline, TweenOptions};
use crate::trigger::{
    Edge, Scrub, TriggerId, TriggerPosition, TriggerService, TriggerSpec, TriggerUpdate,
};
use tracing::{debug, info};

/// Content of one gallery card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardSpec {
    pub title: String,
    pub image: String,
    pub alt: String,
    pub palette_index: usize,
}

/// A scrubbed binding: trigger, smoothing state and the timeline it drives.
#[derive(Debug)]
struct ScrubBinding {
    trigger: TriggerId,
    scrub: Scrub,
    timeline: Timeline,
    /// Timeline time at progress 1.
    span: f64,
}

impl ScrubBinding {
    fn render(&self, scene: &mut Scene) {
        self.timeline.apply(self.scrub.current() * self.span, scene);
    }
}

#[derive(Debug)]
struct Mounted {
    cards: Vec<ElementId>,
    /// `None` for a single card: nothing to pin or fade.
    fade: Option<ScrubBinding>,
    colors: Vec<ScrubBinding>,
}

pub struct ScrollGallery {
    root: ElementId,
    palette: Palette,
    scrub_lag: Option<f64>,
    context: AnimationContext,
    mounted: Option<Mounted>,
}

impl ScrollGallery {
    pub fn new(root: ElementId, palette: Palette) -> Self {
        Self {
            root,
            palette,
            scrub_lag: None,
            context: AnimationContext::new(),
            mounted: None,
        }
    }

    /// Smooths scrubbing over `lag` seconds of frame time.
    pub fn with_scrub_lag(mut self, lag: Option<f64>) -> Self {
        self.scrub_lag = lag;
        self
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Card elements in display order; empty before mount.
    pub fn cards(&self) -> &[ElementId] {
        self.mounted.as_ref().map(|m| m.cards.as_slice()).unwrap_or(&[])
    }

    /// Builds the gallery markup under `parent` and returns its root.
    pub fn render(scene: &mut Scene, parent: ElementId, cards: &[CardSpec]) -> ElementId {
        let root = scene.append(
            parent,
            Element::new("div")
                .with_class("gallery")
                .with_height(Length::screen()),
        );
        for card in cards {
            let el = scene.append(
                root,
                Element::new("div")
                    .with_class("card")
                    .with_attr("data-palette-index", card.palette_index.to_string())
                    .with_height(Length::screen())
                    .absolute(Length::Px(0.0)),
            );
            let panel = scene.append(
                el,
                Element::new("div")
                    .with_class("content-section")
                    .with_height(Length::Vh(50.0)),
            );
            scene.append(panel, Element::new("h2").with_text(card.title.as_str()));
            let frame = scene.append(el, Element::new("div").with_height(Length::Vh(50.0)));
            scene.append(
                frame,
                Element::new("img")
                    .with_attr("src", card.image.as_str())
                    .with_attr("alt", card.alt.as_str()),
            );
        }
        root
    }

    fn card_color(&self, scene: &Scene, card: ElementId, fallback: usize) -> Color {
        let index = scene
            .get(card)
            .and_then(|el| el.attr("data-palette-index"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(fallback);
        self.palette.color_for(index)
    }

    /// Pure scroll progress of the pinned region mapped onto card positions:
    /// `0.0` shows the first card, `1.0` the second, and so on.
    pub fn position(&self) -> Option<f64> {
        let mounted = self.mounted.as_ref()?;
        let fade = mounted.fade.as_ref()?;
        Some(fade.scrub.current() * fade.span)
    }
}

impl Orchestrator for ScrollGallery {
    fn name(&self) -> &str {
        "gallery"
    }

    fn mount(&mut self, ctx: &mut StageContext<'_>) {
        let cards = ctx.scene.select(self.root, ".card");
        if cards.is_empty() {
            debug!(root = self.root, "gallery has no cards; nothing to animate");
            self.mounted = Some(Mounted {
                cards,
                fade: None,
                colors: Vec::new(),
            });
            return;
        }

        let panels: Vec<Option<ElementId>> = cards
            .iter()
            .map(|&card| ctx.scene.query_one(card, ".content-section"))
            .collect();
        let colors: Vec<Color> = cards
            .iter()
            .enumerate()
            .map(|(i, &card)| self.card_color(ctx.scene, card, i))
            .collect();

        for (i, &card) in cards.iter().enumerate() {
            let opacity = if i == 0 { 1.0 } else { 0.0 };
            self.context.set(
                ctx.scene,
                &[card],
                &[
                    (Property::Opacity, PropValue::Number(opacity)),
                    (Property::YPercent, PropValue::Number(0.0)),
                ],
            );
            if let Some(panel) = panels[i] {
                self.context.set(
                    ctx.scene,
                    &[panel],
                    &[(Property::BackgroundColor, PropValue::Color(colors[i]))],
                );
            }
        }

        let n = cards.len();
        if n < 2 {
            debug!(root = self.root, "single card; no pinned region");
            self.mounted = Some(Mounted {
                cards,
                fade: None,
                colors: Vec::new(),
            });
            return;
        }
        let transitions = (n - 1) as f64;

        let linear = TweenOptions::new(1.0).ease(EasingType::Linear);
        let mut fade = Timeline::builder(ctx.scene);
        for i in 0..n - 1 {
            fade = fade
                .from_to(
                    &[cards[i]],
                    &[(Property::Opacity, PropValue::Number(1.0))],
                    &[(Property::Opacity, PropValue::Number(0.0))],
                    linear.at(StepPosition::At(i as f64)),
                )
                .from_to(
                    &[cards[i + 1]],
                    &[(Property::Opacity, PropValue::Number(0.0))],
                    &[(Property::Opacity, PropValue::Number(1.0))],
                    linear.at(StepPosition::WithPrevious),
                );
        }
        let pin = TriggerSpec::new(
            self.root,
            TriggerPosition::anchored(Edge::top(), Edge::top()),
            TriggerPosition::Relative(Length::Vh(100.0 * transitions)),
        )
        .scrub()
        .pinned()
        .snap(1.0 / transitions);
        let fade = ScrubBinding {
            trigger: ctx.triggers.register(ctx.owner, pin),
            scrub: Scrub::new(self.scrub_lag),
            timeline: fade.build(),
            span: transitions,
        };

        let mut color_bindings = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let Some(panel) = panels[i] else {
                debug!(card = cards[i], "card has no content panel; color skipped");
                continue;
            };
            let timeline = Timeline::builder(ctx.scene)
                .from_to(
                    &[panel],
                    &[(Property::BackgroundColor, PropValue::Color(colors[i]))],
                    &[(Property::BackgroundColor, PropValue::Color(colors[i + 1]))],
                    linear,
                )
                .build();
            let start = Edge::top().with_offset(Length::Vh(100.0 * i as f64));
            let end = Edge::top().with_offset(Length::Vh(100.0 * (i + 1) as f64));
            let spec = TriggerSpec::new(
                self.root,
                TriggerPosition::anchored(start, Edge::top()),
                TriggerPosition::anchored(end, Edge::top()),
            )
            .scrub();
            color_bindings.push(ScrubBinding {
                trigger: ctx.triggers.register(ctx.owner, spec),
                scrub: Scrub::new(self.scrub_lag),
                timeline,
                span: 1.0,
            });
        }

        info!(cards = n, "gallery mounted");
        self.mounted = Some(Mounted {
            cards,
            fade: Some(fade),
            colors: color_bindings,
        });
    }

    fn on_trigger(&mut self, update: &TriggerUpdate, ctx: &mut StageContext<'_>) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        let binding = mounted
            .fade
            .iter_mut()
            .chain(mounted.colors.iter_mut())
            .find(|b| b.trigger == update.id);
        if let Some(binding) = binding {
            if binding.scrub.seek(update.progress) {
                binding.render(ctx.scene);
            }
        }
    }

    fn tick(&mut self, dt: f64, ctx: &mut StageContext<'_>) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        for binding in mounted.fade.iter_mut().chain(mounted.colors.iter_mut()) {
            if binding.scrub.tick(dt) {
                binding.render(ctx.scene);
            }
        }
    }

    fn snap_target(&self, offset: f64, triggers: &TriggerService) -> Option<f64> {
        let fade = self.mounted.as_ref()?.fade.as_ref()?;
        triggers.snap_offset(fade.trigger, offset)
    }

    fn unmount(&mut self, ctx: &mut StageContext<'_>) {
        self.mounted = None;
        self.context.revert(ctx.scene);
    }
}
