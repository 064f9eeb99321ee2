//! # Scrollstage Pipeline
//!
//! Turns a `StageRequest` into a laid-out scene with every animated section
//! mounted on a `Stage`. Validation failures are reported with the index and
//! kind of the offending section.

use anyhow::{bail, Context, Result};
use scrollstage_core::trigger::ToggleActions;
use scrollstage_core::{
    CardSpec, Element, ElementId, IntegerText, LandingContent, LandingPage, Length, Orchestrator,
    Palette, Scene, ScrollGallery, ServiceSpec, Stage, StageConfig, StatSpec, Viewport,
};
use scrollstage_schema::{BannerSection, GallerySection, LandingSection, Section, StageRequest};
use tracing::{debug, info};

/// Parses a JSON request and builds its stage.
pub fn load_stage_from_json(json: &str) -> Result<Stage> {
    let request = StageRequest::from_json(json).context("Failed to parse stage request")?;
    load_stage(&request)
}

/// Renders every section and mounts the animated ones in page order.
pub fn load_stage(request: &StageRequest) -> Result<Stage> {
    let viewport = Viewport::new(request.viewport.width, request.viewport.height);
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        bail!(
            "viewport must be positive, got {}x{}",
            viewport.width,
            viewport.height
        );
    }

    let mut scene = Scene::new();
    let page = scene.add_element(Element::new("main"));
    let mut components: Vec<Box<dyn Orchestrator>> = Vec::new();
    for (index, section) in request.sections.iter().enumerate() {
        let component = build_section(&mut scene, page, section)
            .with_context(|| format!("Failed to build section {index} ({})", section.kind()))?;
        components.extend(component);
    }

    let config = StageConfig {
        refresh_on_resize: request.refresh_on_resize,
    };
    let mut stage = Stage::new(scene, viewport, config);
    for component in components {
        stage.mount(component);
    }
    info!(
        sections = request.sections.len(),
        page_height = stage.page_height(),
        "stage loaded"
    );
    Ok(stage)
}

fn build_section(
    scene: &mut Scene,
    page: ElementId,
    section: &Section,
) -> Result<Option<Box<dyn Orchestrator>>> {
    match section {
        Section::Banner(banner) => {
            build_banner(scene, page, banner)?;
            Ok(None)
        }
        Section::Gallery(gallery) => Ok(Some(build_gallery(scene, page, gallery)?)),
        Section::Landing(landing) => Ok(Some(build_landing(scene, page, landing)?)),
    }
}

fn build_banner(scene: &mut Scene, page: ElementId, banner: &BannerSection) -> Result<ElementId> {
    let height: Length = banner
        .height
        .parse()
        .with_context(|| format!("invalid banner height: {}", banner.height))?;
    let id = scene.append(
        page,
        Element::new("section")
            .with_class("banner")
            .with_text(banner.text.as_str())
            .with_height(height),
    );
    debug!(id, text = %banner.text, "banner rendered");
    Ok(id)
}

fn build_gallery(
    scene: &mut Scene,
    page: ElementId,
    gallery: &GallerySection,
) -> Result<Box<dyn Orchestrator>> {
    let palette = Palette::parse(&gallery.palette).context("invalid gallery palette")?;
    if let Some(lag) = gallery.scrub_lag {
        if !(lag.is_finite() && lag >= 0.0) {
            bail!("scrub lag must be a non-negative number of seconds, got {lag}");
        }
    }
    let cards: Vec<CardSpec> = gallery
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| CardSpec {
            title: card.title.clone(),
            image: card.image.clone(),
            alt: card.alt.clone(),
            palette_index: card.palette_index.unwrap_or(i),
        })
        .collect();
    let root = ScrollGallery::render(scene, page, &cards);
    Ok(Box::new(
        ScrollGallery::new(root, palette).with_scrub_lag(gallery.scrub_lag),
    ))
}

fn build_landing(
    scene: &mut Scene,
    page: ElementId,
    landing: &LandingSection,
) -> Result<Box<dyn Orchestrator>> {
    let actions: ToggleActions = landing
        .hero_toggle_actions
        .parse()
        .context("invalid hero toggle actions")?;
    let content = LandingContent {
        word_left: landing.word_left.clone(),
        word_right: landing.word_right.clone(),
        subtitle: landing.subtitle.clone(),
        cta: landing.cta.clone(),
        services: landing
            .services
            .iter()
            .map(|s| ServiceSpec {
                icon: s.icon.clone(),
                title: s.title.clone(),
                body: s.body.clone(),
            })
            .collect(),
        stats: landing
            .stats
            .iter()
            .map(|s| StatSpec {
                target: s.target.clone(),
                label: s.label.clone(),
            })
            .collect(),
    };
    let root = LandingPage::render(scene, page, &content);
    Ok(Box::new(
        LandingPage::new(root, Box::new(IntegerText)).with_hero_actions(actions),
    ))
}
