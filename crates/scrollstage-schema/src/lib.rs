//! # Scrollstage Schema
//!
//! The JSON contract for describing a page: viewport, resize policy and an
//! ordered list of sections. Every optional field has a default, so the
//! smallest valid request is `{"sections": []}`.
//!
//! Types derive `JsonSchema` so tooling can publish the contract.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A complete page description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StageRequest {
    #[serde(default)]
    pub viewport: ViewportSpec,
    /// Re-resolve trigger ranges when the viewport changes.
    #[serde(default)]
    pub refresh_on_resize: bool,
    pub sections: Vec<Section>,
}

impl StageRequest {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// One top-level block of the page, laid out top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Static full-width text block.
    Banner(BannerSection),
    /// Pinned, scroll-scrubbed card gallery.
    Gallery(GallerySection),
    /// Hero, services, stats and floaters.
    Landing(LandingSection),
}

impl Section {
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Banner(_) => "banner",
            Section::Gallery(_) => "gallery",
            Section::Landing(_) => "landing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BannerSection {
    pub text: String,
    /// CSS-like length: `100vh`, `640px`, `50vw`.
    #[serde(default = "default_banner_height")]
    pub height: String,
}

fn default_banner_height() -> String {
    "100vh".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GallerySection {
    pub cards: Vec<CardRequest>,
    /// Hex colors indexed by card, wrapping past the end.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Seconds the visuals take to catch up with the scroll position.
    #[serde(default)]
    pub scrub_lag: Option<f64>,
}

/// Soft pink, coral, rose, deep red.
pub fn default_palette() -> Vec<String> {
    ["#f9d5e5", "#eeac99", "#e06377", "#c83349"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CardRequest {
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub alt: String,
    /// Palette slot; defaults to the card's position.
    #[serde(default)]
    pub palette_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LandingSection {
    pub word_left: String,
    pub word_right: String,
    pub subtitle: String,
    pub cta: String,
    pub services: Vec<ServiceRequest>,
    pub stats: Vec<StatRequest>,
    /// Toggle actions for the hero entrance: enter, leave, enter-back, leave-back.
    pub hero_toggle_actions: String,
}

impl Default for LandingSection {
    fn default() -> Self {
        let service = |icon: &str, title: &str, body: &str| ServiceRequest {
            icon: icon.into(),
            title: title.into(),
            body: body.into(),
        };
        let stat = |target: &str, label: &str| StatRequest {
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
            hero_toggle_actions: "play none none reverse".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceRequest {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatRequest {
    /// Integer the counter climbs to. Kept as text, like the markup attribute.
    pub target: String,
    #[serde(default)]
    pub label: String,
}
