//! The demo page: a title banner, the four-card gallery and a closing banner.
//! The landing page is composed separately and is not part of the demo.

use anyhow::Result;
use scrollstage_core::Stage;
use scrollstage_pipeline::load_stage;
use scrollstage_schema::{
    default_palette, BannerSection, CardRequest, GallerySection, LandingSection, Section,
    StageRequest, ViewportSpec,
};

/// Title, image and alt text of the demo cards, in order.
pub const DEMO_CARDS: [(&str, &str, &str); 4] = [
    (
        "Beautiful Nature",
        "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05",
        "Nature landscape",
    ),
    (
        "Urban Life",
        "https://images.unsplash.com/photo-1449824913935-59a10b8d2000",
        "City view",
    ),
    (
        "Ocean Waves",
        "https://images.unsplash.com/photo-1505118380757-91f5f5632de0",
        "Ocean view",
    ),
    (
        "Mountain Peaks",
        "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b",
        "Mountain landscape",
    ),
];

fn banner(text: &str) -> Section {
    Section::Banner(BannerSection {
        text: text.to_string(),
        height: "100vh".to_string(),
    })
}

pub fn demo_request() -> StageRequest {
    let cards = DEMO_CARDS
        .iter()
        .map(|&(title, image, alt)| CardRequest {
            title: title.to_string(),
            image: image.to_string(),
            alt: alt.to_string(),
            palette_index: None,
        })
        .collect();
    StageRequest {
        viewport: ViewportSpec::default(),
        refresh_on_resize: false,
        sections: vec![
            banner("GSAP EXAMPLE"),
            Section::Gallery(GallerySection {
                cards,
                palette: default_palette(),
                scrub_lag: None,
            }),
            banner("END"),
        ],
    }
}

pub fn landing_request() -> StageRequest {
    StageRequest {
        viewport: ViewportSpec::default(),
        refresh_on_resize: false,
        sections: vec![Section::Landing(LandingSection::default())],
    }
}

pub fn demo_stage() -> Result<Stage> {
    load_stage(&demo_request())
}
