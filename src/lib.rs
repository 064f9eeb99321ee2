//! # Scrollstage
//!
//! Scroll-driven page animation: pinned, scrubbed card galleries and
//! visibility-gated landing pages, evaluated against a simulated viewport.
//!
//! - `scrollstage_core` (re-exported here): scene, triggers, timelines, `Stage`.
//! - [`schema`]: JSON request types.
//! - [`pipeline`]: request to mounted `Stage`.
//! - [`app`]: the demo page composition.

pub mod app;

pub use scrollstage_core::*;
pub use scrollstage_pipeline as pipeline;
pub use scrollstage_pipeline::{load_stage, load_stage_from_json};
pub use scrollstage_schema as schema;
