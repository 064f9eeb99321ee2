//! # Scrollstage Core
//!
//! Scroll-driven page animation without a browser: a scene of elements, a
//! scroll-trigger service mapping offsets to progress and crossing events,
//! timelines sampled as pure functions of time, and the `Stage` host that
//! feeds scroll, resize and frame events to mounted orchestrators.

pub mod animation;
pub mod color;
pub mod context;
pub mod errors;
pub mod gallery;
pub mod landing;
pub mod scene;
pub mod stage;
pub mod style;
pub mod timeline;
pub mod trigger;
pub mod tween;

pub use animation::EasingType;
pub use color::{Color, Palette};
pub use errors::{Result, StageError};
pub use gallery::{CardSpec, ScrollGallery};
pub use landing::{CounterFormat, IntegerText, LandingContent, LandingPage, ServiceSpec, StatSpec};
pub use scene::{Element, ElementId, Scene};
pub use stage::{ComponentId, Orchestrator, Stage, StageConfig, StageContext, StageSnapshot};
pub use style::{Length, PropValue, Property, Style, Viewport};
pub use trigger::{TriggerService, TriggerUpdate};
