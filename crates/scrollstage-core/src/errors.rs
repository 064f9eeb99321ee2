//! Error types for declarative stage input.
//!
//! Only parsing and configuration can fail. Once a component is mounted,
//! missing targets and degenerate inputs degrade to "no visual effect".

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    #[error("invalid trigger position `{input}`: {reason}")]
    InvalidPosition { input: String, reason: String },

    #[error("invalid length `{0}`")]
    InvalidLength(String),

    #[error("invalid toggle actions `{0}`: expected four actions such as `play none none reverse`")]
    InvalidToggleActions(String),

    #[error("unknown easing `{0}`")]
    UnknownEasing(String),

    #[error("invalid color `{0}`: expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("trigger end ({end}) must be greater than start ({start})")]
    EmptyRange { start: f64, end: f64 },
}

pub type Result<T> = std::result::Result<T, StageError>;
