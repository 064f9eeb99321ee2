//! Simulation steps as written on the command line.

use std::fmt;
use std::str::FromStr;

/// Frame length used when `run=` is split into ticks.
pub const FRAME_SECONDS: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `scroll=900`: jump to an absolute offset.
    Scroll(f64),
    /// `by=-120`: scroll relative to the current offset.
    ScrollBy(f64),
    /// `tick=0.5`: one frame of the given length.
    Tick(f64),
    /// `run=2`: that many seconds of 60 fps frames.
    Run(f64),
    /// `end`: scrolling stopped; snapping may apply.
    End,
    /// `resize=1280x720`.
    Resize { width: f64, height: f64 },
    /// `unmount=gallery`.
    Unmount(String),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "end" {
            return Ok(Step::End);
        }
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected `name=value` or `end`, got `{s}`"))?;
        let number = |v: &str| -> Result<f64, String> {
            v.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| format!("`{v}` is not a number in `{s}`"))
        };
        match name {
            "scroll" => Ok(Step::Scroll(number(value)?)),
            "by" => Ok(Step::ScrollBy(number(value)?)),
            "tick" | "run" => {
                let seconds = number(value)?;
                if seconds < 0.0 {
                    return Err(format!("time cannot run backwards in `{s}`"));
                }
                Ok(if name == "tick" {
                    Step::Tick(seconds)
                } else {
                    Step::Run(seconds)
                })
            }
            "resize" => {
                let (w, h) = value
                    .split_once('x')
                    .ok_or_else(|| format!("expected `WIDTHxHEIGHT` in `{s}`"))?;
                let (width, height) = (number(w)?, number(h)?);
                if width <= 0.0 || height <= 0.0 {
                    return Err(format!("viewport must be positive in `{s}`"));
                }
                Ok(Step::Resize { width, height })
            }
            "unmount" if !value.is_empty() => Ok(Step::Unmount(value.to_string())),
            _ => Err(format!("unknown step `{s}`")),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Scroll(v) => write!(f, "scroll={v}"),
            Step::ScrollBy(v) => write!(f, "by={v}"),
            Step::Tick(v) => write!(f, "tick={v}"),
            Step::Run(v) => write!(f, "run={v}"),
            Step::End => write!(f, "end"),
            Step::Resize { width, height } => write!(f, "resize={width}x{height}"),
            Step::Unmount(name) => write!(f, "unmount={name}"),
        }
    }
}
