//! RGB colors and the card palette.

use crate::errors::{Result, StageError};
use keyframe::CanTween;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with channels stored as `0.0..=255.0` so interpolation
/// does not quantize intermediate frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_hex(&self) -> String {
        let ch = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", ch(self.r), ch(self.g), ch(self.b))
    }
}

impl CanTween for Color {
    fn ease(from: Self, to: Self, time: impl keyframe::num_traits::Float) -> Self {
        let t = time.to_f32().unwrap_or(0.0);
        from.lerp(&to, t)
    }
}

impl FromStr for Color {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || StageError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(invalid()),
        };
        let channel =
            |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = StageError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fixed color table for gallery content panels.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(StageError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn parse<S: AsRef<str>>(hexes: &[S]) -> Result<Self> {
        let colors = hexes
            .iter()
            .map(|h| h.as_ref().parse())
            .collect::<Result<Vec<Color>>>()?;
        Self::new(colors)
    }

    /// Looks up `index`, wrapping around the table.
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    /// Soft pink, coral, rose, deep red.
    fn default() -> Self {
        Self {
            colors: vec![
                Color::rgb(0xf9, 0xd5, 0xe5),
                Color::rgb(0xee, 0xac, 0x99),
                Color::rgb(0xe0, 0x63, 0x77),
                Color::rgb(0xc8, 0x33, 0x49),
            ],
        }
    }
}
