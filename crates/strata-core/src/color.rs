#![forbid(unsafe_code)]

//! Attribute brand colors and toggle styling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// Alpha applied to an attribute's brand color while its toggle is off.
pub const INACTIVE_ALPHA: f32 = 0.5;

/// 8-bit RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(r, g, b, a)` string.
    #[must_use]
    pub fn to_rgba_css(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError { value: s.to_owned() };
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// CSS colors for one attribute toggle.
///
/// Active toggles use the solid brand color; inactive ones dim the
/// background and border to [`INACTIVE_ALPHA`]. The check mark always keeps
/// the solid color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleStyle {
    pub background: String,
    pub border: String,
    pub check: String,
}

impl ToggleStyle {
    #[must_use]
    pub fn for_state(color: Rgb, active: bool) -> Self {
        let fill = if active {
            color.to_hex()
        } else {
            color.to_rgba_css(INACTIVE_ALPHA)
        };
        Self {
            background: fill.clone(),
            border: fill,
            check: color.to_hex(),
        }
    }
}
