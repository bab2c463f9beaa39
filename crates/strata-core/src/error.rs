#![forbid(unsafe_code)]

//! Error types for catalog configuration and selection mutation.
//!
//! The resolver itself never fails: an unknown base or a malformed catalog
//! only degrades matching. Errors exist for the places where input crosses
//! into the crate (configuration text, toggle requests).

use std::fmt;

use crate::catalog::{AttributeTag, BaseId};

/// A color string that is not of the form `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    pub value: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: expected #rrggbb", self.value)
    }
}

impl std::error::Error for ColorParseError {}

/// Configuration load or validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    Parse(String),
    /// The catalog declares no base variants.
    NoBases,
    /// The initial base does not name a declared base variant.
    UnknownInitialBase(BaseId),
    /// An initially active tag has no attribute definition.
    UnknownInitialTag(AttributeTag),
    /// Zoom bounds are non-positive or inverted.
    InvalidZoomBounds { min: f64, max: f64 },
    /// Zoom step must be positive and finite.
    InvalidZoomStep(f64),
    /// Initial scale must be positive and finite.
    InvalidScale(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::NoBases => write!(f, "catalog declares no base variants"),
            Self::UnknownInitialBase(id) => write!(f, "initial base {id} is not in the catalog"),
            Self::UnknownInitialTag(tag) => {
                write!(f, "initial tag {tag} has no attribute definition")
            }
            Self::InvalidZoomBounds { min, max } => {
                write!(f, "invalid zoom bounds [{min}, {max}]")
            }
            Self::InvalidZoomStep(step) => write!(f, "invalid zoom step {step}"),
            Self::InvalidScale(scale) => write!(f, "invalid initial scale {scale}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A toggle request that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The tag is not declared by any attribute definition.
    UnknownTag(AttributeTag),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag(tag) => write!(f, "unknown attribute tag {tag}"),
        }
    }
}

impl std::error::Error for SelectionError {}
