#![forbid(unsafe_code)]

//! Strata Core
//!
//! Static catalog data and the base-selection logic for the Strata
//! layered-image compositor. Nothing in this crate performs IO; the runtime
//! and web crates supply rendering and asset loading.
//!
//! # Key Components
//!
//! - [`Catalog`] - Base variants and attribute definitions, immutable after load
//! - [`SelectionState`] - Active attribute tags plus the displayed base
//! - [`resolve`] - The resolution pass that picks a base and prunes tags
//! - [`CompositorConfig`] - JSON configuration feed, including the built-in catalog

pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod resolver;
pub mod selection;

pub use catalog::{AttributeDef, AttributeTag, BaseId, BaseVariant, Catalog};
pub use color::{Rgb, ToggleStyle};
pub use config::{CompositorConfig, InitialSelection, NoteDef, ViewConfig};
pub use error::{ColorParseError, ConfigError, SelectionError};
pub use resolver::{CandidateScore, Resolution, resolve, score_candidates};
pub use selection::SelectionState;
