#![forbid(unsafe_code)]

//! Strata Runtime
//!
//! Ties the selection logic from `strata-core` to a drawing surface through
//! an Elm-style update/render loop. No JS or DOM types appear here; hosts
//! supply a [`Surface`] and an [`AssetLoader`].
//!
//! # Key Components
//!
//! - [`Program`] - Owns a model, a surface and the loaded assets; runs update → render
//! - [`Model`] / [`Cmd`] - State transitions and their side effects
//! - [`Compositor`] - The application model: toggles, zoom, drag
//! - [`ViewTransform`] - Pan offset and zoom scale
//! - [`preload`] - Join-all asset gate that opens once every image resolved
//! - [`render`] - Pure composite of base plus active overlays

pub mod assets;
pub mod compositor;
pub mod program;
pub mod render;
pub mod simulator;
pub mod surface;
pub mod view;

pub use assets::{AssetError, AssetLoader, AssetStore, preload};
pub use compositor::{Compositor, Msg, ToggleView};
pub use program::{Cmd, Frame, Model, Program, StepResult};
pub use render::{RenderReport, render};
pub use surface::{DrawOp, RecordingSurface, Surface, SurfaceError};
pub use view::{DragAnchor, ViewTransform, ZoomPolicy};
