#![forbid(unsafe_code)]

//! WASM frontend for the Strata compositor.
//!
//! Draws the composite into a `<canvas>` through `CanvasRenderingContext2d`,
//! builds one checkbox per attribute inside a controls container, and routes
//! wheel and mouse input into the compositor. Images are preloaded before
//! any input is accepted.
//!
//! [`RunnerCore`] holds everything that is not JS-specific so it can be
//! exercised natively.

pub mod runner_core;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod controls;
#[cfg(target_arch = "wasm32")]
mod loader;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use runner_core::RunnerCore;

#[cfg(target_arch = "wasm32")]
pub use wasm::StrataWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct StrataWeb;

#[cfg(not(target_arch = "wasm32"))]
impl StrataWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
