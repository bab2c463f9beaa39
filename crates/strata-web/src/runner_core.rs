#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping `Program<Compositor, S>`.
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here.

use strata_core::{AttributeTag, CompositorConfig, NoteDef};
use strata_runtime::{
    AssetStore, Compositor, Msg, Program, RenderReport, StepResult, Surface, ToggleView,
};

/// Compositor runner bound to one surface and one preloaded asset store.
pub struct RunnerCore<S: Surface> {
    inner: Program<Compositor, S>,
    notes: Vec<NoteDef>,
}

impl<S: Surface> RunnerCore<S> {
    /// Build a runner from `config`. `assets` must already be preloaded.
    pub fn new(config: &CompositorConfig, surface: S, assets: AssetStore<S::Image>) -> Self {
        Self {
            inner: Program::new(Compositor::from_config(config), surface, assets),
            notes: config.notes.clone(),
        }
    }

    /// Run the initial resolution pass and render the first frame. Call exactly once.
    pub fn init(&mut self) -> StepResult {
        self.inner.init()
    }

    /// A checkbox for `tag` changed to `active`.
    pub fn toggle(&mut self, tag: &str, active: bool) -> StepResult {
        self.inner.dispatch(Msg::toggle(tag, active))
    }

    /// Wheel event at canvas point `(x, y)`.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> StepResult {
        self.inner.dispatch(Msg::Wheel { x, y, delta_y })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> StepResult {
        self.inner.dispatch(Msg::PointerDown { x, y })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> StepResult {
        self.inner.dispatch(Msg::PointerMove { x, y })
    }

    pub fn pointer_up(&mut self) -> StepResult {
        self.inner.dispatch(Msg::PointerUp)
    }

    pub fn pointer_leave(&mut self) -> StepResult {
        self.inner.dispatch(Msg::PointerLeave)
    }

    /// Tags a base switch dropped since the last call.
    pub fn take_pruned(&mut self) -> Vec<AttributeTag> {
        self.inner.model_mut().take_pruned()
    }

    /// Checkbox state and colors for every attribute.
    pub fn toggle_views(&self) -> Vec<ToggleView> {
        self.inner.model().toggle_views()
    }

    pub fn notes(&self) -> &[NoteDef] {
        &self.notes
    }

    /// Take accumulated status lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        self.inner.take_logs()
    }

    pub fn last_report(&self) -> Option<&RenderReport> {
        self.inner.last_report()
    }

    pub fn compositor(&self) -> &Compositor {
        self.inner.model()
    }

    pub fn surface(&self) -> &S {
        self.inner.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.inner.surface_mut()
    }

    /// Frames rendered so far.
    pub fn frame_idx(&self) -> u64 {
        self.inner.frame_idx()
    }
}
