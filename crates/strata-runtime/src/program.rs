#![forbid(unsafe_code)]

//! Elm-style program runtime.
//!
//! A [`Model`] owns application state. Messages go through
//! [`Model::update`], which returns a [`Cmd`] describing follow-up work.
//! [`Program`] executes those commands and renders a frame into its
//! [`Surface`] whenever a command asked for one.
//!
//! # Lifecycle
//!
//! ```text
//! Program::new(model, surface, assets)   // assets already preloaded
//!   └─ init()       → Model::init, execute Cmd, render first frame
//!   └─ dispatch(m)  → Model::update, execute Cmd, render if Cmd::Redraw ran
//! ```
//!
//! A program cannot be built without an [`AssetStore`], so nothing reaches
//! `update` or the surface before preloading has settled.

use std::fmt;

use tracing::{debug, info, trace};

use crate::assets::AssetStore;
use crate::render::RenderReport;
use crate::surface::Surface;

/// Application state driven by messages.
pub trait Model {
    type Message;

    /// Called once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Draw the current state into `frame`.
    fn view<S: Surface>(&self, frame: &mut Frame<'_, S>);
}

/// Follow-up work returned from [`Model::init`] and [`Model::update`].
#[derive(Default)]
pub enum Cmd<M> {
    #[default]
    None,
    /// Feed another message through `update`.
    Msg(M),
    /// Run each command in order.
    Batch(Vec<Cmd<M>>),
    /// Record a status line for the host.
    Log(String),
    /// Render a frame after the current message settles.
    Redraw,
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(text: impl Into<String>) -> Self {
        Self::Log(text.into())
    }

    #[inline]
    pub fn redraw() -> Self {
        Self::Redraw
    }

    /// Collapse trivial batches: empty becomes `None`, singletons unwrap.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    /// Variant name, for tracing.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Msg(_) => "Msg",
            Self::Batch(_) => "Batch",
            Self::Log(_) => "Log",
            Self::Redraw => "Redraw",
        }
    }
}

impl<M> fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Msg(_) => write!(f, "Msg(..)"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Log(text) => f.debug_tuple("Log").field(text).finish(),
            Self::Redraw => write!(f, "Redraw"),
        }
    }
}

/// Render target handed to [`Model::view`].
pub struct Frame<'a, S: Surface> {
    pub surface: &'a mut S,
    pub assets: &'a AssetStore<S::Image>,
    /// Filled in by the view.
    pub report: RenderReport,
}

impl<'a, S: Surface> Frame<'a, S> {
    pub fn new(surface: &'a mut S, assets: &'a AssetStore<S::Image>) -> Self {
        Self {
            surface,
            assets,
            report: RenderReport::default(),
        }
    }
}

/// Outcome of [`Program::init`] or [`Program::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether a frame was rendered.
    pub rendered: bool,
    /// Frames rendered so far.
    pub frame_idx: u64,
}

/// Drives a [`Model`] against a [`Surface`].
pub struct Program<M: Model, S: Surface> {
    model: M,
    surface: S,
    assets: AssetStore<S::Image>,
    frame_idx: u64,
    logs: Vec<String>,
    last_report: Option<RenderReport>,
}

impl<M: Model, S: Surface> Program<M, S> {
    pub fn new(model: M, surface: S, assets: AssetStore<S::Image>) -> Self {
        Self {
            model,
            surface,
            assets,
            frame_idx: 0,
            logs: Vec::new(),
            last_report: None,
        }
    }

    /// Run `Model::init` and render the first frame. Call exactly once.
    pub fn init(&mut self) -> StepResult {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.render_frame();
        self.step_result(true)
    }

    /// Route one message through `update`.
    pub fn dispatch(&mut self, msg: M::Message) -> StepResult {
        let cmd = self.model.update(msg);
        let rendered = self.execute_cmd(cmd);
        if rendered {
            self.render_frame();
        }
        self.step_result(rendered)
    }

    /// Render regardless of pending commands.
    pub fn redraw(&mut self) -> StepResult {
        self.render_frame();
        self.step_result(true)
    }

    /// Execute `cmd`; true when any part requested a redraw.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) -> bool {
        trace!(cmd = cmd.type_name(), "execute");
        match cmd {
            Cmd::None => false,
            Cmd::Msg(m) => {
                let next = self.model.update(m);
                self.execute_cmd(next)
            }
            Cmd::Batch(cmds) => cmds
                .into_iter()
                .fold(false, |redraw, c| self.execute_cmd(c) || redraw),
            Cmd::Log(text) => {
                info!("{text}");
                self.logs.push(text);
                false
            }
            Cmd::Redraw => true,
        }
    }

    fn render_frame(&mut self) {
        let mut frame = Frame::new(&mut self.surface, &self.assets);
        self.model.view(&mut frame);
        let report = frame.report;
        self.frame_idx += 1;
        debug!(
            frame_idx = self.frame_idx,
            drawn = report.drawn.len(),
            skipped = report.skipped.len(),
            "frame rendered"
        );
        self.last_report = Some(report);
    }

    fn step_result(&self, rendered: bool) -> StepResult {
        StepResult {
            rendered,
            frame_idx: self.frame_idx,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn assets(&self) -> &AssetStore<S::Image> {
        &self.assets
    }

    /// Frames rendered so far.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Report from the most recent frame.
    pub fn last_report(&self) -> Option<&RenderReport> {
        self.last_report.as_ref()
    }

    /// Drain status lines emitted via `Cmd::Log`.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}
