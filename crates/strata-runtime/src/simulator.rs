#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] without a browser, recording every
//! executed command and capturing frames as [`DrawOp`] lists.
//!
//! # Example
//!
//! ```ignore
//! use strata_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(compositor).with_assets(store);
//! sim.init();
//! sim.send(Msg::toggle("Drach", true));
//! let ops = sim.capture_frame();
//! // Assert on the draw calls...
//! ```

use crate::assets::AssetStore;
use crate::program::{Cmd, Frame, Model};
use crate::render::RenderReport;
use crate::surface::{DrawOp, RecordingSurface};

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Message sent to model (not stored, just noted).
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// Log message emitted.
    Log(String),
    /// Frame requested.
    Redraw,
}

/// Deterministic simulator for [`Model`] testing.
///
/// Frames are only produced by [`capture_frame`](Self::capture_frame);
/// `Cmd::Redraw` is counted but does not render on its own.
pub struct ProgramSimulator<M: Model> {
    model: M,
    /// Images available to the view, keyed and labelled by source.
    assets: AssetStore<String>,
    frames: Vec<Vec<DrawOp>>,
    reports: Vec<RenderReport>,
    command_log: Vec<CmdRecord>,
    logs: Vec<String>,
    redraws: usize,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model and no loaded images.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            assets: AssetStore::new(),
            frames: Vec::new(),
            reports: Vec::new(),
            command_log: Vec::new(),
            logs: Vec::new(),
            redraws: 0,
        }
    }

    /// Use `assets` for every captured frame.
    #[must_use]
    pub fn with_assets(mut self, assets: AssetStore<String>) -> Self {
        self.assets = assets;
        self
    }

    /// Initialize the model by calling `Model::init()` and executing returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Send a specific message to the model.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Send each message in order.
    pub fn send_all(&mut self, msgs: impl IntoIterator<Item = M::Message>) {
        for msg in msgs {
            self.send(msg);
        }
    }

    /// Render the current state into a fresh recording surface and keep it.
    pub fn capture_frame(&mut self) -> &[DrawOp] {
        let mut surface = RecordingSurface::new();
        let mut frame = Frame::new(&mut surface, &self.assets);
        self.model.view(&mut frame);
        self.reports.push(frame.report);
        self.frames.push(surface.take_ops());
        self.frames.last().map(Vec::as_slice).unwrap_or_default()
    }

    /// Get all captured frames.
    pub fn frames(&self) -> &[Vec<DrawOp>] {
        &self.frames
    }

    /// Get the most recently captured frame, if any.
    pub fn last_frame(&self) -> Option<&[DrawOp]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Render report of the most recently captured frame.
    pub fn last_report(&self) -> Option<&RenderReport> {
        self.reports.last()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Number of `Cmd::Redraw` executed so far.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Get all log messages emitted via `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
        self.reports.clear();
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    pub fn clear_command_log(&mut self) {
        self.command_log.clear();
    }

    /// Execute a command without a surface.
    ///
    /// Cmd::Msg recurses through update; Cmd::Log records the text.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
            Cmd::Redraw => {
                self.redraws += 1;
                self.command_log.push(CmdRecord::Redraw);
            }
        }
    }
}
