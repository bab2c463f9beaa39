#![forbid(unsafe_code)]

//! The compositor model.
//!
//! Translates host input into selection changes and view transform updates,
//! and draws the composite through [`render`]. Every host event arrives as a
//! [`Msg`]; the host never mutates state directly.

use strata_core::{
    AttributeTag, Catalog, CompositorConfig, Resolution, SelectionState, ToggleStyle, resolve,
};
use tracing::{debug, info, warn};

use crate::program::{Cmd, Frame, Model};
use crate::render::render;
use crate::surface::Surface;
use crate::view::{DragAnchor, ViewTransform, ZoomPolicy};

/// Host input, in canvas pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A checkbox changed.
    Toggle { tag: AttributeTag, active: bool },
    Wheel { x: f64, y: f64, delta_y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
}

impl Msg {
    pub fn toggle(tag: impl Into<AttributeTag>, active: bool) -> Self {
        Self::Toggle {
            tag: tag.into(),
            active,
        }
    }
}

/// What a host needs to draw one attribute checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleView {
    pub tag: AttributeTag,
    pub label: String,
    pub active: bool,
    pub style: ToggleStyle,
}

/// Selection, view transform and drag state for one canvas.
#[derive(Debug, Clone)]
pub struct Compositor {
    catalog: Catalog,
    selection: SelectionState,
    view: ViewTransform,
    zoom: ZoomPolicy,
    drag: Option<DragAnchor>,
    /// Tags dropped by base switches that the host has not yet unchecked.
    pruned: Vec<AttributeTag>,
    last_resolution: Option<Resolution>,
}

impl Compositor {
    pub fn new(
        catalog: Catalog,
        selection: SelectionState,
        view: ViewTransform,
        zoom: ZoomPolicy,
    ) -> Self {
        Self {
            catalog,
            selection,
            view,
            zoom,
            drag: None,
            pruned: Vec::new(),
            last_resolution: None,
        }
    }

    pub fn from_config(config: &CompositorConfig) -> Self {
        Self::new(
            config.catalog.clone(),
            config.initial_selection(),
            ViewTransform::from_config(&config.view),
            ZoomPolicy::from_config(&config.view),
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn zoom_policy(&self) -> &ZoomPolicy {
        &self.zoom
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Resolution from the most recent toggle or init pass.
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    /// Drain tags pruned by base switches so the host can uncheck them.
    pub fn take_pruned(&mut self) -> Vec<AttributeTag> {
        std::mem::take(&mut self.pruned)
    }

    /// Checkbox state for every attribute, in declaration order.
    pub fn toggle_views(&self) -> Vec<ToggleView> {
        self.catalog
            .attributes()
            .iter()
            .map(|def| {
                let active = self.selection.is_active(&def.tag);
                ToggleView {
                    tag: def.tag.clone(),
                    label: def.label.clone(),
                    active,
                    style: ToggleStyle::for_state(def.color, active),
                }
            })
            .collect()
    }

    /// Record `resolution` and build the status command for a switch.
    fn settle(&mut self, resolution: Resolution) -> Cmd<Msg> {
        let cmd = if resolution.switched() {
            info!(
                from = %resolution.previous,
                to = %resolution.base,
                pruned = resolution.pruned.len(),
                "base switched"
            );
            self.pruned.extend(resolution.pruned.iter().cloned());
            Cmd::log(format!("Changed base to: {}", resolution.base))
        } else {
            Cmd::none()
        };
        self.last_resolution = Some(resolution);
        cmd
    }

    fn on_toggle(&mut self, tag: AttributeTag, active: bool) -> Cmd<Msg> {
        match self.selection.toggle(&tag, active, &self.catalog) {
            Ok(resolution) => {
                let status = self.settle(resolution);
                Cmd::batch(vec![status, Cmd::redraw()])
            }
            Err(err) => {
                warn!(%err, "toggle ignored");
                Cmd::none()
            }
        }
    }
}

impl Model for Compositor {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        let resolution = resolve(&self.selection, &self.catalog);
        self.selection.apply(&resolution);
        let status = self.settle(resolution);
        Cmd::batch(vec![status, Cmd::redraw()])
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Toggle { tag, active } => self.on_toggle(tag, active),
            Msg::Wheel { x, y, delta_y } => {
                if self.view.zoom_at(x, y, delta_y, &self.zoom) {
                    debug!(scale = self.view.scale, "zoomed");
                    Cmd::redraw()
                } else {
                    Cmd::none()
                }
            }
            Msg::PointerDown { x, y } => {
                self.drag = Some(DragAnchor::begin(x, y, &self.view));
                Cmd::none()
            }
            Msg::PointerMove { x, y } => match self.drag {
                Some(anchor) => {
                    anchor.apply(x, y, &mut self.view);
                    Cmd::redraw()
                }
                None => Cmd::none(),
            },
            Msg::PointerUp | Msg::PointerLeave => {
                self.drag = None;
                Cmd::none()
            }
        }
    }

    fn view<S: Surface>(&self, frame: &mut Frame<'_, S>) {
        frame.report = render(
            &mut *frame.surface,
            frame.assets,
            &self.catalog,
            &self.selection,
            &self.view,
        );
    }
}
