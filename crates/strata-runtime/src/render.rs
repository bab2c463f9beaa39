#![forbid(unsafe_code)]

//! Composite renderer.
//!
//! Draws the displayed base, then each active attribute overlay in catalog
//! declaration order, under the current view transform. The renderer makes
//! no decisions; it is a pure function of its inputs plus the surface calls.
//! Missing images and rejected draws are skipped with a warning.

use strata_core::{Catalog, SelectionState};
use tracing::{debug_span, warn};

use crate::assets::AssetStore;
use crate::surface::Surface;
use crate::view::ViewTransform;

/// Which image references a render pass drew or skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub drawn: Vec<String>,
    pub skipped: Vec<String>,
}

impl RenderReport {
    /// Whether every requested layer was drawn.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

fn draw_layer<S: Surface>(
    surface: &mut S,
    assets: &AssetStore<S::Image>,
    source: &str,
    report: &mut RenderReport,
) {
    let Some(image) = assets.get(source) else {
        warn!(source, "image not loaded, skipping layer");
        report.skipped.push(source.to_owned());
        return;
    };
    match surface.draw_image(image) {
        Ok(()) => report.drawn.push(source.to_owned()),
        Err(err) => {
            warn!(source, %err, "draw failed, skipping layer");
            report.skipped.push(source.to_owned());
        }
    }
}

/// Clear `surface` and draw the composite for `selection`.
pub fn render<S: Surface>(
    surface: &mut S,
    assets: &AssetStore<S::Image>,
    catalog: &Catalog,
    selection: &SelectionState,
    view: &ViewTransform,
) -> RenderReport {
    let _span = debug_span!(
        "render",
        base = %selection.current_base(),
        active = selection.active_tags().len(),
        scale = view.scale
    )
    .entered();

    let mut report = RenderReport::default();
    if let Err(err) = surface.clear() {
        warn!(%err, "surface clear failed");
    }
    if let Err(err) = surface.set_transform(view) {
        warn!(%err, "surface transform failed");
    }

    match catalog.base(selection.current_base()) {
        Some(base) => draw_layer(surface, assets, &base.source, &mut report),
        None => warn!(base = %selection.current_base(), "base not in catalog, nothing to draw"),
    }

    for def in catalog
        .attributes()
        .iter()
        .filter(|def| selection.is_active(&def.tag))
    {
        draw_layer(surface, assets, &def.source, &mut report);
    }

    if let Err(err) = surface.reset_transform() {
        warn!(%err, "surface reset failed");
    }
    report
}
