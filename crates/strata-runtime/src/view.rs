#![forbid(unsafe_code)]

//! Pan and zoom for the drawing surface.
//!
//! The transform maps image-local coordinates to canvas coordinates:
//!
//! ```text
//! canvas = offset + local * scale
//! local  = (canvas - offset) / scale
//! ```
//!
//! Wheel zoom keeps the image point under the cursor fixed. Dragging sets
//! the offset from the pointer position relative to an anchor captured at
//! drag start. There is no inertia.

use strata_core::ViewConfig;

/// Pan offset and zoom scale applied before drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    #[must_use]
    pub const fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    #[must_use]
    pub fn from_config(config: &ViewConfig) -> Self {
        Self::new(config.scale, config.offset_x, config.offset_y)
    }

    /// Canvas point → image-local point.
    #[must_use]
    pub fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }

    /// Image-local point → canvas point.
    #[must_use]
    pub fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    /// Apply one wheel event at canvas point `(x, y)`.
    ///
    /// Returns `false` when the scale is already pinned at the limit in the
    /// wheel's direction.
    pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64, policy: &ZoomPolicy) -> bool {
        let old = self.scale;
        let new = policy.next_scale(old, delta_y);
        if new == old {
            return false;
        }
        let (local_x, local_y) = self.to_local(x, y);
        self.offset_x -= local_x * (new - old);
        self.offset_y -= local_y * (new - old);
        self.scale = new;
        true
    }
}

/// Per-event zoom step and scale limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPolicy {
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            step: 0.1,
            min: 0.125,
            max: 4.0,
        }
    }
}

impl ZoomPolicy {
    #[must_use]
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            step: config.zoom_step,
            min: config.min_scale,
            max: config.max_scale,
        }
    }

    /// Scale after one wheel event. A positive `delta_y` (scrolling down)
    /// zooms out; anything else zooms in.
    #[must_use]
    pub fn next_scale(&self, scale: f64, delta_y: f64) -> f64 {
        let delta = if delta_y > 0.0 { -self.step } else { self.step };
        (scale + delta).clamp(self.min, self.max)
    }
}

/// Pointer position relative to the offset at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    x: f64,
    y: f64,
}

impl DragAnchor {
    #[must_use]
    pub fn begin(pointer_x: f64, pointer_y: f64, view: &ViewTransform) -> Self {
        Self {
            x: pointer_x - view.offset_x,
            y: pointer_y - view.offset_y,
        }
    }

    /// Move the view so the anchor follows the pointer.
    pub fn apply(&self, pointer_x: f64, pointer_y: f64, view: &mut ViewTransform) {
        view.offset_x = pointer_x - self.x;
        view.offset_y = pointer_y - self.y;
    }
}
