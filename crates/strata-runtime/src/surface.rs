#![forbid(unsafe_code)]

//! Rendering-surface contract.
//!
//! The renderer only needs four operations: clear, apply a view transform,
//! draw an image at the transformed origin, and drop the transform again.
//! Browser hosts implement this over a 2D canvas context; tests use
//! [`RecordingSurface`].

use std::fmt;

use crate::view::ViewTransform;

/// A drawing operation the surface rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceError(pub String);

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface error: {}", self.0)
    }
}

impl std::error::Error for SurfaceError {}

/// A drawable target.
pub trait Surface {
    /// Decoded image handle produced by the host's asset loader.
    type Image;

    fn clear(&mut self) -> Result<(), SurfaceError>;

    fn set_transform(&mut self, view: &ViewTransform) -> Result<(), SurfaceError>;

    /// Draw `image` at the origin of the current transform.
    fn draw_image(&mut self, image: &Self::Image) -> Result<(), SurfaceError>;

    fn reset_transform(&mut self) -> Result<(), SurfaceError>;
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Transform(ViewTransform),
    Image(String),
    Reset,
}

/// Surface that records calls instead of drawing. Images are plain labels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    failing: Vec<String>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every draw of `image`.
    #[must_use]
    pub fn failing_on(mut self, image: impl Into<String>) -> Self {
        self.failing.push(image.into());
        self
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Labels of the images drawn, in order.
    #[must_use]
    pub fn images(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Take the recorded operations, leaving the surface empty.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    type Image = String;

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn set_transform(&mut self, view: &ViewTransform) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Transform(*view));
        Ok(())
    }

    fn draw_image(&mut self, image: &String) -> Result<(), SurfaceError> {
        if self.failing.contains(image) {
            return Err(SurfaceError(format!("cannot draw {image}")));
        }
        self.ops.push(DrawOp::Image(image.clone()));
        Ok(())
    }

    fn reset_transform(&mut self) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Reset);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut surface = RecordingSurface::new();
        surface.clear().unwrap();
        surface.set_transform(&ViewTransform::IDENTITY).unwrap();
        surface.draw_image(&"base".to_string()).unwrap();
        surface.reset_transform().unwrap();
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Clear,
                DrawOp::Transform(ViewTransform::IDENTITY),
                DrawOp::Image("base".into()),
                DrawOp::Reset,
            ]
        );
        assert_eq!(surface.images(), vec!["base"]);
    }

    #[test]
    fn failing_image_is_rejected_and_not_recorded() {
        let mut surface = RecordingSurface::new().failing_on("broken");
        assert!(surface.draw_image(&"broken".to_string()).is_err());
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn take_ops_drains() {
        let mut surface = RecordingSurface::new();
        surface.clear().unwrap();
        assert_eq!(surface.take_ops(), vec![DrawOp::Clear]);
        assert!(surface.ops().is_empty());
    }
}
