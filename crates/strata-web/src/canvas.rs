#![forbid(unsafe_code)]

//! [`Surface`] over a 2D canvas context.

use strata_runtime::{Surface, SurfaceError, ViewTransform};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

fn surface_err(err: JsValue) -> SurfaceError {
    SurfaceError(crate::loader::js_reason(&err))
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        Ok(())
    }

    fn set_transform(&mut self, view: &ViewTransform) -> Result<(), SurfaceError> {
        self.ctx.save();
        self.ctx
            .translate(view.offset_x, view.offset_y)
            .map_err(surface_err)?;
        self.ctx.scale(view.scale, view.scale).map_err(surface_err)
    }

    fn draw_image(&mut self, image: &HtmlImageElement) -> Result<(), SurfaceError> {
        self.ctx
            .draw_image_with_html_image_element(image, 0.0, 0.0)
            .map_err(surface_err)
    }

    fn reset_transform(&mut self) -> Result<(), SurfaceError> {
        self.ctx.restore();
        Ok(())
    }
}
