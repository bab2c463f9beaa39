#![forbid(unsafe_code)]

//! Image preloading through `HtmlImageElement::decode`.

use futures::future::{FutureExt, LocalBoxFuture};
use strata_runtime::{AssetError, AssetLoader};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Best-effort message from a rejected JS value.
pub(crate) fn js_reason(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLoader;

impl AssetLoader for ImageLoader {
    type Image = HtmlImageElement;

    fn load<'a>(
        &'a self,
        source: &'a str,
    ) -> LocalBoxFuture<'a, Result<HtmlImageElement, AssetError>> {
        async move {
            let image =
                HtmlImageElement::new().map_err(|e| AssetError::new(source, js_reason(&e)))?;
            image.set_src(source);
            JsFuture::from(image.decode())
                .await
                .map_err(|e| AssetError::new(source, js_reason(&e)))?;
            Ok(image)
        }
        .boxed_local()
    }
}
