#![forbid(unsafe_code)]

//! Asset loader contract and the preload gate.
//!
//! Every base and attribute image is requested up front. [`preload`] joins
//! all load futures and returns once each has either produced an image or
//! failed; failures are logged and recorded, never fatal. Rendering and
//! interaction start only after that, which the runtime enforces by requiring
//! an [`AssetStore`] to build a [`Program`](crate::Program).

use std::collections::HashMap;
use std::fmt;

use futures::future::{LocalBoxFuture, join_all};
use tracing::{error, info};

/// A single image that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetError {
    pub source: String,
    pub reason: String,
}

impl AssetError {
    pub fn new(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error loading image {}: {}", self.source, self.reason)
    }
}

impl std::error::Error for AssetError {}

/// Produces drawable images from resource references.
///
/// Futures are not required to be `Send`; loading happens on the host's
/// single-threaded event loop.
pub trait AssetLoader {
    type Image;

    fn load<'a>(&'a self, source: &'a str) -> LocalBoxFuture<'a, Result<Self::Image, AssetError>>;
}

/// Loaded images keyed by resource reference, plus the failures.
#[derive(Debug, Clone)]
pub struct AssetStore<I> {
    images: HashMap<String, I>,
    failures: Vec<AssetError>,
}

impl<I> Default for AssetStore<I> {
    fn default() -> Self {
        Self {
            images: HashMap::new(),
            failures: Vec::new(),
        }
    }
}

impl<I> AssetStore<I> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, image: I) {
        self.images.insert(source.into(), image);
    }

    pub fn record_failure(&mut self, failure: AssetError) {
        self.failures.push(failure);
    }

    #[must_use]
    pub fn get(&self, source: &str) -> Option<&I> {
        self.images.get(source)
    }

    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.images.contains_key(source)
    }

    /// Number of loaded images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn failures(&self) -> &[AssetError] {
        &self.failures
    }
}

/// Load every source concurrently and wait for all of them to settle.
pub async fn preload<L: AssetLoader>(loader: &L, sources: &[&str]) -> AssetStore<L::Image> {
    let results = join_all(sources.iter().map(|&source| async move {
        let result = loader.load(source).await;
        (source, result)
    }))
    .await;

    let mut store = AssetStore::new();
    for (source, result) in results {
        match result {
            Ok(image) => store.insert(source, image),
            Err(err) => {
                error!(source, reason = %err.reason, "error loading image");
                store.record_failure(err);
            }
        }
    }
    info!(
        requested = sources.len(),
        loaded = store.len(),
        failed = store.failures().len(),
        "asset preload complete"
    );
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{FutureExt, ready};

    struct MapLoader {
        broken: &'static [&'static str],
    }

    impl AssetLoader for MapLoader {
        type Image = String;

        fn load<'a>(&'a self, source: &'a str) -> LocalBoxFuture<'a, Result<String, AssetError>> {
            let result = if self.broken.iter().any(|b| *b == source) {
                Err(AssetError::new(source, "404"))
            } else {
                Ok(format!("img:{source}"))
            };
            ready(result).boxed_local()
        }
    }

    #[test]
    fn all_loaded() {
        let loader = MapLoader { broken: &[] };
        let store = block_on(preload(&loader, &["a.svg", "b.svg"]));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a.svg").map(String::as_str), Some("img:a.svg"));
        assert!(store.failures().is_empty());
    }

    #[test]
    fn failures_do_not_block_the_gate() {
        let loader = MapLoader {
            broken: &["b.svg"],
        };
        let store = block_on(preload(&loader, &["a.svg", "b.svg", "c.svg"]));
        assert_eq!(store.len(), 2);
        assert!(!store.contains("b.svg"));
        assert_eq!(store.failures(), &[AssetError::new("b.svg", "404")]);
    }

    #[test]
    fn empty_source_list_opens_immediately() {
        let loader = MapLoader { broken: &[] };
        let store = block_on(preload(&loader, &[]));
        assert!(store.is_empty());
    }
}
