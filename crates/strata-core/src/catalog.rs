#![forbid(unsafe_code)]

//! Static catalog of base variants and attribute definitions.
//!
//! The catalog is loaded once at startup and never mutated. Declaration order
//! is significant in two places: it breaks ties between equally good base
//! variants, and it fixes the draw order of attribute overlays.
//!
//! Malformed entries are tolerated. Duplicate attribute definitions keep the
//! first declaration, and a base that lists a tag twice or lists an undeclared
//! tag is kept as written. Each defect is reported with `tracing::warn!` and
//! only reduces how useful the entry is for matching.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Rgb;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifier of one optional overlay layer.
    AttributeTag
}

string_id! {
    /// Identifier of a base variant.
    BaseId
}

/// One optional overlay: its tag, display label, brand color and image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub tag: AttributeTag,
    pub label: String,
    pub color: Rgb,
    #[serde(rename = "src")]
    pub source: String,
}

/// A background illustration and the attribute tags it can host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseVariant {
    pub id: BaseId,
    /// Declared tags. Order is kept for display; matching treats it as a set.
    pub supported: Vec<AttributeTag>,
    #[serde(rename = "src")]
    pub source: String,
}

impl BaseVariant {
    /// Whether this base can host `tag`.
    #[must_use]
    pub fn supports(&self, tag: &AttributeTag) -> bool {
        self.supported.contains(tag)
    }
}

/// Immutable catalog of base variants and attribute definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    bases: Vec<BaseVariant>,
    attributes: Vec<AttributeDef>,
}

impl Catalog {
    /// Build a catalog, tolerating (and reporting) malformed entries.
    #[must_use]
    pub fn new(bases: Vec<BaseVariant>, attributes: Vec<AttributeDef>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(attributes.len());
        for def in attributes {
            if seen.insert(def.tag.clone()) {
                unique.push(def);
            } else {
                warn!(tag = %def.tag, "duplicate attribute definition ignored");
            }
        }

        for base in &bases {
            if base.supported.is_empty() {
                warn!(base = %base.id, "base variant supports no attributes");
            }
            let mut tags = HashSet::new();
            for tag in &base.supported {
                if !tags.insert(tag) {
                    warn!(base = %base.id, tag = %tag, "tag listed twice in base variant");
                }
                if !seen.contains(tag) {
                    warn!(base = %base.id, tag = %tag, "base variant lists an undeclared tag");
                }
            }
        }

        Self {
            bases,
            attributes: unique,
        }
    }

    /// Base variants in declaration order.
    #[must_use]
    pub fn bases(&self) -> &[BaseVariant] {
        &self.bases
    }

    /// Attribute definitions in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeDef] {
        &self.attributes
    }

    #[must_use]
    pub fn base(&self, id: &BaseId) -> Option<&BaseVariant> {
        self.bases.iter().find(|b| &b.id == id)
    }

    #[must_use]
    pub fn attribute(&self, tag: &AttributeTag) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| &a.tag == tag)
    }

    #[must_use]
    pub fn contains_tag(&self, tag: &AttributeTag) -> bool {
        self.attribute(tag).is_some()
    }

    /// Tags supported by `id`; empty for an id the catalog does not know.
    #[must_use]
    pub fn supported_by(&self, id: &BaseId) -> &[AttributeTag] {
        match self.base(id) {
            Some(base) => &base.supported,
            None => &[],
        }
    }

    /// Every image reference the catalog declares, bases first, without repeats.
    #[must_use]
    pub fn asset_sources(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.bases
            .iter()
            .map(|b| b.source.as_str())
            .chain(self.attributes.iter().map(|a| a.source.as_str()))
            .filter(|src| seen.insert(*src))
            .collect()
    }
}
