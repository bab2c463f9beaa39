#![forbid(unsafe_code)]

//! Selection state: the active attribute tags and the displayed base.
//!
//! The state only changes through [`SelectionState::toggle`] (user input)
//! and [`SelectionState::apply`] (a resolution pass). Starting from a
//! consistent state, and with every declared tag hosted by at least one base,
//! each toggle leaves the active tags a subset of the displayed base's tags.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::{AttributeTag, BaseId, Catalog};
use crate::error::SelectionError;
use crate::resolver::{Resolution, resolve};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    active: BTreeSet<AttributeTag>,
    current_base: BaseId,
}

impl SelectionState {
    pub fn new<B, I, T>(current_base: B, active: I) -> Self
    where
        B: Into<BaseId>,
        I: IntoIterator<Item = T>,
        T: Into<AttributeTag>,
    {
        Self {
            active: active.into_iter().map(Into::into).collect(),
            current_base: current_base.into(),
        }
    }

    #[must_use]
    pub fn active_tags(&self) -> &BTreeSet<AttributeTag> {
        &self.active
    }

    #[must_use]
    pub fn current_base(&self) -> &BaseId {
        &self.current_base
    }

    #[must_use]
    pub fn is_active(&self, tag: &AttributeTag) -> bool {
        self.active.contains(tag)
    }

    /// Apply the outcome of a resolution pass: switch base, drop pruned tags.
    pub fn apply(&mut self, resolution: &Resolution) {
        if !resolution.switched() {
            return;
        }
        self.current_base = resolution.base.clone();
        for tag in &resolution.pruned {
            self.active.remove(tag);
        }
    }

    /// Activate or deactivate `tag`, then run and apply a resolution pass.
    ///
    /// Unknown tags are rejected and leave the state untouched.
    pub fn toggle(
        &mut self,
        tag: &AttributeTag,
        active: bool,
        catalog: &Catalog,
    ) -> Result<Resolution, SelectionError> {
        if !catalog.contains_tag(tag) {
            return Err(SelectionError::UnknownTag(tag.clone()));
        }
        if active {
            self.active.insert(tag.clone());
        } else {
            self.active.remove(tag);
        }
        debug!(tag = %tag, active, "attribute toggled");

        let resolution = resolve(self, catalog);
        self.apply(&resolution);
        Ok(resolution)
    }

    /// Whether every active tag is hosted by the displayed base.
    #[must_use]
    pub fn is_consistent(&self, catalog: &Catalog) -> bool {
        let supported = catalog.supported_by(&self.current_base);
        self.active.iter().all(|t| supported.contains(t))
    }
}
