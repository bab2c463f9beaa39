#![forbid(unsafe_code)]

//! Base-selection resolver.
//!
//! A resolution pass decides which base variant should be displayed for the
//! current active tags, and which tags must be dropped when the base changes.
//!
//! # Policy
//!
//! For each base `B`, in catalog declaration order:
//!
//! - `match_count(B)` is the number of active tags `B` supports.
//! - `introduces_new_tag(B)` holds when some active tag is supported by `B`
//!   but not by the base currently displayed.
//!
//! Only bases that introduce a new tag are eligible. The eligible base with
//! the highest `match_count` wins; only a strictly greater count replaces the
//! running best, so the earliest declaration wins a tie. With no eligible
//! base the displayed base stays.
//!
//! Pruning happens only on an actual switch. Tags the unchanged current base
//! cannot host stay active until a later switch removes them.
//!
//! # Determinism
//!
//! `resolve` is a pure function of the active tags, the current base id and
//! the catalog. An unknown current base is treated as supporting nothing.

use tracing::debug;

use crate::catalog::{AttributeTag, BaseId, BaseVariant, Catalog};
use crate::selection::SelectionState;

/// Evidence for one base variant considered by a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateScore {
    pub base: BaseId,
    pub match_count: usize,
    pub introduces_new_tag: bool,
}

impl CandidateScore {
    /// Whether this base may replace the current one.
    #[must_use]
    pub const fn eligible(&self) -> bool {
        self.introduces_new_tag
    }
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Base displayed before the pass.
    pub previous: BaseId,
    /// Base to display after the pass.
    pub base: BaseId,
    /// Active tags the new base cannot host, in tag order. Empty unless the
    /// base switched.
    pub pruned: Vec<AttributeTag>,
}

impl Resolution {
    /// Whether the pass changed the displayed base.
    #[must_use]
    pub fn switched(&self) -> bool {
        self.previous != self.base
    }

    fn unchanged(current: &BaseId) -> Self {
        Self {
            previous: current.clone(),
            base: current.clone(),
            pruned: Vec::new(),
        }
    }
}

fn score(state: &SelectionState, current: &[AttributeTag], base: &BaseVariant) -> CandidateScore {
    let mut match_count = 0;
    let mut introduces_new_tag = false;
    for tag in state.active_tags().iter().filter(|t| base.supports(t)) {
        match_count += 1;
        introduces_new_tag |= !current.contains(tag);
    }
    CandidateScore {
        base: base.id.clone(),
        match_count,
        introduces_new_tag,
    }
}

/// Score every base variant against the current selection, in declaration order.
#[must_use]
pub fn score_candidates(state: &SelectionState, catalog: &Catalog) -> Vec<CandidateScore> {
    let current = catalog.supported_by(state.current_base());
    catalog
        .bases()
        .iter()
        .map(|base| score(state, current, base))
        .collect()
}

/// Run one resolution pass. Does not mutate `state`; see [`SelectionState::apply`].
#[must_use]
pub fn resolve(state: &SelectionState, catalog: &Catalog) -> Resolution {
    let current_id = state.current_base();
    let scores = score_candidates(state, catalog);

    let mut best: Option<&CandidateScore> = None;
    for candidate in scores.iter().filter(|c| c.eligible()) {
        if best.is_none_or(|b| candidate.match_count > b.match_count) {
            best = Some(candidate);
        }
    }

    let Some(best) = best else {
        debug!(base = %current_id, "no eligible base, keeping current");
        return Resolution::unchanged(current_id);
    };
    if &best.base == current_id {
        return Resolution::unchanged(current_id);
    }

    let target = catalog.supported_by(&best.base);
    let pruned: Vec<AttributeTag> = state
        .active_tags()
        .iter()
        .filter(|tag| !target.contains(tag))
        .cloned()
        .collect();

    debug!(
        from = %current_id,
        to = %best.base,
        match_count = best.match_count,
        pruned = pruned.len(),
        "base switch selected"
    );

    Resolution {
        previous: current_id.clone(),
        base: best.base.clone(),
        pruned,
    }
}
