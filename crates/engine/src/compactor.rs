// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job index compaction.
//!
//! Detail hashes expire on their own while index entries do not, so the
//! index accumulates ids whose detail is gone. Compaction rewrites each
//! index slot with the `id` field of its detail hash (empty when the hash
//! is gone) and then drops the empty slots. Order is preserved.
//!
//! The pass is idempotent and needs no lock. A record racing with it can at
//! worst lose its index entry early, which is acceptable given a 30-day
//! detail lifetime. Tag structures are never touched.

use crate::error::StatsError;
use jobstats_core::keys::DETAIL_ID_FIELD;
use jobstats_core::{Clock, FeatureGate, KeySpace};
use jobstats_storage::StatsStore;
use std::sync::Arc;

/// Outcome of one compaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// False when the feature gate was off and the store was not touched
    pub ran: bool,
    /// Index entries removed because their detail had expired
    pub removed: u64,
}

/// Removes index entries whose job detail no longer exists.
///
/// Store errors propagate; the scheduler that invokes cleanup retries on
/// its next tick.
pub struct Compactor<S: StatsStore, C: Clock> {
    store: Arc<S>,
    gate: Arc<FeatureGate<C>>,
    keys: KeySpace,
}

impl<S: StatsStore, C: Clock> Compactor<S, C> {
    pub fn new(store: Arc<S>, gate: Arc<FeatureGate<C>>) -> Self {
        Self { store, gate, keys: KeySpace::default() }
    }

    pub fn with_keys(mut self, keys: KeySpace) -> Self {
        self.keys = keys;
        self
    }

    pub fn cleanup(&self) -> Result<CleanupReport, StatsError> {
        if !self.gate.enabled() {
            return Ok(CleanupReport::default());
        }

        let index = self.keys.job_index();
        self.store.reindex_from_hash(&index, &self.keys.job_detail_pattern(), DETAIL_ID_FIELD)?;
        let removed = self.store.remove_value(&index, "")?;

        if removed > 0 {
            tracing::info!(index = %index, removed, "removed expired entries from job index");
        } else {
            tracing::debug!(index = %index, "job index already compact");
        }
        Ok(CleanupReport { ran: true, removed })
    }
}

#[cfg(test)]
#[path = "compactor_tests.rs"]
mod tests;
