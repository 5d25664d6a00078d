// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job completion telemetry.
//!
//! Each completed job becomes one pipelined batch touching all four
//! structures (see [`KeySpace`]). The recorder never reads before writing.

use crate::error::StatsError;
use indexmap::IndexMap;
use jobstats_core::keys::DETAIL_ID_FIELD;
use jobstats_core::{Clock, CompletedJob, FeatureGate, KeySpace, Worker};
use jobstats_storage::{Batch, StatsStore};
use std::sync::Arc;
use std::time::Duration;

/// How long a job detail hash lives after the job completes
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Writes job completion records to the store.
///
/// Failures are logged via tracing but never propagate; recording must not
/// break or slow down the job completion path.
pub struct Recorder<S: StatsStore, C: Clock> {
    store: Arc<S>,
    gate: Arc<FeatureGate<C>>,
    clock: C,
    keys: KeySpace,
    retention: Duration,
}

impl<S: StatsStore, C: Clock> Recorder<S, C> {
    pub fn new(store: Arc<S>, gate: Arc<FeatureGate<C>>, clock: C) -> Self {
        Self { store, gate, clock, keys: KeySpace::default(), retention: DEFAULT_RETENTION }
    }

    pub fn with_keys(mut self, keys: KeySpace) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Record a completed job, logging and discarding any failure.
    pub fn record(&self, job: &CompletedJob, worker: &Worker) {
        if let Err(e) = self.try_record(job, worker) {
            tracing::warn!(
                job_id = %job.id,
                tag = %job.tag,
                worker = %worker.name,
                error = %e,
                "failed saving job stats"
            );
        }
    }

    /// Record a completed job, returning any failure to the caller.
    ///
    /// A disabled gate is not an error: the call returns `Ok` without
    /// touching the store.
    pub fn try_record(&self, job: &CompletedJob, worker: &Worker) -> Result<(), StatsError> {
        if !self.gate.enabled() {
            return Ok(());
        }

        let finished_at_ms = self.clock.epoch_ms();
        let batch = self.completion_batch(job, worker, finished_at_ms)?;
        self.store.apply(&batch)?;
        tracing::debug!(job_id = %job.id, tag = %job.tag, "saved job stats");
        Ok(())
    }

    /// The writes for one completed job, in submission order.
    pub fn completion_batch(
        &self,
        job: &CompletedJob,
        worker: &Worker,
        finished_at_ms: u64,
    ) -> Result<Batch, StatsError> {
        let detail = detail_fields(job, worker, finished_at_ms)?;
        let detail_key = self.keys.job_detail(&job.id);
        let expires_at_ms = finished_at_ms.saturating_add(self.retention.as_millis() as u64);

        Ok(Batch::new()
            .push_front(self.keys.job_index(), job.id.as_str())
            .sorted_set_add(self.keys.tags(), job.tag.as_str(), 0.0)
            .sorted_set_incr(self.keys.tag_counts(), job.tag.as_str(), 1.0)
            .hash_write(detail_key.clone(), detail.into_iter().collect())
            .expire_at(detail_key, expires_at_ms))
    }
}

/// Job attributes followed by the derived completion fields.
///
/// `id` is written first when the attributes lack it, since the compactor
/// resolves index entries through it.
fn detail_fields(
    job: &CompletedJob,
    worker: &Worker,
    finished_at_ms: u64,
) -> Result<IndexMap<String, String>, StatsError> {
    let run_time_ms = job
        .run_time_ms(finished_at_ms)
        .ok_or_else(|| StatsError::MissingLockedAt(job.id.clone()))?;

    let mut detail = IndexMap::with_capacity(job.attributes.len() + 5);
    if !job.attributes.contains_key(DETAIL_ID_FIELD) {
        detail.insert(DETAIL_ID_FIELD.to_string(), job.id.to_string());
    }
    detail.extend(job.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
    detail.insert("finished_at".to_string(), finished_at_ms.to_string());
    detail.insert("worker".to_string(), worker.name.to_string());
    detail.insert("full_command".to_string(), job.full_command.clone());
    detail.insert("run_time".to_string(), run_time_ms.to_string());
    Ok(detail)
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
