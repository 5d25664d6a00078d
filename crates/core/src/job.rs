// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completed-job descriptor handed over by the job runner.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

crate::string_newtype! {
    /// Identifier of a job as assigned by the job queue.
    ///
    /// Used verbatim as the job index entry and as the suffix of the
    /// per-job detail key.
    pub struct JobId;
}

crate::string_newtype! {
    /// Type label of a job (e.g. `EmailDigest`), used for aggregate counting.
    pub struct Tag;
}

/// A job that has just finished running.
///
/// `attributes` are the job's persisted fields in their stored order; they
/// are copied into the detail record before the derived fields are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedJob {
    pub id: JobId,
    pub tag: Tag,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    /// When a worker locked the job, in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_at_ms: Option<u64>,
    /// Human-readable description of the job body
    #[serde(default)]
    pub full_command: String,
}

impl CompletedJob {
    pub fn new(id: impl Into<JobId>, tag: impl Into<Tag>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            attributes: IndexMap::new(),
            locked_at_ms: None,
            full_command: String::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_locked_at_ms(mut self, ms: u64) -> Self {
        self.locked_at_ms = Some(ms);
        self
    }

    pub fn with_full_command(mut self, command: impl Into<String>) -> Self {
        self.full_command = command.into();
        self
    }

    /// Run time relative to `finished_at_ms`.
    ///
    /// Signed: a worker clock ahead of the store clock yields a negative value
    /// rather than a wrapped one, saturating at the `i64` bounds. `None` when
    /// the job was never locked.
    pub fn run_time_ms(&self, finished_at_ms: u64) -> Option<i64> {
        self.locked_at_ms.map(|locked| {
            let diff = i128::from(finished_at_ms) - i128::from(locked);
            i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
        })
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
