// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key names of the four telemetry structures.
//!
//! With the default (empty) prefix the layout is:
//!
//! | key              | type       | contents                              |
//! |------------------|------------|---------------------------------------|
//! | `job:id`         | list       | job ids, most recently completed first |
//! | `job:tag`        | sorted set | every tag ever seen, all scores 0     |
//! | `job:tag:counts` | sorted set | tag -> number of completed jobs       |
//! | `job:id:<id>`    | hash       | job detail, expires after retention   |

use crate::job::JobId;

/// Field of the detail hash that the compactor resolves index entries through.
pub const DETAIL_ID_FIELD: &str = "id";

/// Namespace for the telemetry keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    /// Key space whose keys all start with `<prefix>:`. An empty prefix is
    /// the same as [`KeySpace::default`].
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    fn key(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}:{}", self.prefix, name)
        }
    }

    /// List of completed job ids
    pub fn job_index(&self) -> String {
        self.key("job:id")
    }

    /// Sorted set of tag names
    pub fn tags(&self) -> String {
        self.key("job:tag")
    }

    /// Sorted set of per-tag completion counts
    pub fn tag_counts(&self) -> String {
        self.key("job:tag:counts")
    }

    /// Detail hash for one job
    pub fn job_detail(&self, id: &JobId) -> String {
        self.key(&format!("job:id:{}", id))
    }

    /// Detail key with `*` standing in for the job id, as used by `SORT ... GET`
    pub fn job_detail_pattern(&self) -> String {
        self.key("job:id:*")
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
