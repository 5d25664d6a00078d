// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store capability injected into the recorder and compactor

use crate::op::Batch;
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("WRONGTYPE operation against key {key} holding the wrong kind of value")]
    WrongType { key: String },
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Shared key-value store holding the telemetry structures.
///
/// Every call blocks until the store answers. Isolation is per key only;
/// nothing here spans keys atomically.
pub trait StatsStore: Send + Sync {
    /// Submit a pipelined batch of writes.
    ///
    /// All operations are attempted in order; the first error is returned
    /// after the rest have been applied.
    fn apply(&self, batch: &Batch) -> Result<(), StoreError>;

    /// Replace every element `e` of the list at `list_key` with field `field`
    /// of the hash at `hash_pattern` (first `*` replaced by `e`), keeping
    /// order. Elements whose hash is missing, expired, or lacks the field
    /// become the empty string.
    ///
    /// Redis: `SORT list_key BY nosort GET hash_pattern->field STORE list_key`.
    fn reindex_from_hash(
        &self,
        list_key: &str,
        hash_pattern: &str,
        field: &str,
    ) -> Result<(), StoreError>;

    /// Remove every occurrence of `value` from a list, returning the count
    /// removed (`LREM list_key 0 value`).
    fn remove_value(&self, list_key: &str, value: &str) -> Result<u64, StoreError>;

    /// Elements `start..=stop` of a list; negative indexes count from the
    /// tail (`LRANGE`).
    fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError>;

    /// All members of a sorted set with their scores, lowest score first and
    /// ties broken lexically (`ZRANGE key 0 -1 WITHSCORES`).
    fn sorted_set_range(&self, key: &str) -> Result<Vec<(String, f64)>, StoreError>;

    /// All fields of a hash, or `None` when the key is absent (`HGETALL`).
    fn hash_get_all(&self, key: &str) -> Result<Option<IndexMap<String, String>>, StoreError>;

    /// Absolute expiry of a key in epoch milliseconds, `None` when the key is
    /// absent or persistent (`PEXPIRETIME`).
    fn expires_at_ms(&self, key: &str) -> Result<Option<u64>, StoreError>;
}
