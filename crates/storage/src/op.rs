// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write operations submitted to the store as one pipelined batch

/// A single store write
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    /// Push a value onto the head of a list (`LPUSH`)
    PushFront { key: String, value: String },
    /// Add a member to a sorted set with a score (`ZADD`)
    SortedSetAdd { key: String, member: String, score: f64 },
    /// Increment a sorted set member's score (`ZINCRBY`)
    SortedSetIncr { key: String, member: String, by: f64 },
    /// Set fields on a hash, keeping fields not named here (`HSET`)
    HashWrite { key: String, fields: Vec<(String, String)> },
    /// Expire a key at an absolute time in epoch milliseconds (`PEXPIREAT`)
    ExpireAt { key: String, at_ms: u64 },
}

impl StoreOp {
    /// Key the operation writes to
    pub fn key(&self) -> &str {
        match self {
            StoreOp::PushFront { key, .. }
            | StoreOp::SortedSetAdd { key, .. }
            | StoreOp::SortedSetIncr { key, .. }
            | StoreOp::HashWrite { key, .. }
            | StoreOp::ExpireAt { key, .. } => key,
        }
    }
}

/// Ordered list of writes sent together.
///
/// A batch is pipelined, not transactional: each operation is applied on
/// its own, and a failure part way leaves earlier operations in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    ops: Vec<StoreOp>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_front(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(StoreOp::PushFront { key: key.into(), value: value.into() });
        self
    }

    pub fn sorted_set_add(
        mut self,
        key: impl Into<String>,
        member: impl Into<String>,
        score: f64,
    ) -> Self {
        self.ops.push(StoreOp::SortedSetAdd { key: key.into(), member: member.into(), score });
        self
    }

    pub fn sorted_set_incr(
        mut self,
        key: impl Into<String>,
        member: impl Into<String>,
        by: f64,
    ) -> Self {
        self.ops.push(StoreOp::SortedSetIncr { key: key.into(), member: member.into(), by });
        self
    }

    pub fn hash_write(mut self, key: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        self.ops.push(StoreOp::HashWrite { key: key.into(), fields });
        self
    }

    pub fn expire_at(mut self, key: impl Into<String>, at_ms: u64) -> Self {
        self.ops.push(StoreOp::ExpireAt { key: key.into(), at_ms });
        self
    }

    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
