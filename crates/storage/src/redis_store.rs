// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed store.
//!
//! Holds one synchronous connection; calls from several threads are
//! serialized on it. Batches go out as a plain (non-`MULTI`) pipeline.
//! `expires_at_ms` uses `PEXPIRETIME`, which needs Redis 7.0 or later.

use crate::op::{Batch, StoreOp};
use crate::store::{StatsStore, StoreError};
use indexmap::IndexMap;
use parking_lot::Mutex;

pub struct RedisStore {
    conn: Mutex<redis::Connection>,
}

impl RedisStore {
    /// Open a connection to the server at `url` (e.g. `redis://127.0.0.1/`).
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection()?;
        tracing::debug!(url, "connected to redis");
        Ok(Self { conn: Mutex::new(conn) })
    }
}

/// The Redis command for one batched write
pub(crate) fn op_command(op: &StoreOp) -> redis::Cmd {
    match op {
        StoreOp::PushFront { key, value } => {
            let mut cmd = redis::cmd("LPUSH");
            cmd.arg(key).arg(value);
            cmd
        }
        StoreOp::SortedSetAdd { key, member, score } => {
            let mut cmd = redis::cmd("ZADD");
            cmd.arg(key).arg(*score).arg(member);
            cmd
        }
        StoreOp::SortedSetIncr { key, member, by } => {
            let mut cmd = redis::cmd("ZINCRBY");
            cmd.arg(key).arg(*by).arg(member);
            cmd
        }
        StoreOp::HashWrite { key, fields } => {
            let mut cmd = redis::cmd("HSET");
            cmd.arg(key);
            for (name, value) in fields {
                cmd.arg(name).arg(value);
            }
            cmd
        }
        StoreOp::ExpireAt { key, at_ms } => {
            let mut cmd = redis::cmd("PEXPIREAT");
            cmd.arg(key).arg(*at_ms);
            cmd
        }
    }
}

/// `SORT list BY nosort GET pattern->field STORE list`
pub(crate) fn reindex_command(list_key: &str, hash_pattern: &str, field: &str) -> redis::Cmd {
    let mut cmd = redis::cmd("SORT");
    cmd.arg(list_key)
        .arg("BY")
        .arg("nosort")
        .arg("GET")
        .arg(format!("{}->{}", hash_pattern, field))
        .arg("STORE")
        .arg(list_key);
    cmd
}

impl StatsStore for RedisStore {
    fn apply(&self, batch: &Batch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut pipe = redis::pipe();
        for op in batch.ops().iter().filter(|op| !is_empty_hash_write(op)) {
            pipe.add_command(op_command(op)).ignore();
        }
        pipe.query::<()>(&mut *self.conn.lock())?;
        Ok(())
    }

    fn reindex_from_hash(
        &self,
        list_key: &str,
        hash_pattern: &str,
        field: &str,
    ) -> Result<(), StoreError> {
        reindex_command(list_key, hash_pattern, field).query::<i64>(&mut *self.conn.lock())?;
        Ok(())
    }

    fn remove_value(&self, list_key: &str, value: &str) -> Result<u64, StoreError> {
        let removed = redis::cmd("LREM")
            .arg(list_key)
            .arg(0)
            .arg(value)
            .query::<u64>(&mut *self.conn.lock())?;
        Ok(removed)
    }

    fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let items = redis::cmd("LRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .query::<Vec<String>>(&mut *self.conn.lock())?;
        Ok(items)
    }

    fn sorted_set_range(&self, key: &str) -> Result<Vec<(String, f64)>, StoreError> {
        let members = redis::cmd("ZRANGE")
            .arg(key)
            .arg(0)
            .arg(-1)
            .arg("WITHSCORES")
            .query::<Vec<(String, f64)>>(&mut *self.conn.lock())?;
        Ok(members)
    }

    fn hash_get_all(&self, key: &str) -> Result<Option<IndexMap<String, String>>, StoreError> {
        let pairs = redis::cmd("HGETALL")
            .arg(key)
            .query::<Vec<(String, String)>>(&mut *self.conn.lock())?;
        if pairs.is_empty() {
            return Ok(None);
        }
        Ok(Some(pairs.into_iter().collect()))
    }

    fn expires_at_ms(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let at = redis::cmd("PEXPIRETIME").arg(key).query::<i64>(&mut *self.conn.lock())?;
        // -1: no expiry, -2: no such key
        Ok(u64::try_from(at).ok())
    }
}

/// `HSET key` with no fields is a syntax error in Redis.
fn is_empty_hash_write(op: &StoreOp) -> bool {
    matches!(op, StoreOp::HashWrite { fields, .. } if fields.is_empty())
}

#[cfg(test)]
#[path = "redis_store_tests.rs"]
mod tests;
