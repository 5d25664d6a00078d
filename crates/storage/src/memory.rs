// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process store with Redis semantics.
//!
//! Keys past their absolute expiry read as absent and are purged on the
//! next access. A list or hash that becomes empty is deleted, as in Redis.

use crate::op::{Batch, StoreOp};
use crate::store::{StatsStore, StoreError};
use indexmap::IndexMap;
use jobstats_core::Clock;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Clone)]
enum Value {
    List(VecDeque<String>),
    SortedSet(HashMap<String, f64>),
    Hash(IndexMap<String, String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at_ms: Option<u64>,
}

impl Entry {
    fn new(value: Value) -> Self {
        Self { value, expires_at_ms: None }
    }

    fn is_expired(&self, now_ms: u64) -> bool {
        self.expires_at_ms.is_some_and(|at| at <= now_ms)
    }
}

#[derive(Default)]
struct Keyspace {
    entries: HashMap<String, Entry>,
}

impl Keyspace {
    fn purge_if_expired(&mut self, key: &str, now_ms: u64) {
        if self.entries.get(key).is_some_and(|e| e.is_expired(now_ms)) {
            self.entries.remove(key);
        }
    }

    fn live(&mut self, key: &str, now_ms: u64) -> Option<&Entry> {
        self.purge_if_expired(key, now_ms);
        self.entries.get(key)
    }

    fn entry_or(&mut self, key: &str, now_ms: u64, empty: fn() -> Value) -> &mut Entry {
        self.purge_if_expired(key, now_ms);
        self.entries.entry(key.to_string()).or_insert_with(|| Entry::new(empty()))
    }

    fn list_mut(&mut self, key: &str, now_ms: u64) -> Result<&mut VecDeque<String>, StoreError> {
        match &mut self.entry_or(key, now_ms, || Value::List(VecDeque::new())).value {
            Value::List(list) => Ok(list),
            _ => Err(wrong_type(key)),
        }
    }

    fn sorted_set_mut(
        &mut self,
        key: &str,
        now_ms: u64,
    ) -> Result<&mut HashMap<String, f64>, StoreError> {
        match &mut self.entry_or(key, now_ms, || Value::SortedSet(HashMap::new())).value {
            Value::SortedSet(set) => Ok(set),
            _ => Err(wrong_type(key)),
        }
    }

    fn hash_mut(
        &mut self,
        key: &str,
        now_ms: u64,
    ) -> Result<&mut IndexMap<String, String>, StoreError> {
        match &mut self.entry_or(key, now_ms, || Value::Hash(IndexMap::new())).value {
            Value::Hash(hash) => Ok(hash),
            _ => Err(wrong_type(key)),
        }
    }

    /// Field of a live hash; empty for anything else, as `SORT ... GET` does.
    fn hash_field(&self, key: &str, field: &str, now_ms: u64) -> String {
        self.entries
            .get(key)
            .filter(|e| !e.is_expired(now_ms))
            .and_then(|e| match &e.value {
                Value::Hash(hash) => hash.get(field).cloned(),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn apply_op(&mut self, op: &StoreOp, now_ms: u64) -> Result<(), StoreError> {
        match op {
            StoreOp::PushFront { key, value } => {
                self.list_mut(key, now_ms)?.push_front(value.clone());
            }
            StoreOp::SortedSetAdd { key, member, score } => {
                self.sorted_set_mut(key, now_ms)?.insert(member.clone(), *score);
            }
            StoreOp::SortedSetIncr { key, member, by } => {
                *self.sorted_set_mut(key, now_ms)?.entry(member.clone()).or_insert(0.0) += by;
            }
            StoreOp::HashWrite { key, fields } => {
                if fields.is_empty() {
                    return Ok(());
                }
                let hash = self.hash_mut(key, now_ms)?;
                for (name, value) in fields {
                    hash.insert(name.clone(), value.clone());
                }
            }
            StoreOp::ExpireAt { key, at_ms } => {
                self.purge_if_expired(key, now_ms);
                if *at_ms <= now_ms {
                    self.entries.remove(key.as_str());
                } else if let Some(entry) = self.entries.get_mut(key.as_str()) {
                    entry.expires_at_ms = Some(*at_ms);
                }
            }
        }
        Ok(())
    }
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::WrongType { key: key.to_string() }
}

/// Resolve Redis-style inclusive `start..=stop` (negatives from the tail)
/// against a sequence of `len` elements.
fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

/// In-memory [`StatsStore`] driven by an injected clock.
///
/// Counts every store call so callers can assert that a code path never
/// touched the store, and can be switched to an unavailable state in which
/// every call fails.
pub struct MemoryStore<C: Clock> {
    clock: C,
    keyspace: Mutex<Keyspace>,
    calls: AtomicU64,
    available: AtomicBool,
}

impl<C: Clock> MemoryStore<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            keyspace: Mutex::new(Keyspace::default()),
            calls: AtomicU64::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Number of [`StatsStore`] calls made so far, including failed ones
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether `key` currently holds a live value
    pub fn contains_key(&self, key: &str) -> bool {
        let now_ms = self.clock.epoch_ms();
        self.keyspace.lock().live(key, now_ms).is_some()
    }

    /// Live keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let now_ms = self.clock.epoch_ms();
        let mut keyspace = self.keyspace.lock();
        keyspace.entries.retain(|_, e| !e.is_expired(now_ms));
        let mut keys: Vec<String> = keyspace.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn begin(&self) -> Result<u64, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(self.clock.epoch_ms())
    }
}

impl<C: Clock> StatsStore for MemoryStore<C> {
    fn apply(&self, batch: &Batch) -> Result<(), StoreError> {
        let now_ms = self.begin()?;
        let mut keyspace = self.keyspace.lock();
        let mut first_error = None;
        for op in batch.ops() {
            if let Err(e) = keyspace.apply_op(op, now_ms) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn reindex_from_hash(
        &self,
        list_key: &str,
        hash_pattern: &str,
        field: &str,
    ) -> Result<(), StoreError> {
        let now_ms = self.begin()?;
        let mut keyspace = self.keyspace.lock();
        let elements: Vec<String> = match keyspace.live(list_key, now_ms) {
            None => return Ok(()),
            Some(Entry { value: Value::List(list), .. }) => list.iter().cloned().collect(),
            Some(_) => return Err(wrong_type(list_key)),
        };

        let resolved: VecDeque<String> = elements
            .iter()
            .map(|e| keyspace.hash_field(&hash_pattern.replacen('*', e, 1), field, now_ms))
            .collect();
        keyspace.entries.insert(list_key.to_string(), Entry::new(Value::List(resolved)));
        Ok(())
    }

    fn remove_value(&self, list_key: &str, value: &str) -> Result<u64, StoreError> {
        let now_ms = self.begin()?;
        let mut keyspace = self.keyspace.lock();
        keyspace.purge_if_expired(list_key, now_ms);
        let Some(entry) = keyspace.entries.get_mut(list_key) else {
            return Ok(0);
        };
        let Value::List(list) = &mut entry.value else {
            return Err(wrong_type(list_key));
        };
        let before = list.len();
        list.retain(|e| e != value);
        let removed = (before - list.len()) as u64;
        if list.is_empty() {
            keyspace.entries.remove(list_key);
        }
        Ok(removed)
    }

    fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let now_ms = self.begin()?;
        let mut keyspace = self.keyspace.lock();
        match keyspace.live(key, now_ms) {
            None => Ok(Vec::new()),
            Some(Entry { value: Value::List(list), .. }) => {
                Ok(match resolve_range(list.len(), start, stop) {
                    Some((from, to)) => list.range(from..=to).cloned().collect(),
                    None => Vec::new(),
                })
            }
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn sorted_set_range(&self, key: &str) -> Result<Vec<(String, f64)>, StoreError> {
        let now_ms = self.begin()?;
        let mut keyspace = self.keyspace.lock();
        match keyspace.live(key, now_ms) {
            None => Ok(Vec::new()),
            Some(Entry { value: Value::SortedSet(set), .. }) => {
                let mut members: Vec<(String, f64)> =
                    set.iter().map(|(m, s)| (m.clone(), *s)).collect();
                members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
                Ok(members)
            }
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn hash_get_all(&self, key: &str) -> Result<Option<IndexMap<String, String>>, StoreError> {
        let now_ms = self.begin()?;
        let mut keyspace = self.keyspace.lock();
        match keyspace.live(key, now_ms) {
            None => Ok(None),
            Some(Entry { value: Value::Hash(hash), .. }) => Ok(Some(hash.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn expires_at_ms(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let now_ms = self.begin()?;
        let mut keyspace = self.keyspace.lock();
        Ok(keyspace.live(key, now_ms).and_then(|e| e.expires_at_ms))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
