// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::clock::Clock;
use crate::job::CompletedJob;
use crate::settings::{FeatureGate, MapSettings, STORE_STATS_ENABLED, STORE_STATS_SETTING};
use crate::worker::Worker;
use std::sync::Arc;
use std::time::Duration;

/// A completed job with an `id` attribute, locked at `locked_at_ms`.
pub fn completed_job(id: &str, tag: &str, locked_at_ms: u64) -> CompletedJob {
    CompletedJob::new(id, tag)
        .with_attribute("id", id)
        .with_locked_at_ms(locked_at_ms)
        .with_full_command(format!("{}.perform", tag))
}

pub fn worker(name: &str) -> Worker {
    Worker::new(name)
}

/// Settings handle plus a gate reading it with no caching, so flips in a
/// test take effect immediately.
pub fn gate<C: Clock>(clock: C, enabled: bool) -> (Arc<MapSettings>, Arc<FeatureGate<C>>) {
    let settings = Arc::new(MapSettings::new());
    if enabled {
        settings.set(STORE_STATS_SETTING, STORE_STATS_ENABLED);
    }
    let gate = Arc::new(FeatureGate::with_ttl(settings.clone(), clock, Duration::ZERO));
    (settings, gate)
}
