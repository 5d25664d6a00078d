// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic compaction loop.

use crate::env;
use jobstats_core::{Clock, KeySpace};
use jobstats_engine::Compactor;
use jobstats_storage::StatsStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub redis_url: String,
    pub key_prefix: String,
    pub cleanup_interval: Duration,
    pub settings_ttl: Duration,
    pub once: bool,
}

impl Config {
    /// Load configuration from `JOBSTATS_*` environment variables.
    pub fn load() -> Self {
        Self {
            redis_url: env::redis_url(),
            key_prefix: env::key_prefix(),
            cleanup_interval: env::cleanup_interval(),
            settings_ttl: env::settings_ttl(),
            once: env::run_once(),
        }
    }

    pub fn key_space(&self) -> KeySpace {
        KeySpace::with_prefix(self.key_prefix.clone())
    }
}

/// Totals over the lifetime of a maintenance loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceStats {
    /// Passes that ran against the store (gate on, no error)
    pub passes: u64,
    /// Passes skipped because the gate was off
    pub skipped: u64,
    /// Passes that failed and were left for the next tick
    pub failures: u64,
    /// Index entries removed across all passes
    pub removed: u64,
}

/// Run cleanup every `interval` until `shutdown` is cancelled.
///
/// The first pass runs immediately. Each pass blocks on the store, so it
/// runs on the blocking pool. A failed pass is logged and retried on the
/// next tick.
pub async fn run_maintenance<S, C>(
    compactor: Arc<Compactor<S, C>>,
    interval: Duration,
    shutdown: CancellationToken,
) -> MaintenanceStats
where
    S: StatsStore + 'static,
    C: Clock,
{
    let mut stats = MaintenanceStats::default();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                let compactor = Arc::clone(&compactor);
                match tokio::task::spawn_blocking(move || compactor.cleanup()).await {
                    Ok(Ok(report)) if report.ran => {
                        stats.passes += 1;
                        stats.removed += report.removed;
                    }
                    Ok(Ok(_)) => {
                        stats.skipped += 1;
                        tracing::debug!("job stats disabled, skipping cleanup");
                    }
                    Ok(Err(e)) => {
                        stats.failures += 1;
                        tracing::warn!(error = %e, "job index cleanup failed, retrying next tick");
                    }
                    Err(e) => {
                        stats.failures += 1;
                        tracing::error!(error = %e, "job index cleanup task aborted");
                    }
                }
            }
        }
    }

    tracing::info!(
        passes = stats.passes,
        failures = stats.failures,
        removed = stats.removed,
        "maintenance loop stopped"
    );
    stats
}

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
