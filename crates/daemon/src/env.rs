// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use jobstats_core::settings::DEFAULT_SETTINGS_TTL;
use std::time::Duration;

/// Prefix of environment variables read as runtime settings
/// (`JOBSTATS_DELAYED_JOBS_STORE_STATS=redis` enables the daemon's passes).
pub const SETTINGS_ENV_PREFIX: &str = "JOBSTATS_";

/// Redis URL (default `redis://127.0.0.1/`)
pub fn redis_url() -> String {
    std::env::var("JOBSTATS_REDIS_URL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "redis://127.0.0.1/".to_string())
}

/// Key prefix shared with the recording side; empty for the default layout
pub fn key_prefix() -> String {
    std::env::var("JOBSTATS_KEY_PREFIX").unwrap_or_default()
}

/// Time between cleanup passes (default 1h)
pub fn cleanup_interval() -> Duration {
    std::env::var("JOBSTATS_CLEANUP_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(60 * 60))
}

/// How long the enablement setting is cached (default [`DEFAULT_SETTINGS_TTL`])
pub fn settings_ttl() -> Duration {
    std::env::var("JOBSTATS_SETTINGS_CACHE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SETTINGS_TTL)
}

/// Run a single pass and exit instead of looping
pub fn run_once() -> bool {
    matches!(std::env::var("JOBSTATS_ONCE").as_deref(), Ok("1") | Ok("true"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
