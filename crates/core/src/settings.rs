// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime settings and the cached feature gate for telemetry recording.
//!
//! Settings are plain strings read from a [`SettingsSource`]. Reads go
//! through [`CachedSetting`], which keeps the last value for a fixed TTL, so
//! a toggle flipped at the source takes effect within one TTL.

use crate::clock::Clock;
use parking_lot::{Mutex, RwLock};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Setting that controls whether job telemetry is stored
pub const STORE_STATS_SETTING: &str = "delayed_jobs_store_stats";
/// Value used when the setting is absent
pub const STORE_STATS_DEFAULT: &str = "false";
/// The only value that enables recording (case-sensitive)
pub const STORE_STATS_ENABLED: &str = "redis";
/// How long a setting value is reused before the source is read again
pub const DEFAULT_SETTINGS_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A source of named string settings owned by the surrounding system.
pub trait SettingsSource: Send + Sync {
    /// Current value of `name`, or `None` when unset.
    fn get(&self, name: &str) -> Result<Option<String>, SettingsError>;
}

/// In-memory settings, shared by handle with whoever changes them.
#[derive(Debug, Default)]
pub struct MapSettings {
    values: RwLock<HashMap<String, String>>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(name.into(), value.into());
    }

    pub fn remove(&self, name: &str) {
        self.values.write().remove(name);
    }
}

impl SettingsSource for MapSettings {
    fn get(&self, name: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.read().get(name).cloned())
    }
}

/// Settings read from environment variables named `<prefix><NAME>`.
///
/// `delayed_jobs_store_stats` with prefix `JOBSTATS_` is read from
/// `JOBSTATS_DELAYED_JOBS_STORE_STATS`.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    prefix: String,
}

impl EnvSettings {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name.to_ascii_uppercase())
    }
}

impl SettingsSource for EnvSettings {
    fn get(&self, name: &str) -> Result<Option<String>, SettingsError> {
        Ok(std::env::var(self.var_name(name)).ok())
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    settings: HashMap<String, String>,
}

/// Settings read from the `[settings]` table of a TOML file.
///
/// The file is read on every lookup; pair it with [`CachedSetting`]. A
/// missing file means every setting is unset.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<SettingsFile, SettingsError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SettingsFile::default());
            }
            Err(source) => return Err(SettingsError::Io { path: self.path.clone(), source }),
        };
        toml::from_str(&content)
            .map_err(|source| SettingsError::Parse { path: self.path.clone(), source })
    }
}

impl SettingsSource for FileSettings {
    fn get(&self, name: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.load()?.settings.remove(name))
    }
}

struct Cached {
    value: String,
    fetched_at: Instant,
}

/// One setting read through a TTL cache.
///
/// A source error is logged and treated as an absent value; it is cached
/// like any other read so a broken source is not hammered.
pub struct CachedSetting<C: Clock> {
    source: Arc<dyn SettingsSource>,
    name: String,
    default: String,
    ttl: Duration,
    clock: C,
    cached: Mutex<Option<Cached>>,
}

impl<C: Clock> CachedSetting<C> {
    pub fn new(
        source: Arc<dyn SettingsSource>,
        name: impl Into<String>,
        default: impl Into<String>,
        ttl: Duration,
        clock: C,
    ) -> Self {
        Self {
            source,
            name: name.into(),
            default: default.into(),
            ttl,
            clock,
            cached: Mutex::new(None),
        }
    }

    /// Current value, possibly up to one TTL stale.
    pub fn get(&self) -> String {
        let now = self.clock.now();
        let mut cached = self.cached.lock();
        if let Some(entry) = cached.as_ref() {
            if now.saturating_duration_since(entry.fetched_at) < self.ttl {
                return entry.value.clone();
            }
        }

        let value = match self.source.get(&self.name) {
            Ok(Some(value)) => value,
            Ok(None) => self.default.clone(),
            Err(e) => {
                tracing::warn!(setting = %self.name, error = %e, "failed to read setting");
                self.default.clone()
            }
        };
        *cached = Some(Cached { value: value.clone(), fetched_at: now });
        value
    }

    /// Drop the cached value so the next read goes to the source.
    pub fn invalidate(&self) {
        *self.cached.lock() = None;
    }
}

/// Whether job telemetry is recorded.
///
/// Enabled only while `delayed_jobs_store_stats` reads exactly `redis`;
/// absent, empty, or any other value disables it.
pub struct FeatureGate<C: Clock> {
    setting: CachedSetting<C>,
}

impl<C: Clock> FeatureGate<C> {
    pub fn new(source: Arc<dyn SettingsSource>, clock: C) -> Self {
        Self::with_ttl(source, clock, DEFAULT_SETTINGS_TTL)
    }

    pub fn with_ttl(source: Arc<dyn SettingsSource>, clock: C, ttl: Duration) -> Self {
        Self {
            setting: CachedSetting::new(
                source,
                STORE_STATS_SETTING,
                STORE_STATS_DEFAULT,
                ttl,
                clock,
            ),
        }
    }

    pub fn enabled(&self) -> bool {
        self.setting.get() == STORE_STATS_ENABLED
    }

    pub fn setting(&self) -> &CachedSetting<C> {
        &self.setting
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
