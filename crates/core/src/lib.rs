// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobstats-core: shared types for the job telemetry index

pub mod macros;

pub mod clock;
pub mod job;
pub mod keys;
pub mod settings;
pub mod worker;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use job::{CompletedJob, JobId, Tag};
pub use keys::KeySpace;
pub use settings::{
    CachedSetting, EnvSettings, FeatureGate, FileSettings, MapSettings, SettingsError,
    SettingsSource,
};
pub use worker::{Worker, WorkerName};
