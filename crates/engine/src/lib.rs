// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobstats-engine: records completed jobs and compacts the job index
//!
//! [`Recorder`] is the only write path and never fails its caller.
//! [`Compactor`] is the maintenance pass run by an external scheduler.
//! Both check the same [`FeatureGate`](jobstats_core::FeatureGate) first and
//! do nothing when it is off.

mod compactor;
mod error;
mod recorder;

pub use compactor::{CleanupReport, Compactor};
pub use error::StatsError;
pub use recorder::{Recorder, DEFAULT_RETENTION};
