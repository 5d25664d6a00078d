// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobstats daemon library
//!
//! Periodically compacts the job index on behalf of deployments that have
//! no scheduler of their own.

pub mod env;
pub mod maintenance;

pub use maintenance::{run_maintenance, Config, MaintenanceStats};
