// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Workspace-level behavior specs for the job telemetry index.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cleanup.rs"]
mod cleanup;
#[path = "specs/gate.rs"]
mod gate;
#[path = "specs/record.rs"]
mod record;
