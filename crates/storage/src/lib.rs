// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobstats-storage: key-value store access for the job telemetry index
//!
//! The store follows the Redis data model (lists, sorted sets, hashes, and
//! absolute key expiry). [`MemoryStore`] implements it in-process and
//! [`RedisStore`] talks to a Redis server.

mod memory;
mod op;
mod redis_store;
mod store;

pub use memory::MemoryStore;
pub use op::{Batch, StoreOp};
pub use redis_store::RedisStore;
pub use store::{StatsStore, StoreError};
