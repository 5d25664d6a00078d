// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Feature gate as seen through both entry points.

use crate::prelude::*;

#[yare::parameterized(
    exact      = { "redis", true },
    uppercase  = { "Redis", false },
    false_str  = { "false", false },
    empty      = { "",      false },
)]
fn only_the_exact_value_records(value: &str, records: bool) {
    let world = World::disabled();
    world.settings.set("delayed_jobs_store_stats", value);
    world.complete("1", "t", 1);
    assert_eq!(!world.index().is_empty(), records);
}

#[test]
fn turning_the_gate_off_stops_both_paths() {
    let world = World::enabled();
    world.complete("1", "t", 1);
    let calls = world.store.calls();

    world.settings.remove("delayed_jobs_store_stats");
    world.complete("2", "t", 1);
    world.compactor.cleanup().unwrap();
    assert_eq!(world.store.calls(), calls);
}
