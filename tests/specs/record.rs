// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording completed jobs.

use crate::prelude::*;

#[test]
fn single_completion_lands_in_every_structure() {
    let world = World::enabled();
    let t0 = world.clock.epoch_ms();
    world.clock.advance(Duration::from_millis(2_750));
    let t1 = world.clock.epoch_ms();

    let job =
        CompletedJob::new("42", "EmailDigest").with_attribute("id", "42").with_locked_at_ms(t0);
    world.recorder.record(&job, &worker("worker-1"));

    assert_eq!(world.index().first().map(String::as_str), Some("42"));
    assert_eq!(world.tags(), vec!["EmailDigest".to_string()]);
    assert_eq!(world.tag_count("EmailDigest"), 1.0);

    let detail = world.detail("42").unwrap();
    assert_eq!(detail["run_time"], (t1 - t0).to_string());
    assert_eq!(detail["finished_at"], t1.to_string());
    assert_eq!(detail["worker"], "worker-1");
}

#[test]
fn repeated_tag_counts_up_but_is_listed_once() {
    let world = World::enabled();
    world.complete("1", "EmailDigest", 10);
    world.complete("2", "EmailDigest", 10);

    assert_eq!(world.tag_count("EmailDigest"), 2.0);
    assert_eq!(world.tags(), vec!["EmailDigest".to_string()]);
    assert_eq!(world.index(), vec!["2".to_string(), "1".to_string()]);
}

#[test]
fn count_increments_by_exactly_one_from_prior_value() {
    let world = World::enabled();
    world
        .store
        .apply(&Batch::new().sorted_set_incr("job:tag:counts", "Export", 41.0))
        .unwrap();
    world.complete("1", "Export", 5);
    assert_eq!(world.tag_count("Export"), 42.0);
}

#[test]
fn tags_enumerate_lexically() {
    let world = World::enabled();
    for (id, tag) in [("1", "Zip"), ("2", "Audit"), ("3", "Mail"), ("4", "Audit")] {
        world.complete(id, tag, 1);
    }
    assert_eq!(world.tags(), vec!["Audit".to_string(), "Mail".to_string(), "Zip".to_string()]);
}

#[test]
fn detail_expires_thirty_days_after_write() {
    let world = World::enabled();
    let written_at = world.clock.epoch_ms();
    world.complete("1", "t", 1);

    assert_eq!(
        world.store.expires_at_ms("job:id:1").unwrap(),
        Some(written_at + 30 * 24 * 60 * 60 * 1000)
    );
    world.clock.advance(DEFAULT_RETENTION);
    assert!(world.detail("1").is_none());
}

#[test]
fn disabled_gate_makes_no_store_calls() {
    let world = World::disabled();
    world.complete("1", "t", 1);
    assert_eq!(world.store.calls(), 0);
}

#[test]
fn store_outage_never_reaches_the_caller() {
    let world = World::enabled();
    world.store.set_available(false);
    world.complete("1", "t", 1);

    world.store.set_available(true);
    assert!(world.index().is_empty());
    assert!(world.detail("1").is_none());
}
