// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compacting the job index.

use crate::prelude::*;
use proptest::prelude::*;

/// Index `ids` (head first), writing a detail hash only for `live` ones
fn seed(world: &World, ids: &[String], live: &[bool]) {
    let mut batch = Batch::new();
    for id in ids.iter().rev() {
        batch = batch.push_front("job:id", id.as_str());
    }
    for (id, _) in ids.iter().zip(live).filter(|(_, live)| **live) {
        batch = batch.hash_write(format!("job:id:{}", id), vec![("id".into(), id.clone())]);
    }
    world.store.apply(&batch).unwrap();
}

#[test]
fn dangling_middle_entry_is_removed_in_order() {
    let world = World::enabled();
    let ids: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
    seed(&world, &ids, &[true, false, true]);

    world.compactor.cleanup().unwrap();
    assert_eq!(world.index(), vec!["1".to_string(), "3".to_string()]);
}

#[test]
fn expired_jobs_leave_the_index_and_tag_totals_stay() {
    let world = World::enabled();
    world.complete("a", "Export", 1);
    world.clock.advance(Duration::from_secs(10 * 24 * 60 * 60));
    world.complete("b", "Export", 1);
    world.clock.advance(Duration::from_secs(25 * 24 * 60 * 60));

    let report = world.compactor.cleanup().unwrap();
    assert_eq!(report, CleanupReport { ran: true, removed: 1 });
    assert_eq!(world.index(), vec!["b".to_string()]);
    assert_eq!(world.tag_count("Export"), 2.0);
}

#[test]
fn disabled_gate_makes_no_store_calls() {
    let world = World::disabled();
    assert_eq!(world.compactor.cleanup().unwrap(), CleanupReport::default());
    assert_eq!(world.store.calls(), 0);
}

#[test]
fn store_outage_is_reported_to_the_scheduler() {
    let world = World::enabled();
    world.store.set_available(false);
    assert!(world.compactor.cleanup().is_err());
}

proptest! {
    #[test]
    fn cleanup_keeps_exactly_the_live_entries(
        entries in proptest::collection::vec(("[0-9]{1,3}", any::<bool>()), 0..40)
    ) {
        let world = World::enabled();
        // an id is live if any of its occurrences says so, since they share one hash
        let ids: Vec<String> = entries.iter().map(|(id, _)| id.clone()).collect();
        let live_ids: std::collections::HashSet<&String> =
            entries.iter().filter(|(_, live)| *live).map(|(id, _)| id).collect();
        let live: Vec<bool> = ids.iter().map(|id| live_ids.contains(id)).collect();
        seed(&world, &ids, &live);

        world.compactor.cleanup().unwrap();
        let expected: Vec<String> =
            ids.iter().filter(|id| live_ids.contains(id)).cloned().collect();
        prop_assert_eq!(world.index(), expected);
    }

    #[test]
    fn cleanup_is_idempotent(
        entries in proptest::collection::vec(("[a-c][0-9]", any::<bool>()), 0..20)
    ) {
        let world = World::enabled();
        let ids: Vec<String> = entries.iter().map(|(id, _)| id.clone()).collect();
        let live: Vec<bool> = entries.iter().map(|(_, live)| *live).collect();
        seed(&world, &ids, &live);

        world.compactor.cleanup().unwrap();
        let first = world.index();
        let second_report = world.compactor.cleanup().unwrap();
        prop_assert_eq!(world.index(), first);
        prop_assert_eq!(second_report.removed, 0);
    }
}
