// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared world for the specs: one store, one clock, recorder and compactor
//! sharing a gate.

pub use jobstats_core::test_support::{completed_job, worker};
pub use jobstats_core::{Clock, CompletedJob, FakeClock, MapSettings};
pub use jobstats_engine::{CleanupReport, Compactor, Recorder, DEFAULT_RETENTION};
pub use jobstats_storage::{Batch, MemoryStore, StatsStore};
pub use std::sync::Arc;
pub use std::time::Duration;

use jobstats_core::settings::{STORE_STATS_ENABLED, STORE_STATS_SETTING};

pub type Store = MemoryStore<FakeClock>;

pub struct World {
    pub clock: FakeClock,
    pub settings: Arc<MapSettings>,
    pub store: Arc<Store>,
    pub recorder: Recorder<Store, FakeClock>,
    pub compactor: Compactor<Store, FakeClock>,
}

impl World {
    pub fn enabled() -> Self {
        let world = Self::disabled();
        world.settings.set(STORE_STATS_SETTING, STORE_STATS_ENABLED);
        world
    }

    pub fn disabled() -> Self {
        let clock = FakeClock::at_epoch_ms(1_700_000_000_000);
        let (settings, gate) = jobstats_core::test_support::gate(clock.clone(), false);
        let store = Arc::new(MemoryStore::new(clock.clone()));
        Self {
            recorder: Recorder::new(store.clone(), gate.clone(), clock.clone()),
            compactor: Compactor::new(store.clone(), gate),
            clock,
            settings,
            store,
        }
    }

    /// Record `id` as a job of `tag`, locked `run_ms` ago
    pub fn complete(&self, id: &str, tag: &str, run_ms: u64) {
        let job = completed_job(id, tag, self.clock.epoch_ms() - run_ms);
        self.recorder.record(&job, &worker("worker-1"));
    }

    pub fn index(&self) -> Vec<String> {
        self.store.list_range("job:id", 0, -1).unwrap()
    }

    pub fn tags(&self) -> Vec<String> {
        self.store.sorted_set_range("job:tag").unwrap().into_iter().map(|(m, _)| m).collect()
    }

    pub fn tag_count(&self, tag: &str) -> f64 {
        self.store
            .sorted_set_range("job:tag:counts")
            .unwrap()
            .into_iter()
            .find(|(m, _)| m == tag)
            .map(|(_, score)| score)
            .unwrap_or(0.0)
    }

    pub fn detail(&self, id: &str) -> Option<indexmap::IndexMap<String, String>> {
        self.store.hash_get_all(&format!("job:id:{}", id)).unwrap()
    }
}
