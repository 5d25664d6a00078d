// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jobstats_core::JobId;
use jobstats_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("job {0} has no locked_at timestamp")]
    MissingLockedAt(JobId),
}
