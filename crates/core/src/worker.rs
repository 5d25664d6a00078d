// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker descriptor.

use serde::{Deserialize, Serialize};

crate::string_newtype! {
    /// Name of the worker process/thread that ran a job to completion.
    pub struct WorkerName;
}

/// The worker that completed a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub name: WorkerName,
}

impl Worker {
    pub fn new(name: impl Into<WorkerName>) -> Self {
        Self { name: name.into() }
    }
}
