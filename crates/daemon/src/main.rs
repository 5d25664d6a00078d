// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jobstatsd: periodic job index compaction

use std::sync::Arc;

use anyhow::Context;
use jobstats_core::{EnvSettings, FeatureGate, SystemClock};
use jobstats_daemon::env::SETTINGS_ENV_PREFIX;
use jobstats_daemon::{run_maintenance, Config};
use jobstats_engine::Compactor;
use jobstats_storage::RedisStore;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    let store = Arc::new(
        RedisStore::connect(&config.redis_url)
            .with_context(|| format!("connecting to {}", config.redis_url))?,
    );
    let gate = Arc::new(FeatureGate::with_ttl(
        Arc::new(EnvSettings::new(SETTINGS_ENV_PREFIX)),
        SystemClock,
        config.settings_ttl,
    ));
    let compactor = Arc::new(Compactor::new(store, gate).with_keys(config.key_space()));

    if config.once {
        let report = compactor.cleanup().context("job index cleanup failed")?;
        tracing::info!(ran = report.ran, removed = report.removed, "cleanup pass finished");
        return Ok(());
    }

    tracing::info!(
        interval_ms = config.cleanup_interval.as_millis() as u64,
        "starting maintenance loop"
    );
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                return;
            }
            tracing::info!("shutting down");
            shutdown.cancel();
        });
    }

    run_maintenance(compactor, config.cleanup_interval, shutdown).await;
    Ok(())
}
