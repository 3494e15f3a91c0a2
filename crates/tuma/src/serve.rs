// SPDX-FileCopyrightText: 2026 Tuma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring for the `serve` subcommand: storage, engine, outbound client,
//! idle-session sweeper, and the webhook server.

use std::sync::Arc;
use std::time::Duration;

use tuma_config::model::TumaConfig;
use tuma_core::{ChatSender, TumaError};
use tuma_engine::Engine;
use tuma_gateway::{start_server, GatewayState, ServerConfig};
use tuma_storage::Database;
use tuma_whatsapp::WhatsAppClient;

pub async fn run(config: TumaConfig) -> Result<(), TumaError> {
    let db = Arc::new(
        Database::open_with_options(&config.storage.database_path, config.storage.wal_mode)
            .await?,
    );
    tracing::info!(path = %config.storage.database_path, "database ready");

    let sender: Arc<dyn ChatSender> = Arc::new(WhatsAppClient::new(config.whatsapp.clone()));
    if config.whatsapp.access_token.is_none() {
        tracing::warn!("whatsapp credentials not configured, replies will only be logged");
    }

    let engine = Arc::new(Engine::new(db, &config, sender));

    if config.session.idle_ttl_secs > 0 {
        spawn_idle_sweeper(engine.clone(), config.session.idle_ttl_secs);
    }

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let state = GatewayState {
        engine,
        verify_token: config.whatsapp.verify_token.clone(),
        start_time: std::time::Instant::now(),
    };
    start_server(&server_config, state).await
}

/// Periodically drop sessions idle for longer than the configured TTL.
fn spawn_idle_sweeper(engine: Arc<Engine>, idle_ttl_secs: u64) {
    let ttl = Duration::from_secs(idle_ttl_secs);
    // Sweep at a fraction of the TTL so eviction lag stays bounded.
    let period = Duration::from_secs(idle_ttl_secs.div_ceil(4).max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let evicted = engine.sessions().evict_idle(ttl);
            if evicted > 0 {
                tracing::debug!(evicted, "idle sessions evicted");
            }
        }
    });
}
