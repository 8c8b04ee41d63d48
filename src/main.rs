// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use zatori_server::api::router;
use zatori_server::config::{ServerConfig, DEFAULT_LOG_FILTER};
use zatori_server::ratelimit::UploadLimiter;
use zatori_server::state::AppState;
use zatori_server::store::MarketStore;

/// How often expired rate-limit entries are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if config.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let uploads = UploadLimiter::default();
    let state = AppState::new(MarketStore::new(), uploads.clone());
    let app = router(state);

    // Idle wallets would otherwise linger in the limiter map forever.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            uploads.sweep();
        }
    });

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "Zatori marketplace server listening (docs at /docs)");

    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
