// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `vibecraft serve` - run the HTTP API until Ctrl+C or SIGTERM

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use vibecraft_core::domain::stylist_config::StylistConfigManifest;

use crate::embedded::EmbeddedStylist;

pub async fn run(
    config: StylistConfigManifest,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let stylist = EmbeddedStylist::from_config(config)?;
    let addr = listen_address(&stylist, host, port);
    let app = stylist.router();

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("VibeCraft API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("VibeCraft API shutting down");

    Ok(())
}

/// `--host`/`--port` win over the configured network section
fn listen_address(stylist: &EmbeddedStylist, host: Option<String>, port: Option<u16>) -> String {
    let network = &stylist.config().spec.network;
    format!(
        "{}:{}",
        host.unwrap_or_else(|| network.bind_address.clone()),
        port.unwrap_or(network.port)
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
