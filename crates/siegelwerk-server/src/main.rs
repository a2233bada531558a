// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Siegelwerk — anti-replay sealing service.
//
// Entry point. Initialises logging, loads configuration from the
// environment, and runs the sealing API until interrupted.

use siegelwerk_core::config::SealConfig;
use siegelwerk_server::SealServer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Siegelwerk starting");

    let config = SealConfig::from_env();

    // An absent signing secret is fatal: the service must never run in a
    // state where it could emit unsigned-looking responses.
    let mut server = match SealServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "fatal configuration error");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        tracing::error!(error = %e, "failed to start sealing API");
        std::process::exit(1);
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }

    tracing::info!("shutdown signal received");
    if let Err(e) = server.stop().await {
        tracing::warn!(error = %e, "error during shutdown");
    }
}
