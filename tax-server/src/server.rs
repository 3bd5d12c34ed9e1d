//! Server lifecycle: bind, serve, and drain on shutdown.

use std::future::Future;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Binds the configured address and serves until SIGINT or SIGTERM.
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    serve(
        listener,
        AppState::default(),
        shutdown_signal(),
        config.shutdown_timeout(),
    )
    .await
}

/// Serves `state` on `listener` until `shutdown` resolves.
///
/// After `shutdown` resolves the server stops accepting connections and
/// waits up to `drain_timeout` for in-flight requests before giving up on
/// them.
pub async fn serve<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let local_addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!(addr = %local_addr, "listening");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let app = api::router(state);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            warn!("server stopped without a shutdown signal");
            return flatten(result);
        }
        () = shutdown => {}
    }

    info!(timeout = ?drain_timeout, "shutting down");
    let _ = stop_tx.send(());

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(result) => {
            flatten(result)?;
            info!("server stopped");
            Ok(())
        }
        Err(_) => {
            warn!("graceful shutdown timed out; dropping open connections");
            server.abort();
            Ok(())
        }
    }
}

fn flatten(result: Result<io::Result<()>, JoinError>) -> Result<()> {
    result
        .context("Server task failed")?
        .context("Server error")
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            error!(?error, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                error!(?error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
