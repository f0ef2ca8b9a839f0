//! HTTP server startup logic.
//!
//! Binding is split from serving so a failed bind surfaces as its own error
//! and tests can serve on an ephemeral listener.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::SHUTDOWN_GRACE_PERIOD_SECS;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind a TCP listener on `addr`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Bind `addr` and serve `app` until SIGINT/SIGTERM.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = bind(addr).await?;
    let local_addr = listener.local_addr().unwrap_or(addr);
    tracing::info!(
        addr = %local_addr,
        "Recommendation service running on http://{}",
        local_addr
    );

    serve(
        listener,
        app,
        shutdown::shutdown_signal(),
        Duration::from_secs(SHUTDOWN_GRACE_PERIOD_SECS),
    )
    .await
}

/// Serve `app` on an already bound listener until `signal` resolves.
///
/// Once the signal fires the listener stops accepting and in-flight requests
/// get `grace_period` to finish before the server gives up on them.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace_period: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (draining_tx, mut draining_rx) = watch::channel(false);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        signal.await;
        let _ = draining_tx.send(true);
    });
    let server = async move { server.await };

    let deadline = async move {
        if draining_rx.changed().await.is_err() {
            // Sender dropped without a signal: the server already stopped
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace_period).await;
    };

    tokio::select! {
        result = server => {
            tracing::info!("Server stopped");
            result.map_err(ServerError::Serve)
        }
        _ = deadline => {
            tracing::warn!(
                grace_period_ms = grace_period.as_millis() as u64,
                "Grace period elapsed, dropping remaining connections"
            );
            Ok(())
        }
    }
}
