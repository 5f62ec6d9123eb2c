//! Listener plumbing shared by the HTTP and RPC front ends.
//!
//! Both routers get the same read-only `ServiceState`. Each listener runs
//! until its `Shutdown` handle fires, then drains in-flight requests.

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use crate::config::AppConfig;

/// Read-only state injected into every handler.
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub config: AppConfig,
}

impl ServiceState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn service_name(&self) -> &str {
        &self.config.service.name
    }
}

pub type AppState = Arc<ServiceState>;

// ---------------------------------------------------------------------------
// Shutdown
// ---------------------------------------------------------------------------

/// Receiving half of a shutdown signal. Clone one per listener.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

/// Sending half. Dropping it also counts as a shutdown request.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Shutdown {
    #[cfg(test)]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown has been requested.
    pub async fn wait(mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                break;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Serving
// ---------------------------------------------------------------------------

/// Bind `0.0.0.0:port` and serve `app` until `shutdown` fires.
pub async fn serve(name: &'static str, port: u16, app: Router, shutdown: Shutdown) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {name} port {port}"))?;

    info!(server = name, port, "Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.wait())
        .await
        .with_context(|| format!("{name} server error"))?;

    info!(server = name, "Server stopped");
    Ok(())
}
