//! Roulette service entry point.
//!
//! Loads configuration, initialises structured logging, and runs the HTTP
//! and RPC listeners side by side until Ctrl+C.

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

use roulette::config::AppConfig;
use roulette::server::{shutdown_channel, ServiceState, ShutdownTrigger};
use roulette::{http, rpc};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("ROULETTE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = AppConfig::load(&config_path)?;

    init_logging();

    info!(
        service = %cfg.service.name,
        version = %cfg.metadata.version,
        game_type = %cfg.metadata.game_type,
        http_port = cfg.service.http_port,
        rpc_port = cfg.service.rpc_port,
        "Roulette service initializing"
    );

    let state = Arc::new(ServiceState::new(cfg));
    let (trigger, shutdown) = shutdown_channel();
    let trigger = Arc::new(trigger);

    let http_task = tokio::spawn(supervise(
        http::serve_http(state.clone(), shutdown.clone()),
        trigger.clone(),
    ));
    let rpc_task = tokio::spawn(supervise(
        rpc::serve_rpc(state, shutdown.clone()),
        trigger.clone(),
    ));

    info!("Roulette service running (HTTP + RPC). Press Ctrl+C to stop.");

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("Failed to listen for Ctrl+C")?;
            info!("Shutdown signal received.");
        }
        _ = shutdown.clone().wait() => {
            warn!("A listener stopped; shutting down the other.");
        }
    }
    trigger.trigger();

    let (http_res, rpc_res) = tokio::join!(http_task, rpc_task);
    let mut failed = false;
    for (name, res) in [("http", http_res), ("rpc", rpc_res)] {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(server = name, error = %format!("{e:#}"), "Server exited with error");
                failed = true;
            }
            Err(e) => {
                error!(server = name, error = %e, "Server task panicked");
                failed = true;
            }
        }
    }

    if failed {
        anyhow::bail!("one or more listeners failed");
    }

    info!("Roulette service shut down cleanly.");
    Ok(())
}

/// Run a listener; when it exits for any reason, stop the other one too.
async fn supervise<F>(listener: F, trigger: Arc<ShutdownTrigger>) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let res = listener.await;
    trigger.trigger();
    res
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roulette=info,tower_http=info"));

    let json_logging = std::env::var("ROULETTE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
