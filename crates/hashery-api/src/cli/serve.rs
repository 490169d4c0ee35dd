//! `hashd serve`: run the HTTP server until shutdown.
//!
//! Ctrl+C, SIGTERM, and `POST /shutdown` all end up in
//! `ShutdownCoordinator::request_shutdown`. The server then stops accepting
//! connections and gives outstanding requests and in-flight completions one
//! shared grace period, counted from the moment draining began.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::Instant;

use hashery_core::shutdown::ShutdownCoordinator;
use hashery_types::config::ServiceConfig;

use crate::http::router::build_router;
use crate::state::AppState;

pub async fn serve(config: ServiceConfig, quiet: bool) -> anyhow::Result<()> {
    config.validate()?;

    let state = AppState::new(&config);
    let coordinator = state.hash_service.shutdown_coordinator().clone();

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;

    if !quiet {
        println!(
            "  {} Hashery listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!(
            "  {}",
            console::style(format!(
                "mode: {}, minimum delay: {}ms. Press Ctrl+C to stop",
                config.mode, config.min_delay_ms
            ))
            .dim()
        );
    }
    tracing::info!(%addr, mode = %config.mode, min_delay_ms = config.min_delay_ms, "server started");

    let signals = tokio::spawn(forward_signals(coordinator));
    let result = run(listener, state, config.shutdown_grace()).await;
    signals.abort();

    let drained = result?;
    if !quiet {
        if drained {
            println!("\n  Server stopped.");
        } else {
            println!("\n  Server stopped; some pending hashes were dropped.");
        }
    }

    Ok(())
}

/// Serve `state` on `listener` until shutdown is requested, then drain.
///
/// Open connections and in-flight completions share a single deadline,
/// `grace` after draining began. Returns `false` if some completions had to
/// be abandoned.
pub async fn run(listener: TcpListener, state: AppState, grace: Duration) -> anyhow::Result<bool> {
    let service = Arc::clone(&state.hash_service);
    let coordinator = service.shutdown_coordinator().clone();

    let server = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(coordinator.draining())
        .into_future();
    let mut server = std::pin::pin!(server);

    let deadline = tokio::select! {
        biased;
        _ = coordinator.draining() => {
            let deadline = Instant::now() + grace;
            tokio::select! {
                result = &mut server => result?,
                _ = tokio::time::sleep_until(deadline) => {
                    tracing::warn!(grace_secs = grace.as_secs(), "open connections outlived the grace period, closing them");
                }
            }
            deadline
        }
        result = &mut server => {
            result?;
            Instant::now() + grace
        }
    };

    Ok(service.drain(deadline).await)
}

/// Turn Ctrl+C or SIGTERM into a shutdown request.
async fn forward_signals(coordinator: ShutdownCoordinator) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C"),
        _ = terminate => tracing::info!("received SIGTERM"),
        _ = coordinator.draining() => return,
    }

    coordinator.request_shutdown();
}
