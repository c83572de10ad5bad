use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use claimroute::api::{create_router, AppState};
use claimroute::batch::{BatchOptions, BatchRunner};
use claimroute::config::{BatchArgs, Command, Config, ServeArgs};
use claimroute::observability::{init_tracing, MetricsRegistry};
use claimroute::policy::{PolicyLoader, PolicyWatcher};
use claimroute::rules::RuleSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting claimroute assessment engine"
    );

    let loader = PolicyLoader::from_path(config.policy_path.clone());

    match config.command {
        Command::Serve(args) => serve(loader, args).await,
        Command::Batch(args) => batch(loader, args).await,
    }
}

async fn serve(loader: PolicyLoader, args: ServeArgs) -> anyhow::Result<()> {
    let metrics = Arc::new(MetricsRegistry::new());

    // Start policy watcher
    let watcher = PolicyWatcher::new(loader, args.policy_reload_interval())
        .with_metrics(Arc::clone(&metrics));
    let (ruleset_rx, policy_handle) = watcher.start();

    // Create application state
    let state = Arc::new(AppState {
        ruleset_rx,
        metrics,
        start_time: Instant::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        latency_budget_ms: args.latency_budget_ms,
    });

    let app = create_router(state);

    let addr: SocketAddr = args.listen_addr.parse()?;
    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    if args.graceful_shutdown {
        let shutdown_timeout = args.shutdown_timeout();
        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        tokio::select! {
            result = server => result?,
            _ = async {
                shutdown_signal().await;
                tokio::time::sleep(shutdown_timeout).await;
            } => {
                warn!(
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Graceful shutdown timed out, dropping open connections"
                );
            }
        }
    } else {
        axum::serve(listener, app).await?;
    }

    // Cleanup
    info!("Shutting down...");
    policy_handle.abort();

    info!("Shutdown complete");
    Ok(())
}

async fn batch(loader: PolicyLoader, args: BatchArgs) -> anyhow::Result<()> {
    let ruleset = match loader.load() {
        Ok((policy, ruleset)) => {
            info!(
                version = %policy.version,
                rules = ruleset.len(),
                "Routing policy loaded"
            );
            ruleset
        }
        Err(e) => {
            error!(error = %e, "Failed to load routing policy, using built-in policy");
            RuleSet::standard()
        }
    };

    let options = BatchOptions::new(args.input_dir, args.output_dir)
        .with_extensions(&args.extensions)
        .with_concurrency(args.concurrency);

    let report = BatchRunner::new(options, Arc::new(ruleset)).run().await?;

    if report.failed > 0 {
        warn!(failed = report.failed, "Some documents could not be processed");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
