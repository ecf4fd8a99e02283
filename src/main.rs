use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use livecast::adapters::http::{app_router, BroadcastAppState};
use livecast::adapters::jitter::UniformJitter;
use livecast::application::{
    shutdown_channel, BroadcastScheduler, DispatcherConfig, SchedulerConfig,
};
use livecast::config::AppConfig;
use livecast::domain::session::SessionRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        period_secs = config.broadcast.period_secs,
        "Starting livecast"
    );

    let registry = Arc::new(SessionRegistry::new());
    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    let scheduler = BroadcastScheduler::with_config(
        registry.clone(),
        Arc::new(UniformJitter::new()),
        SchedulerConfig::from(&config.broadcast),
    );
    let scheduler_shutdown = shutdown_rx.clone();
    let scheduler_task = tokio::spawn(async move { scheduler.run(scheduler_shutdown).await });

    let state = BroadcastAppState::new(
        registry,
        DispatcherConfig::from(&config.broadcast),
        shutdown_rx,
    );
    let app = app_router(state, &config.server);

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal(shutdown_tx))
        .await?;

    match scheduler_task.await {
        Ok(reason) => tracing::info!(reason = ?reason, "Scheduler finished"),
        Err(e) => tracing::error!(error = %e, "Scheduler task failed"),
    }

    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Wait for Ctrl-C or SIGTERM, then tell the scheduler and every stream to stop.
async fn wait_for_signal(shutdown: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown requested");
    let _ = shutdown.send(true);
}
