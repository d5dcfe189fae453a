//! Survey Agent Entry Point
//!
//! Loads settings, sets up logging and metrics, then runs survey sessions
//! until the questionnaire ends or a shutdown signal arrives.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use survey_agent_agent::AbortHandle;
use survey_agent_config::Settings;
use survey_agent_server::{build_engine, init_metrics, load_config, run_sessions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("SURVEY_AGENT_ENV").ok();
    let config = match load_config("config", env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Invalid configuration (env: {}): {}", env.as_deref().unwrap_or("default"), e);
            return Err(e.into());
        }
    };

    init_tracing(&config);

    tracing::info!("Starting Survey Agent v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.environment,
        language = %config.dialogue.language,
        continuous = config.runner.continuous,
        "Configuration loaded"
    );

    if let Some(port) = config.observability.metrics_port {
        if let Err(e) = init_metrics(port) {
            tracing::warn!(error = %e, "Metrics exporter not started");
        }
    }

    let engine = build_engine(&config).await?;
    tokio::spawn(abort_on_shutdown(engine.abort_handle()));

    let reports = run_sessions(&engine, &config.runner).await?;

    tracing::info!(sessions = reports.len(), "Survey agent shutdown complete");
    Ok(())
}

/// Abort the running session at the next turn boundary on shutdown
async fn abort_on_shutdown(handle: AbortHandle) {
    shutdown_signal().await;
    handle.abort();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, stopping after the current turn...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, stopping after the current turn...");
        }
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("survey_agent={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}
