use std::sync::Arc;

use anyhow::Result;
use caloriewise::{config::Config, routes::AppState};
use caloriewise_assistant::Assistant;
use caloriewise_meal::{MonthlyHistory, SimulatedNutrition};
use time::OffsetDateTime;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting caloriewise server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let assistant = Assistant::gemini(config.assistant.gemini_settings())?;
    let history = MonthlyHistory::simulate(OffsetDateTime::now_utc().date(), &mut rand::rng());

    tracing::info!(
        daily_goal = config.tracker.daily_goal,
        model = %config.assistant.model,
        average = history.average(),
        "session initialized"
    );

    let state = AppState::new(
        config,
        assistant,
        Arc::new(SimulatedNutrition::new()),
        history,
    );

    let app = caloriewise::routes::router(state)
        // no-cache for pages, long lived cache for static files
        .layer(axum::middleware::from_fn(
            caloriewise::middleware::cache_control_middleware,
        ))
        // Minify HTML responses before compression
        .layer(axum::middleware::map_response(
            caloriewise::middleware::minify_html_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}
