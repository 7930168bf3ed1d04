use anyhow::Context;
use movie_recs::{FetcherConfig, RecommendationFetcher};
use recommendation_service::{AppState, ServiceConfig, build_router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Human-readable logs by default, JSON lines with `LOG_FORMAT=json`.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "recommendation_service=info,movie_recs=info,tower_http=info".into()
    });

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting movie recommendation service");

    let service_config = ServiceConfig::from_env().context("invalid service configuration")?;
    let fetcher_config = FetcherConfig::from_env();
    if fetcher_config.api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set, recommendation requests will fail");
    }

    let fetcher =
        RecommendationFetcher::new(fetcher_config).context("failed to build HTTP client")?;
    info!(config = ?fetcher.config(), "Recommendation fetcher ready");

    let app = build_router(AppState::new(Arc::new(fetcher)));

    let listener = TcpListener::bind(service_config.bind_address())
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                service_config.host, service_config.port
            )
        })?;
    let addr = listener.local_addr()?;

    info!("Server running on http://{}", addr);
    info!("Available endpoints:");
    info!("  POST /  - Generate movie recommendations");
    info!("    Example: curl -X POST http://{}/ -H 'Content-Type: application/json' -d '{{\"prompt\":\"rainy-day heist movies\"}}'", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
