// src/bin/api_server.rs

use anime_service::infra::logging;
use anime_service::storage::{AnimeRepository, InMemoryAnimeRepository, PgAnimeRepository};
use anime_service::transport;
use anime_service::{AnimeService, AppConfig};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("info,tower_http=debug,sqlx=warn");
    let config = AppConfig::from_env()?;

    // --- Repository Initialization ---
    let repository: Arc<dyn AnimeRepository> = match config.database_url.as_deref() {
        Some(url) => {
            info!(max_connections = config.max_connections, "connecting to PostgreSQL");
            Arc::new(PgAnimeRepository::connect(url, config.max_connections).await?)
        }
        None => {
            warn!("DATABASE_URL not set, using the in-memory repository (data is lost on exit)");
            Arc::new(InMemoryAnimeRepository::new())
        }
    };

    // --- Service Initialization ---
    let app_state = transport::http::AppState::new(
        AnimeService::new(repository),
        config.default_page_size,
    );

    // --- API Server Initialization ---
    let app = transport::http::create_app(app_state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on http://{}", config.bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
