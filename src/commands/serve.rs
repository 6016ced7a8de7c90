//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database, Persistence};
use crate::services::bootstrap;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let db = Arc::new(Database::connect(&config).await?);

    if config.seed_on_startup && !args.no_seed {
        let report = bootstrap(&Persistence::new(db.handle())).await?;
        if !report.is_noop() {
            tracing::info!(
                users = report.users_created,
                products = report.products_created,
                "Bootstrap data loaded"
            );
        }
    }

    let cache = match config.redis_url.as_deref() {
        Some(url) => Some(Arc::new(Cache::try_connect(url).await?)),
        None => {
            tracing::warn!("REDIS_URL not set; rate limiting is disabled");
            None
        }
    };

    let host = args.host.unwrap_or_else(|| config.server_host.clone());
    let port = args.port.unwrap_or(config.server_port);

    let app = create_router(AppState::from_config(db, cache, config));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
