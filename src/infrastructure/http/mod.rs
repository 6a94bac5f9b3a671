use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{batch::BatchController, health};
use crate::domain::batch::BatchService;
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::{credentials_middleware, request_id_middleware};

/// Build the application router with all routes configured
pub fn build_router(
    config: Arc<Config>,
    batch_service: Arc<BatchService>,
    batch_controller: Arc<BatchController>,
) -> Router {
    // Running needs synthesis credentials
    let run_routes = Router::new()
        .route("/api/batch/run", post(BatchController::start_run))
        .with_state(batch_controller.clone())
        .layer(middleware::from_fn_with_state(
            config.clone(),
            credentials_middleware,
        ));

    let batch_routes = Router::new()
        .route(
            "/api/batch",
            get(BatchController::get_batch)
                .post(BatchController::load_script)
                .delete(BatchController::clear),
        )
        .route(
            "/api/batch/items/:itemId/audio",
            get(BatchController::download_audio),
        )
        .with_state(batch_controller);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state((batch_service, config.clone()));

    let app = Router::new()
        .merge(health_routes)
        .merge(batch_routes)
        .merge(run_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http()),
        );

    // The presentation layer is served from another origin during development
    if config.is_development() {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Start the HTTP server
pub async fn start_http_server(config: Arc<Config>, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
