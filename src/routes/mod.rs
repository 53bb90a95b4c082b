use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        catalog::CatalogStore, navigation::Navigator, providers::MetadataEnricher,
        ranking::RankingEngine,
    },
};

pub mod movies;
pub mod navigation;

/// Shared, read-only application state
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub engine: Arc<RankingEngine>,
    pub metadata: Arc<dyn MetadataEnricher>,
    pub navigator: Navigator,
}

impl AppState {
    pub fn new(
        engine: Arc<RankingEngine>,
        metadata: Arc<dyn MetadataEnricher>,
        recommendation_count: usize,
    ) -> Self {
        let catalog = engine.catalog().clone();
        let navigator = Navigator::new(
            catalog.clone(),
            engine.clone(),
            metadata.clone(),
            recommendation_count,
        );

        Self {
            catalog,
            engine,
            metadata,
            navigator,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/search", get(movies::search))
        .route("/movies/:id/recommendations", get(movies::recommendations))
        .route("/movies/:id/details", get(movies::details))
        .route("/movies/:id/poster", get(movies::poster))
        .route("/navigation/search", post(navigation::search))
        .route("/navigation/click", post(navigation::click))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
