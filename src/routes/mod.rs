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
    config::Config,
    middleware::{make_span_with_request_id, request_id_middleware},
    models::Tone,
    services::{catalog::ProductCatalog, recommendations::RecommendationEngine, tone::ToneStore},
};

pub mod outfits;
pub mod personas;
pub mod recommendations;
pub mod scores;
pub mod tone;

/// Shared handler state
pub struct AppState {
    pub catalog: Arc<dyn ProductCatalog>,
    pub tones: Arc<dyn ToneStore>,
    pub engine: RecommendationEngine,
    /// Tone for users without a stored setting
    pub default_tone: Tone,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        tones: Arc<dyn ToneStore>,
        config: &Config,
    ) -> Self {
        Self {
            catalog,
            tones,
            engine: RecommendationEngine::from_config(config),
            default_tone: config.default_tone,
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
            // Request id is assigned before the trace span is opened
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/personas", get(personas::list))
        .route("/scores/match", post(scores::match_score))
        .route("/scores/persona", post(scores::persona_score))
        .route("/outfits/rank", post(outfits::rank))
        .route("/outfits/explain", post(outfits::explain))
        .route("/recommendations", post(recommendations::recommend))
        .route("/users/:user_id/tone", get(tone::get_tone).put(tone::set_tone))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
