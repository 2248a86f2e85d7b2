use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Outfit, Product, RankContext, ScoredOutfit, Season, Tone},
    routes::AppState,
    services::{
        diversity::ensure_diversity,
        explanation::{desc_for, title_for, DescInput, TitleInput},
        tone::resolve_tone,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    pub outfits: Vec<Outfit>,
    pub context: RankContext,
    /// Overrides the configured per-archetype cap
    pub diversity_cap: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub user_id: Option<String>,
    /// Explicit tone; otherwise the user's stored tone is used
    pub tone: Option<Tone>,
    pub archetype: String,
    #[serde(default)]
    pub products: Vec<Product>,
    pub season: Option<Season>,
    pub occasion: Option<String>,
    pub secondary: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub title: String,
    pub description: String,
    pub tone: Tone,
}

/// Ranks candidate outfits and applies the diversity cap
pub async fn rank(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RankRequest>,
) -> AppResult<Json<Vec<ScoredOutfit>>> {
    let cap = request
        .diversity_cap
        .unwrap_or_else(|| state.engine.diversity_cap());
    if cap == 0 {
        return Err(AppError::InvalidInput(
            "diversityCap must be at least 1".to_string(),
        ));
    }

    let candidates = request.outfits.len();
    let ranked = state.engine.ranker().rank(request.outfits, &request.context);
    let diverse = ensure_diversity(ranked, cap);

    tracing::info!(
        request_id = %request_id,
        candidates,
        returned = diverse.len(),
        diversity_cap = cap,
        "Ranked outfits"
    );

    Ok(Json(diverse))
}

/// Generates a title and description for an outfit
pub async fn explain(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ExplainRequest>,
) -> AppResult<Json<ExplainResponse>> {
    if request.archetype.trim().is_empty() {
        return Err(AppError::InvalidInput("archetype must not be empty".to_string()));
    }

    let tone = resolve_tone(
        state.tones.as_ref(),
        request.tone,
        request.user_id.as_deref(),
        state.default_tone,
    )
    .await?;

    let title = title_for(
        &TitleInput {
            archetype: &request.archetype,
            key: request.key.as_deref(),
            season: request.season,
        },
        tone,
    );
    let description = desc_for(
        &DescInput {
            archetype: &request.archetype,
            products: &request.products,
            season: request.season,
            occasion: request.occasion.as_deref(),
            secondary: request.secondary.as_deref(),
        },
        tone,
    );

    tracing::info!(
        request_id = %request_id,
        archetype = %request.archetype,
        tone = %tone,
        "Explained outfit"
    );

    Ok(Json(ExplainResponse {
        title,
        description,
        tone,
    }))
}
