use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{RankContext, StylePreferences, Tone},
    routes::AppState,
    services::{
        recommendations::{RecommendationQuery, Recommendations, DEFAULT_RECOMMENDATION_LIMIT},
        tone::resolve_tone,
    },
};

/// Largest product `limit` a request may ask for
const MAX_RECOMMENDATION_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub user_id: Option<String>,
    #[serde(default)]
    pub preferences: Option<StylePreferences>,
    pub context: RankContext,
    pub persona_id: Option<String>,
    pub limit: Option<usize>,
    pub tone: Option<Tone>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Recommendations>> {
    if let Some(preferences) = &request.preferences {
        preferences.validate().map_err(AppError::InvalidInput)?;
    }
    let limit = request.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    if limit == 0 || limit > MAX_RECOMMENDATION_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {}",
            MAX_RECOMMENDATION_LIMIT
        )));
    }

    tracing::info!(
        request_id = %request_id,
        catalog = state.catalog.name(),
        has_preferences = request.preferences.is_some(),
        "Processing recommendation request"
    );

    let tone = resolve_tone(
        state.tones.as_ref(),
        request.tone,
        request.user_id.as_deref(),
        state.default_tone,
    )
    .await?;

    let (products, outfits) =
        tokio::try_join!(state.catalog.list_products(), state.catalog.list_outfits())?;

    let query = RecommendationQuery {
        preferences: request.preferences,
        context: request.context,
        persona_id: request.persona_id,
        limit,
        tone,
    };
    let recommendations = state.engine.recommend(products, outfits, &query);

    tracing::info!(
        request_id = %request_id,
        products = recommendations.products.len(),
        outfits = recommendations.outfits.len(),
        "Recommendations completed"
    );

    Ok(Json(recommendations))
}
