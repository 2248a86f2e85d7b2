use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Product, StylePreferences},
    routes::AppState,
    services::{
        match_score::{self as matching, MatchInsight, MatchOutcome},
        persona_score::score_for_persona,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreRequest {
    pub product: Product,
    #[serde(default)]
    pub preferences: Option<StylePreferences>,
    pub max_possible_score: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScoreResponse {
    pub score: f64,
    pub percentage: u8,
    pub outcome: MatchOutcome,
    pub insight: MatchInsight,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaScoreRequest {
    pub product: Product,
    pub persona_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaScoreResponse {
    pub score: u8,
    pub persona_id: &'static str,
    pub fell_back: bool,
}

/// Scores one product against a preference vector
pub async fn match_score(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<MatchScoreRequest>,
) -> AppResult<Json<MatchScoreResponse>> {
    if let Some(preferences) = &request.preferences {
        preferences.validate().map_err(AppError::InvalidInput)?;
    }
    let max = request
        .max_possible_score
        .unwrap_or_else(|| state.engine.max_match_score());

    let result = matching::match_score(&request.product, request.preferences.as_ref());
    let percentage = matching::calculate_match_percentage(result.score, max);

    tracing::info!(
        request_id = %request_id,
        product_id = %request.product.id,
        score = result.score,
        percentage,
        "Scored product match"
    );

    Ok(Json(MatchScoreResponse {
        score: result.score,
        percentage,
        outcome: result.outcome,
        insight: matching::match_insight(percentage),
    }))
}

/// Scores one product against a persona
pub async fn persona_score(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<PersonaScoreRequest>,
) -> AppResult<Json<PersonaScoreResponse>> {
    let result = score_for_persona(
        &request.product,
        &request.persona_id,
        state.engine.color_rule(),
    );

    tracing::info!(
        request_id = %request_id,
        product_id = %request.product.id,
        persona_id = result.persona_id,
        score = result.score,
        fell_back = result.fell_back(),
        "Scored product for persona"
    );

    Ok(Json(PersonaScoreResponse {
        score: result.score,
        persona_id: result.persona_id,
        fell_back: result.fell_back(),
    }))
}
