use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{error::AppResult, middleware::RequestId, models::Tone, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct SetToneRequest {
    pub tone: Tone,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneResponse {
    pub user_id: String,
    pub tone: Tone,
    /// False when the user has no stored tone and the default is reported
    pub stored: bool,
}

pub async fn get_tone(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ToneResponse>> {
    let stored = state.tones.get_tone(&user_id).await?;

    Ok(Json(ToneResponse {
        tone: stored.unwrap_or(state.default_tone),
        stored: stored.is_some(),
        user_id,
    }))
}

pub async fn set_tone(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Json(request): Json<SetToneRequest>,
) -> AppResult<Json<ToneResponse>> {
    state.tones.set_tone(&user_id, request.tone).await?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        tone = %request.tone,
        "Updated explanation tone"
    );

    Ok(Json(ToneResponse {
        user_id,
        tone: request.tone,
        stored: true,
    }))
}
