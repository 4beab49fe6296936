//! Reflection analysis endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use super::ApiError;
use crate::analyzer::AnalysisResult;
use crate::error::{AnalysisError, ErrorCode};
use crate::{process_reflection, AppState};

/// Request body for POST /analyze
///
/// `text` is kept as raw JSON so the validator can tell an absent or
/// non-string value apart from an empty string.
#[derive(Debug, Default, Deserialize)]
pub struct ReflectionInput {
    #[serde(default)]
    pub text: Option<Value>,
}

/// POST /analyze
///
/// Validates the reflection text, then labels it with an emotion and a
/// confidence score.
pub async fn analyze_reflection(
    State(state): State<AppState>,
    payload: Result<Json<ReflectionInput>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(input) = payload.map_err(|rejection| {
        debug!(%request_id, "Rejected request body: {}", rejection.body_text());
        AnalysisError::invalid_input(rejection.body_text(), ErrorCode::InvalidInput)
    })?;

    let analyzer = state.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || {
        process_reflection(&analyzer, input.text.as_ref())
    })
    .await??;

    info!(
        %request_id,
        emotion = %result.emotion,
        confidence = result.confidence,
        "Reflection analyzed"
    );

    Ok(Json(result))
}
