//! reflect-api library - Emotion reflection analysis service
//!
//! Validates free-text reflections and labels them with a keyword-derived
//! emotion and a jittered confidence score.

use std::sync::Arc;

use axum::Router;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod analyzer;
pub mod api;
pub mod error;
pub mod validator;

pub use analyzer::{AnalysisResult, EmotionAnalyzer, EmotionCategory};
pub use error::{AnalysisError, ErrorCode};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only keyword and confidence tables
    pub analyzer: Arc<EmotionAnalyzer>,
}

impl AppState {
    /// Create new application state
    pub fn new(analyzer: Arc<EmotionAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(EmotionAnalyzer::default()))
    }
}

/// Validate a raw `text` field, then analyze it
///
/// Validation failures abort before any analysis work.
pub fn process_reflection(
    analyzer: &EmotionAnalyzer,
    raw: Option<&Value>,
) -> error::Result<AnalysisResult> {
    let text = validator::validate_reflection_input(raw)?;
    analyzer.analyze(&text)
}

/// Build application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::root))
        .route("/analyze", post(api::analyze_reflection))
        .route("/build_info", get(api::get_build_info))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
