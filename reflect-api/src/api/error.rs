//! HTTP mapping for analysis errors
//!
//! | Error        | Status | Message returned       |
//! |--------------|--------|------------------------|
//! | InvalidInput | 400    | as raised              |
//! | Processing   | 422    | as raised              |
//! | Server       | 500    | generic                |
//! | unknown      | 500    | generic, UNKNOWN_ERROR |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

use crate::error::{AnalysisError, ErrorCode};

const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// Error body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    pub error_code: ErrorCode,
}

/// Handler error
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Failure outside the analysis taxonomy
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        if e.is_panic() {
            AnalysisError::server(
                format!("Unexpected error during analysis: {}", e),
                ErrorCode::AnalysisError,
            )
            .into()
        } else {
            ApiError::Unknown(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Analysis(AnalysisError::InvalidInput { message, code }) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid Input",
                    message,
                    error_code: code,
                },
            ),
            ApiError::Analysis(AnalysisError::Processing { message, code }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "Processing Failed",
                    message,
                    error_code: code,
                },
            ),
            ApiError::Analysis(AnalysisError::Server { message, code }) => {
                error!(%code, "Analysis server error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal Server Error",
                        message: GENERIC_MESSAGE.to_string(),
                        error_code: code,
                    },
                )
            }
            ApiError::Unknown(detail) => {
                error!("Unknown error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Unknown Error",
                        message: GENERIC_MESSAGE.to_string(),
                        error_code: ErrorCode::UnknownError,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
