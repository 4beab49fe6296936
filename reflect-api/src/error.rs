//! Error types for reflect-api
//!
//! Three failure classes reach the caller:
//! - `InvalidInput`: caller-fixable defects in the submitted text
//! - `Processing`: emotion detection failed for this request
//! - `Server`: anything unexpected; detail is logged, never returned

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Machine-readable error code returned alongside every error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyText,
    InvalidType,
    TooShort,
    TooLong,
    InappropriateContent,
    InvalidContent,
    NumbersOnly,
    SpamDetected,
    InvalidConfidenceType,
    InvalidConfidenceRange,
    /// Request body was not a usable JSON object
    InvalidInput,
    DetectionFailed,
    AnalysisError,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyText => "EMPTY_TEXT",
            ErrorCode::InvalidType => "INVALID_TYPE",
            ErrorCode::TooShort => "TOO_SHORT",
            ErrorCode::TooLong => "TOO_LONG",
            ErrorCode::InappropriateContent => "INAPPROPRIATE_CONTENT",
            ErrorCode::InvalidContent => "INVALID_CONTENT",
            ErrorCode::NumbersOnly => "NUMBERS_ONLY",
            ErrorCode::SpamDetected => "SPAM_DETECTED",
            ErrorCode::InvalidConfidenceType => "INVALID_CONFIDENCE_TYPE",
            ErrorCode::InvalidConfidenceRange => "INVALID_CONFIDENCE_RANGE",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::DetectionFailed => "DETECTION_FAILED",
            ErrorCode::AnalysisError => "ANALYSIS_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis pipeline error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input rejected before or during analysis
    #[error("{message} ({code})")]
    InvalidInput { message: String, code: ErrorCode },

    /// Emotion detection failed
    #[error("{message} ({code})")]
    Processing { message: String, code: ErrorCode },

    /// Unexpected failure anywhere else in the pipeline
    #[error("{message} ({code})")]
    Server { message: String, code: ErrorCode },
}

impl AnalysisError {
    pub fn invalid_input(message: impl Into<String>, code: ErrorCode) -> Self {
        AnalysisError::InvalidInput {
            message: message.into(),
            code,
        }
    }

    pub fn processing(message: impl Into<String>, code: ErrorCode) -> Self {
        AnalysisError::Processing {
            message: message.into(),
            code,
        }
    }

    pub fn server(message: impl Into<String>, code: ErrorCode) -> Self {
        AnalysisError::Server {
            message: message.into(),
            code,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::InvalidInput { code, .. }
            | AnalysisError::Processing { code, .. }
            | AnalysisError::Server { code, .. } => *code,
        }
    }

    /// Message as raised, including internal detail for `Server`
    pub fn message(&self) -> &str {
        match self {
            AnalysisError::InvalidInput { message, .. }
            | AnalysisError::Processing { message, .. }
            | AnalysisError::Server { message, .. } => message,
        }
    }
}

/// Convenience Result type for the analysis pipeline
pub type Result<T> = std::result::Result<T, AnalysisError>;
