//! Error types for the upload service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Upload service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required request field missing
    #[error("Missing {0} in request body")]
    MissingField(&'static str),

    /// Extracted data failed validation (empty or negative values)
    #[error("{0}")]
    Validation(String),

    /// Downloading the source spreadsheet failed
    #[error("Failed to fetch spreadsheet: {0}")]
    Fetch(String),

    /// The downloaded bytes could not be parsed as a workbook
    #[error("Failed to parse workbook: {0}")]
    WorkbookParse(String),

    /// Document database error
    #[error("Document database error: {0}")]
    DocumentDb(String),

    /// Object storage error
    #[error("Object storage error: {0}")]
    ObjectStore(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Create a document database error
    pub fn document_db(message: impl Into<String>) -> Self {
        Self::DocumentDb(message.into())
    }

    /// Create an object storage error
    pub fn object_store(message: impl Into<String>) -> Self {
        Self::ObjectStore(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Status code this error maps to at the HTTP boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("request failed: {}", message);
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(
            Error::MissingField("'url' or 'currentMonth'").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::validation("One or more required values are negative.").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_infrastructure_errors_are_server_errors() {
        assert_eq!(
            Error::fetch("connection refused").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::document_db("write failed").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_field_message_matches_api_contract() {
        let err = Error::MissingField("'url' or 'currentMonth'");
        assert_eq!(
            err.to_string(),
            "Missing 'url' or 'currentMonth' in request body"
        );
    }
}
