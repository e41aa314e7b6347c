use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::error::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Repository(#[from] Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Repository(Error::SnippetNotFound(_) | Error::TagNotFound { .. }) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Repository(Error::SnippetExists(_) | Error::TagExists { .. }) => {
                StatusCode::CONFLICT
            }
            ApiError::Repository(Error::NoTagsPresent(_)) => StatusCode::BAD_REQUEST,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Repository(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let cases = [
            (ApiError::from(Error::SnippetNotFound(1)), StatusCode::NOT_FOUND),
            (ApiError::from(Error::SnippetExists(1)), StatusCode::CONFLICT),
            (
                ApiError::from(Error::TagExists { id: 1, tag: "a".into() }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(Error::TagNotFound { id: 1, tag: "a".into() }),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::from(Error::NoTagsPresent(1)), StatusCode::BAD_REQUEST),
            (ApiError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
