use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::users::repo::StoreError;

/// Errors surfaced to HTTP clients. `Display` is the exact `error` string.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing email")]
    MissingEmail,
    #[error("Missing password")]
    MissingPassword,
    #[error("Already exist")]
    AlreadyExists,
    #[error("Invalid JSON body")]
    InvalidBody,
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingEmail
            | ApiError::MissingPassword
            | ApiError::AlreadyExists
            | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => ApiError::AlreadyExists,
            StoreError::Unrepresentable => ApiError::InvalidBody,
            StoreError::Backend(e) => ApiError::Internal(e),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = ?e, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_bad_request() {
        for e in [
            ApiError::MissingEmail,
            ApiError::MissingPassword,
            ApiError::AlreadyExists,
            ApiError::InvalidBody,
        ] {
            assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_duplicate_maps_to_already_exist() {
        let e = ApiError::from(StoreError::Duplicate);
        assert_eq!(e.to_string(), "Already exist");
    }

    #[test]
    fn unrepresentable_value_is_client_error() {
        let e = ApiError::from(StoreError::Unrepresentable);
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "Invalid JSON body");
    }

    #[test]
    fn backend_failure_hides_cause() {
        let e = ApiError::from(StoreError::Backend(anyhow::anyhow!("connection refused")));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.to_string(), "Internal server error");
    }
}
