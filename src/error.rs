// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! API error type returned by route handlers.
//!
//! Every rejection serializes as `{ "error": <machine code>, "details": <human string> }`
//! so the front-end can branch on `error` and surface `details` directly.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub details: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, details: impl Into<String>) -> Self {
        Self {
            status,
            error,
            details: details.into(),
        }
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "resource_not_found", details)
    }

    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", details)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        let details = details.into();
        // Real failure detail stays server-side.
        tracing::error!(error = %details, "internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "An unexpected error occurred",
        )
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        // Internal failures log their detail and answer with a generic body.
        if let AuthError::Internal(detail) = err {
            return Self::internal(detail);
        }
        Self {
            status: err.status_code(),
            error: err.error_code(),
            details: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.error.to_string(),
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_code() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.error, "resource_not_found");
        assert_eq!(nf.details, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.error, "invalid_request");
    }

    #[test]
    fn internal_withholds_detail() {
        let err = ApiError::internal("database exploded");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.details.contains("database"));
    }

    #[test]
    fn internal_auth_error_converts_through_internal() {
        let err = ApiError::from(AuthError::Internal("rate limiter lock poisoned".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "internal_error");
        assert!(!err.details.contains("poisoned"));
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "invalid_request");
        assert_eq!(body["details"], "bad data");
    }
}
