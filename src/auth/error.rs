// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure taxonomy for signature verification and resource authorization.
///
/// Every variant maps to a machine-readable code and an actionable
/// `details` string; none of them propagate as uncaught errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A credential field (walletAddress, signature, timestamp, action) is missing.
    #[error("Missing authentication field: {0}")]
    MissingCredential(&'static str),
    /// The signed timestamp is older than the freshness window.
    #[error("Signature timestamp expired; sign a fresh message and retry")]
    Expired,
    /// The wallet address fails hex-address format validation.
    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),
    /// The signature is malformed or was produced by a different key.
    #[error("Signature verification failed: {0}")]
    VerificationFailed(String),
    /// Authenticated, but not the owner of the requested resource.
    #[error("You do not have access to this resource")]
    AccessDenied,
    /// The requested resource does not exist.
    #[error("{0} not found")]
    ResourceNotFound(&'static str),
    /// Upload quota exhausted for this wallet.
    #[error("Rate limit exceeded; try again in {minutes} minute(s)")]
    RateLimitExceeded {
        /// Minutes until the window resets.
        minutes: u64,
    },
    /// Unexpected store failure. Detail is logged, not returned.
    #[error("An unexpected error occurred")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    details: String,
}

impl AuthError {
    /// Machine-readable error code placed in the `error` field.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(_) => "authentication_required",
            AuthError::Expired => "authentication_expired",
            AuthError::InvalidWalletAddress(_) => "invalid_wallet_address",
            AuthError::VerificationFailed(_) => "authentication_failed",
            AuthError::AccessDenied => "access_denied",
            AuthError::ResourceNotFound(_) => "resource_not_found",
            AuthError::RateLimitExceeded { .. } => "rate_limit_exceeded",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential(_)
            | AuthError::Expired
            | AuthError::VerificationFailed(_) => StatusCode::UNAUTHORIZED,
            AuthError::InvalidWalletAddress(_) => StatusCode::BAD_REQUEST,
            AuthError::AccessDenied => StatusCode::FORBIDDEN,
            AuthError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AuthError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Internal(ref detail) = self {
            tracing::error!(error = %detail, "internal auth error");
        }
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.error_code().to_string(),
            details: self.to_string(),
        });
        (status, body).into_response()
    }
}
