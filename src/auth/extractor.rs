// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Axum extractors for signed requests and optional identity.
//!
//! Use `Signed<T>` in handlers to require a verified wallet signature, where
//! `T` is the operation payload carried alongside the credentials:
//!
//! ```rust,ignore
//! async fn create_dataset(
//!     State(state): State<AppState>,
//!     signed: Signed<CreateDatasetRequest>,
//! ) -> Result<Json<Dataset>, ApiError> {
//!     signed.require_action(ACTION_DATASET_UPLOAD)?;
//!     // signed.user is the verified identity, signed.payload the request
//! }
//! ```

use alloy::primitives::Address;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};

use super::error::AuthError;
use super::verify::{verify_credentials, AuthCredentials, AuthenticatedUser};
use crate::error::ApiError;
use crate::state::AppState;

/// A request whose body carried valid signature credentials.
///
/// The body is deserialized twice from the same buffered bytes: once for the
/// credentials, once for the payload. This keeps the two shapes independent
/// and sidesteps `serde(flatten)` interactions with custom deserializers.
#[derive(Debug)]
pub struct Signed<T> {
    /// The verified identity.
    pub user: AuthenticatedUser,
    /// The action the signature authorizes.
    pub action: String,
    /// The operation payload.
    pub payload: T,
}

/// Payload type for signed requests that carry credentials only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmptyPayload {}

impl<T> Signed<T> {
    /// Require that the signed action matches the route's operation.
    ///
    /// A signature over one action must not authorize a different one, so
    /// every handler binds its expected action explicitly.
    pub fn require_action(&self, expected: &str) -> Result<(), AuthError> {
        if self.action == expected {
            Ok(())
        } else {
            Err(AuthError::VerificationFailed(format!(
                "signature authorizes action '{}', not '{expected}'",
                self.action
            )))
        }
    }
}

impl<T> FromRequest<AppState> for Signed<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read request body: {e}")))?;

        // An absent body is absent credentials, not malformed JSON;
        // verification turns it into `authentication_required`.
        let credentials: AuthCredentials = if bytes.is_empty() {
            AuthCredentials::default()
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {e}")))?
        };
        let user = verify_credentials(state, &credentials).await?;

        let payload: T = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::bad_request(format!("invalid request payload: {e}")))?;

        // Present and non-empty after verification.
        let action = credentials.action.unwrap_or_default();

        Ok(Signed {
            user,
            action,
            payload,
        })
    }
}

/// Best-effort identity for read endpoints.
///
/// Reads a `walletAddress` query parameter, validates its format, and looks
/// the user up. Every failure is swallowed and the request proceeds
/// unauthenticated; this is for personalizing output only and must never be
/// used for authorization decisions.
#[derive(Debug)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionalAuthQuery {
    #[serde(default)]
    wallet_address: Option<String>,
}

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Query(query)) = Query::<OptionalAuthQuery>::from_request_parts(parts, state).await
        else {
            return Ok(OptionalAuth(None));
        };
        let Some(wallet_address) = query.wallet_address else {
            return Ok(OptionalAuth(None));
        };
        if wallet_address.parse::<Address>().is_err() {
            return Ok(OptionalAuth(None));
        }

        let user = state.store.read().await.user_by_wallet(&wallet_address);
        Ok(OptionalAuth(user.map(|user| AuthenticatedUser {
            id: user.id,
            wallet_address: user.wallet_address,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::message::build_auth_message;
    use crate::models::CreateDatasetRequest;
    use alloy::signers::{local::PrivateKeySigner, SignerSync};
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use chrono::Utc;

    fn test_signer() -> PrivateKeySigner {
        PrivateKeySigner::from_bytes(&alloy::primitives::B256::from([0x42u8; 32]))
            .expect("valid secret")
    }

    fn signed_body(signer: &PrivateKeySigner, action: &str, payload: serde_json::Value) -> String {
        let address = signer.address().to_string();
        let timestamp = Utc::now().timestamp_millis();
        let message = build_auth_message(&address, action, timestamp);
        let signature = signer.sign_message_sync(message.as_bytes()).unwrap();

        let mut body = payload;
        body["walletAddress"] = address.into();
        body["signature"] = format!("0x{}", alloy::hex::encode(signature.as_bytes())).into();
        body["timestamp"] = timestamp.into();
        body["action"] = action.into();
        body.to_string()
    }

    fn json_request(body: String) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn signed_extractor_verifies_and_yields_payload() {
        let state = AppState::default();
        let signer = test_signer();
        let body = signed_body(
            &signer,
            "dataset-upload",
            serde_json::json!({
                "title": "Street Scenes",
                "description": "Annotated dashcam footage",
                "category": "vision",
                "price": "1000",
                "cid": "bafybeigdyr",
            }),
        );

        let signed = Signed::<CreateDatasetRequest>::from_request(json_request(body), &state)
            .await
            .expect("extraction succeeds");

        assert_eq!(signed.action, "dataset-upload");
        assert_eq!(signed.payload.title, "Street Scenes");
        assert!(signed.require_action("dataset-upload").is_ok());
    }

    #[tokio::test]
    async fn require_action_rejects_other_operation() {
        let state = AppState::default();
        let signer = test_signer();
        let body = signed_body(&signer, "dataset-upload", serde_json::json!({}));

        let signed = Signed::<EmptyPayload>::from_request(json_request(body), &state)
            .await
            .unwrap();
        let err = signed.require_action("dataset-delete").unwrap_err();
        assert!(matches!(err, AuthError::VerificationFailed(_)));
    }

    #[tokio::test]
    async fn missing_credentials_reject_with_401() {
        let state = AppState::default();
        let body = serde_json::json!({"title": "x"}).to_string();

        let err = Signed::<EmptyPayload>::from_request(json_request(body), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.error, "authentication_required");
    }

    #[tokio::test]
    async fn empty_body_rejects_with_401() {
        let state = AppState::default();

        let err = Signed::<EmptyPayload>::from_request(json_request(String::new()), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.error, "authentication_required");
    }

    async fn optional_auth_for_uri(state: &AppState, uri: &str) -> OptionalAuth {
        let mut parts = HttpRequest::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0;
        OptionalAuth::from_request_parts(&mut parts, state)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn optional_auth_resolves_known_wallet() {
        let state = AppState::default();
        let wallet = "0xAbCd000000000000000000000000000000001234";
        let user = state.store.write().await.lookup_or_create_user(wallet);

        let resolved =
            optional_auth_for_uri(&state, &format!("/v1/datasets?walletAddress={wallet}")).await;
        assert_eq!(resolved.0.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn optional_auth_never_fails() {
        let state = AppState::default();

        // Absent parameter.
        assert!(optional_auth_for_uri(&state, "/v1/datasets").await.0.is_none());
        // Malformed address.
        assert!(
            optional_auth_for_uri(&state, "/v1/datasets?walletAddress=banana")
                .await
                .0
                .is_none()
        );
        // Well-formed but unknown address.
        assert!(optional_auth_for_uri(
            &state,
            "/v1/datasets?walletAddress=0xAbCd000000000000000000000000000000001234"
        )
        .await
        .0
        .is_none());
    }
}
