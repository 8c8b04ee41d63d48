// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Wallet-signature credential verification.
//!
//! Every state-changing request carries `{walletAddress, signature, timestamp,
//! action}` alongside its payload. Verification rebuilds the expected message
//! from the *claimed* fields, recovers the signer via EIP-191 `personal_sign`
//! recovery, and resolves (or lazily creates) the user record.
//!
//! A signature is valid for exactly one `(walletAddress, action, timestamp)`
//! triple and only within the freshness window, which bounds replay exposure.

use alloy::primitives::{Address, Signature};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::error::AuthError;
use super::message::build_auth_message;
use crate::state::AppState;

/// Maximum accepted age of a signed timestamp (5 minutes).
///
/// Fixed policy constant; there is no extra grace period for clock skew.
pub const SIGNATURE_MAX_AGE_MS: i64 = 5 * 60 * 1000;

/// Signature credentials carried in every mutation request body.
///
/// All fields are optional at the serde level so that a missing field
/// surfaces as `authentication_required` rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthCredentials {
    /// Claimed wallet address (0x + 40 hex chars).
    #[serde(default)]
    pub wallet_address: Option<String>,
    /// Hex-encoded 65-byte `personal_sign` signature.
    #[serde(default)]
    pub signature: Option<String>,
    /// Epoch milliseconds at signing time; JSON number or decimal string.
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    #[schema(value_type = Option<i64>)]
    pub timestamp: Option<i64>,
    /// Operation the signature authorizes, e.g. `dataset-upload`.
    #[serde(default)]
    pub action: Option<String>,
}

/// Identity attached to the request after successful verification.
///
/// Request-scoped; never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Id of the resolved user record.
    pub id: String,
    /// The user's wallet address as stored.
    pub wallet_address: String,
}

/// Accept epoch-millis timestamps as either a JSON number or a decimal string.
fn deserialize_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Number(i64),
        Text(String),
    }

    match Option::<RawTimestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawTimestamp::Number(n)) => Ok(Some(n)),
        Some(RawTimestamp::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Verify signature credentials and resolve the authenticated user.
///
/// On first contact from a wallet this creates the user record; the
/// lookup-or-create runs under the store's write lock, so concurrent
/// first-time requests from the same wallet observe a single record.
pub async fn verify_credentials(
    state: &AppState,
    credentials: &AuthCredentials,
) -> Result<AuthenticatedUser, AuthError> {
    let wallet_address = required(credentials.wallet_address.as_deref(), "walletAddress")?;
    let signature = required(credentials.signature.as_deref(), "signature")?;
    let action = required(credentials.action.as_deref(), "action")?;
    let timestamp = credentials
        .timestamp
        .ok_or(AuthError::MissingCredential("timestamp"))?;

    // The timestamp is client-supplied; checked subtraction keeps an extreme
    // value from wrapping the age negative and defeating the window.
    let age_ms = Utc::now()
        .timestamp_millis()
        .checked_sub(timestamp)
        .ok_or(AuthError::Expired)?;
    if age_ms > SIGNATURE_MAX_AGE_MS {
        return Err(AuthError::Expired);
    }

    let claimed: Address = wallet_address
        .parse()
        .map_err(|_| AuthError::InvalidWalletAddress(wallet_address.to_string()))?;

    // Rebuild from the claimed fields, byte-for-byte.
    let message = build_auth_message(wallet_address, action, timestamp);

    let parsed: Signature = signature
        .parse()
        .map_err(|e| AuthError::VerificationFailed(format!("malformed signature: {e}")))?;
    let recovered = parsed
        .recover_address_from_msg(message.as_bytes())
        .map_err(|e| AuthError::VerificationFailed(format!("recovery failed: {e}")))?;

    // Address comparison is case-insensitive by construction: both sides
    // are parsed 20-byte addresses.
    if recovered != claimed {
        return Err(AuthError::VerificationFailed(format!(
            "recovered signer {recovered} does not match claimed address"
        )));
    }

    let user = state.store.write().await.lookup_or_create_user(wallet_address);
    tracing::debug!(user_id = %user.id, %action, "signature verified");

    Ok(AuthenticatedUser {
        id: user.id,
        wallet_address: user.wallet_address,
    })
}

fn required<'a>(field: Option<&'a str>, name: &'static str) -> Result<&'a str, AuthError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingCredential(name))
}
