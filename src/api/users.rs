// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! User profile endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::Signed,
    error::ApiError,
    models::{UpdateProfileRequest, User},
    state::AppState,
};

/// Action a profile update signature must authorize.
pub const ACTION_PROFILE_UPDATE: &str = "profile-update";

/// Public profile lookup by wallet address, case-insensitive.
#[utoipa::path(
    get,
    path = "/v1/users/{wallet}",
    params(("wallet" = String, Path, description = "Wallet address of the user")),
    tag = "Users",
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 404, description = "No user for this wallet"),
    )
)]
pub async fn get_user(
    Path(wallet): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let store = state.store.read().await;
    store
        .user_by_wallet(&wallet)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// Update the authenticated user's display name.
///
/// The wallet address is immutable after creation and cannot be changed here.
#[utoipa::path(
    put,
    path = "/v1/users/me",
    request_body = UpdateProfileRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Updated profile", body = User),
        (status = 401, description = "Missing, expired, or invalid signature"),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    signed: Signed<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    signed.require_action(ACTION_PROFILE_UPDATE)?;

    let mut store = state.store.write().await;
    let user = store.update_display_name(&signed.user.id, signed.payload.display_name)?;
    Ok(Json(user))
}
