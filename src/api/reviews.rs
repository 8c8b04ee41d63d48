// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Review endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{require_owner, EmptyPayload, ResourceKind, Signed},
    error::ApiError,
    models::{CreateReviewRequest, Review},
    state::AppState,
};

/// Action a review creation signature must authorize.
pub const ACTION_REVIEW_CREATE: &str = "review-create";
/// Action a review delete signature must authorize.
pub const ACTION_REVIEW_DELETE: &str = "review-delete";

/// List reviews for a dataset, newest first.
#[utoipa::path(
    get,
    path = "/v1/datasets/{dataset_id}/reviews",
    params(("dataset_id" = String, Path, description = "Identifier of the dataset")),
    tag = "Reviews",
    responses(
        (status = 200, description = "Reviews for the dataset", body = [Review]),
        (status = 404, description = "Dataset not found"),
    )
)]
pub async fn list_reviews(
    Path(dataset_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let store = state.store.read().await;
    if store.dataset(&dataset_id).is_none() {
        return Err(ApiError::not_found("Dataset not found"));
    }
    Ok(Json(store.list_reviews_for(&dataset_id)))
}

/// Create a review authored by the verified wallet.
#[utoipa::path(
    post,
    path = "/v1/reviews",
    request_body = CreateReviewRequest,
    tag = "Reviews",
    responses(
        (status = 201, description = "Created review", body = Review),
        (status = 400, description = "Rating out of bounds"),
        (status = 401, description = "Missing, expired, or invalid signature"),
        (status = 404, description = "Dataset not found"),
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    signed: Signed<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    signed.require_action(ACTION_REVIEW_CREATE)?;

    let review = state
        .store
        .write()
        .await
        .create_review(&signed.user.id, signed.payload)?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Delete a review. Reviewer only.
#[utoipa::path(
    delete,
    path = "/v1/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Identifier of the review")),
    tag = "Reviews",
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the reviewer"),
        (status = 404, description = "Review not found"),
    )
)]
pub async fn delete_review(
    Path(review_id): Path<String>,
    State(state): State<AppState>,
    signed: Signed<EmptyPayload>,
) -> Result<StatusCode, ApiError> {
    signed.require_action(ACTION_REVIEW_DELETE)?;
    require_owner(&state, &signed.user, ResourceKind::Review, &review_id).await?;

    state.store.write().await.delete_review(&review_id)?;
    Ok(StatusCode::NO_CONTENT)
}
