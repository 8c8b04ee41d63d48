// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Dataset listing endpoints.
//!
//! Reads take an optional `walletAddress` query parameter to flag listings
//! owned by the caller; mutations carry signed credentials and the upload
//! path is rate-limited per wallet.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{require_owner, EmptyPayload, OptionalAuth, ResourceKind, Signed},
    error::ApiError,
    models::{CreateDatasetRequest, Dataset, DatasetView, UpdateDatasetRequest},
    state::AppState,
};

/// Action a dataset upload signature must authorize.
pub const ACTION_DATASET_UPLOAD: &str = "dataset-upload";
/// Action a dataset update signature must authorize.
pub const ACTION_DATASET_UPDATE: &str = "dataset-update";
/// Action a dataset delete signature must authorize.
pub const ACTION_DATASET_DELETE: &str = "dataset-delete";

fn view(dataset: Dataset, viewer_id: Option<&str>) -> DatasetView {
    let owned = viewer_id.is_some_and(|id| id == dataset.owner_id);
    DatasetView { dataset, owned }
}

/// List all datasets, newest first.
#[utoipa::path(
    get,
    path = "/v1/datasets",
    params(("walletAddress" = Option<String>, Query, description = "Optional wallet for personalization")),
    tag = "Datasets",
    responses((status = 200, description = "All listed datasets", body = [DatasetView]))
)]
pub async fn list_datasets(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
) -> Json<Vec<DatasetView>> {
    let viewer_id = identity.as_ref().map(|user| user.id.as_str());
    let datasets = state.store.read().await.list_datasets();
    Json(
        datasets
            .into_iter()
            .map(|dataset| view(dataset, viewer_id))
            .collect(),
    )
}

/// Fetch a single dataset.
#[utoipa::path(
    get,
    path = "/v1/datasets/{dataset_id}",
    params(
        ("dataset_id" = String, Path, description = "Identifier of the dataset"),
        ("walletAddress" = Option<String>, Query, description = "Optional wallet for personalization"),
    ),
    tag = "Datasets",
    responses(
        (status = 200, description = "The dataset", body = DatasetView),
        (status = 404, description = "Dataset not found"),
    )
)]
pub async fn get_dataset(
    Path(dataset_id): Path<String>,
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
) -> Result<Json<DatasetView>, ApiError> {
    let viewer_id = identity.as_ref().map(|user| user.id.as_str());
    let dataset = state
        .store
        .read()
        .await
        .dataset(&dataset_id)
        .ok_or_else(|| ApiError::not_found("Dataset not found"))?;
    Ok(Json(view(dataset, viewer_id)))
}

/// Create a dataset listing owned by the verified wallet.
///
/// Rate-limited per wallet; quota is only consumed when creation succeeds.
#[utoipa::path(
    post,
    path = "/v1/datasets",
    request_body = CreateDatasetRequest,
    tag = "Datasets",
    responses(
        (status = 201, description = "Created dataset", body = Dataset),
        (status = 401, description = "Missing, expired, or invalid signature"),
        (status = 429, description = "Upload rate limit exceeded"),
    )
)]
pub async fn create_dataset(
    State(state): State<AppState>,
    signed: Signed<CreateDatasetRequest>,
) -> Result<(StatusCode, Json<Dataset>), ApiError> {
    signed.require_action(ACTION_DATASET_UPLOAD)?;
    state.uploads.check(&signed.user.wallet_address)?;

    let dataset = state
        .store
        .write()
        .await
        .create_dataset(&signed.user.id, signed.payload);

    // Only successful uploads consume quota.
    state.uploads.commit(&signed.user.wallet_address);
    tracing::info!(dataset_id = %dataset.id, owner = %signed.user.id, "dataset listed");

    Ok((StatusCode::CREATED, Json(dataset)))
}

/// Update a dataset listing. Owner only.
#[utoipa::path(
    put,
    path = "/v1/datasets/{dataset_id}",
    params(("dataset_id" = String, Path, description = "Identifier of the dataset")),
    request_body = UpdateDatasetRequest,
    tag = "Datasets",
    responses(
        (status = 200, description = "Updated dataset", body = Dataset),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Dataset not found"),
    )
)]
pub async fn update_dataset(
    Path(dataset_id): Path<String>,
    State(state): State<AppState>,
    signed: Signed<UpdateDatasetRequest>,
) -> Result<Json<Dataset>, ApiError> {
    signed.require_action(ACTION_DATASET_UPDATE)?;
    require_owner(&state, &signed.user, ResourceKind::Dataset, &dataset_id).await?;

    let dataset = state
        .store
        .write()
        .await
        .update_dataset(&dataset_id, signed.payload)?;
    Ok(Json(dataset))
}

/// Delete a dataset listing and its reviews. Owner only.
#[utoipa::path(
    delete,
    path = "/v1/datasets/{dataset_id}",
    params(("dataset_id" = String, Path, description = "Identifier of the dataset")),
    tag = "Datasets",
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Dataset not found"),
    )
)]
pub async fn delete_dataset(
    Path(dataset_id): Path<String>,
    State(state): State<AppState>,
    signed: Signed<EmptyPayload>,
) -> Result<StatusCode, ApiError> {
    signed.require_action(ACTION_DATASET_DELETE)?;
    require_owner(&state, &signed.user, ResourceKind::Dataset, &dataset_id).await?;

    state.store.write().await.delete_dataset(&dataset_id)?;
    Ok(StatusCode::NO_CONTENT)
}
