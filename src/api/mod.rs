// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateDatasetRequest, CreateReviewRequest, Dataset, DatasetView, RecordTransactionRequest,
        Review, Transaction, TransactionStatus, UpdateDatasetRequest, UpdateProfileRequest,
        UpdateTransactionStatusRequest, User,
    },
    state::AppState,
};

pub mod datasets;
pub mod health;
pub mod reviews;
pub mod transactions;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/datasets",
            get(datasets::list_datasets).post(datasets::create_dataset),
        )
        .route(
            "/datasets/{dataset_id}",
            get(datasets::get_dataset)
                .put(datasets::update_dataset)
                .delete(datasets::delete_dataset),
        )
        .route("/datasets/{dataset_id}/reviews", get(reviews::list_reviews))
        .route("/reviews", post(reviews::create_review))
        .route("/reviews/{review_id}", axum::routing::delete(reviews::delete_review))
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::record_transaction),
        )
        .route(
            "/transactions/{transaction_id}/status",
            put(transactions::update_transaction_status),
        )
        .route("/users/{wallet}", get(users::get_user))
        .route("/users/me", put(users::update_profile))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        datasets::list_datasets,
        datasets::get_dataset,
        datasets::create_dataset,
        datasets::update_dataset,
        datasets::delete_dataset,
        reviews::list_reviews,
        reviews::create_review,
        reviews::delete_review,
        transactions::record_transaction,
        transactions::list_transactions,
        transactions::update_transaction_status,
        users::get_user,
        users::update_profile
    ),
    components(
        schemas(
            User,
            Dataset,
            DatasetView,
            Review,
            Transaction,
            TransactionStatus,
            CreateDatasetRequest,
            UpdateDatasetRequest,
            CreateReviewRequest,
            RecordTransactionRequest,
            UpdateTransactionStatusRequest,
            UpdateProfileRequest
        )
    ),
    tags(
        (name = "Health", description = "Service probes"),
        (name = "Datasets", description = "Dataset listing and management"),
        (name = "Reviews", description = "Purchase reviews"),
        (name = "Transactions", description = "Token-purchase records"),
        (name = "Users", description = "User profiles")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
