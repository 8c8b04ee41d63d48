// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Purchase transaction endpoints.
//!
//! The on-chain token transfer happens client-side; these endpoints keep the
//! marketplace's own record of it. Any of buyer, seller, or initiator may
//! update a record's settlement status.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{require_owner, OptionalAuth, ResourceKind, Signed},
    error::ApiError,
    models::{RecordTransactionRequest, Transaction, UpdateTransactionStatusRequest},
    state::AppState,
};

/// Action a transaction record signature must authorize.
pub const ACTION_TRANSACTION_RECORD: &str = "transaction-record";
/// Action a status update signature must authorize.
pub const ACTION_TRANSACTION_STATUS: &str = "transaction-status";

/// Record a purchase of a dataset by the verified wallet.
#[utoipa::path(
    post,
    path = "/v1/transactions",
    request_body = RecordTransactionRequest,
    tag = "Transactions",
    responses(
        (status = 201, description = "Recorded transaction", body = Transaction),
        (status = 401, description = "Missing, expired, or invalid signature"),
        (status = 404, description = "Dataset not found"),
    )
)]
pub async fn record_transaction(
    State(state): State<AppState>,
    signed: Signed<RecordTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    signed.require_action(ACTION_TRANSACTION_RECORD)?;

    let payload = signed.payload;
    let transaction = state.store.write().await.record_transaction(
        &signed.user.id,
        &payload.dataset_id,
        payload.amount,
        payload.tx_hash,
    )?;
    tracing::info!(
        transaction_id = %transaction.id,
        dataset_id = %transaction.dataset_id,
        "purchase recorded"
    );
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// List transactions the identified wallet participates in.
///
/// Without a resolvable `walletAddress` query parameter this returns an
/// empty list; it never errors. Listing is personalization, not a secret:
/// authorization for individual records happens on the status route.
#[utoipa::path(
    get,
    path = "/v1/transactions",
    params(("walletAddress" = Option<String>, Query, description = "Wallet to list transactions for")),
    tag = "Transactions",
    responses((status = 200, description = "Transactions for the wallet", body = [Transaction]))
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    OptionalAuth(identity): OptionalAuth,
) -> Json<Vec<Transaction>> {
    let Some(user) = identity else {
        return Json(Vec::new());
    };
    Json(state.store.read().await.list_transactions_for(&user.id))
}

/// Update a transaction's settlement status. Buyer, seller, or initiator only.
#[utoipa::path(
    put,
    path = "/v1/transactions/{transaction_id}/status",
    params(("transaction_id" = String, Path, description = "Identifier of the transaction")),
    request_body = UpdateTransactionStatusRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Updated transaction", body = Transaction),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Transaction not found"),
    )
)]
pub async fn update_transaction_status(
    Path(transaction_id): Path<String>,
    State(state): State<AppState>,
    signed: Signed<UpdateTransactionStatusRequest>,
) -> Result<Json<Transaction>, ApiError> {
    signed.require_action(ACTION_TRANSACTION_STATUS)?;
    require_owner(&state, &signed.user, ResourceKind::Transaction, &transaction_id).await?;

    let transaction = state
        .store
        .write()
        .await
        .set_transaction_status(&transaction_id, signed.payload.status)?;
    Ok(Json(transaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::models::{CreateDatasetRequest, TransactionStatus, User};

    fn identity(user: &User) -> AuthenticatedUser {
        AuthenticatedUser {
            id: user.id.clone(),
            wallet_address: user.wallet_address.clone(),
        }
    }

    fn signed<T>(user: &User, action: &str, payload: T) -> Signed<T> {
        Signed {
            user: identity(user),
            action: action.to_string(),
            payload,
        }
    }

    async fn seeded() -> (AppState, User, User, String) {
        let state = AppState::default();
        let mut store = state.store.write().await;
        let seller = store.lookup_or_create_user("0xaaa0000000000000000000000000000000000001");
        let buyer = store.lookup_or_create_user("0xbbb0000000000000000000000000000000000002");
        let dataset = store.create_dataset(
            &seller.id,
            CreateDatasetRequest {
                title: "t".into(),
                description: "d".into(),
                category: "nlp".into(),
                price: "10".into(),
                cid: "bafy".into(),
            },
        );
        drop(store);
        (state, seller, buyer, dataset.id)
    }

    #[tokio::test]
    async fn record_links_buyer_seller_initiator() {
        let (state, seller, buyer, dataset_id) = seeded().await;
        let (status, Json(tx)) = record_transaction(
            State(state.clone()),
            signed(
                &buyer,
                ACTION_TRANSACTION_RECORD,
                RecordTransactionRequest {
                    dataset_id,
                    amount: "10".into(),
                    tx_hash: "0xfeed".into(),
                },
            ),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(tx.buyer_id, buyer.id);
        assert_eq!(tx.seller_id, seller.id);
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn list_is_empty_without_identity() {
        let (state, _, _, _) = seeded().await;
        let Json(transactions) = list_transactions(State(state), OptionalAuth(None)).await;
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn both_sides_see_their_transactions() {
        let (state, seller, buyer, dataset_id) = seeded().await;
        record_transaction(
            State(state.clone()),
            signed(
                &buyer,
                ACTION_TRANSACTION_RECORD,
                RecordTransactionRequest {
                    dataset_id,
                    amount: "10".into(),
                    tx_hash: "0xfeed".into(),
                },
            ),
        )
        .await
        .unwrap();

        let Json(for_seller) =
            list_transactions(State(state.clone()), OptionalAuth(Some(identity(&seller)))).await;
        assert_eq!(for_seller.len(), 1);

        let Json(for_buyer) =
            list_transactions(State(state), OptionalAuth(Some(identity(&buyer)))).await;
        assert_eq!(for_buyer.len(), 1);
    }

    #[tokio::test]
    async fn status_update_allows_seller_denies_stranger() {
        let (state, seller, buyer, dataset_id) = seeded().await;
        let stranger = state
            .store
            .write()
            .await
            .lookup_or_create_user("0xccc0000000000000000000000000000000000003");

        let (_, Json(tx)) = record_transaction(
            State(state.clone()),
            signed(
                &buyer,
                ACTION_TRANSACTION_RECORD,
                RecordTransactionRequest {
                    dataset_id,
                    amount: "10".into(),
                    tx_hash: "0xfeed".into(),
                },
            ),
        )
        .await
        .unwrap();

        let err = update_transaction_status(
            Path(tx.id.clone()),
            State(state.clone()),
            signed(
                &stranger,
                ACTION_TRANSACTION_STATUS,
                UpdateTransactionStatusRequest {
                    status: TransactionStatus::Confirmed,
                },
            ),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        // Seller is neither buyer nor initiator but still a participant.
        let Json(updated) = update_transaction_status(
            Path(tx.id),
            State(state),
            signed(
                &seller,
                ACTION_TRANSACTION_STATUS,
                UpdateTransactionStatusRequest {
                    status: TransactionStatus::Confirmed,
                },
            ),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, TransactionStatus::Confirmed);
    }
}
