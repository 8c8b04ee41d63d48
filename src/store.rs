// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! In-memory marketplace store.
//!
//! Holds users, datasets, reviews, and transaction records in process memory.
//! The store is held behind an `Arc<RwLock>` in [`crate::state::AppState`];
//! `lookup_or_create_user` runs under the write lock, which makes first-time
//! registration atomic with respect to concurrent requests from the same
//! wallet. Not persisted across restarts; this is an explicit limitation.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CreateDatasetRequest, CreateReviewRequest, Dataset, Review, Transaction, TransactionStatus,
    UpdateDatasetRequest, User,
};

#[derive(Default)]
pub struct MarketStore {
    users: HashMap<String, User>,
    /// Lowercased wallet address -> user id. Enforces wallet uniqueness.
    wallet_index: HashMap<String, String>,
    datasets: HashMap<String, Dataset>,
    reviews: HashMap<String, Review>,
    transactions: HashMap<String, Transaction>,
}

/// Default display name for a lazily-created account, derived from the
/// address suffix (e.g. `user-f4ab12`).
fn default_display_name(wallet_address: &str) -> String {
    let lower = wallet_address.to_lowercase();
    let suffix: String = lower.chars().rev().take(6).collect::<Vec<_>>().into_iter().rev().collect();
    format!("user-{suffix}")
}

impl MarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub fn user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).cloned()
    }

    /// Look up a user by wallet address, case-insensitively.
    pub fn user_by_wallet(&self, wallet_address: &str) -> Option<User> {
        let key = wallet_address.to_lowercase();
        self.wallet_index
            .get(&key)
            .and_then(|id| self.users.get(id))
            .cloned()
    }

    /// Look up a user by wallet address, creating one if absent.
    ///
    /// Idempotent: repeat calls for the same wallet (in any casing) return
    /// the existing record. The wallet address is stored as first presented
    /// and never changes afterward.
    pub fn lookup_or_create_user(&mut self, wallet_address: &str) -> User {
        if let Some(user) = self.user_by_wallet(wallet_address) {
            return user;
        }

        let id = Uuid::new_v4().to_string();
        let user = User {
            id: id.clone(),
            wallet_address: wallet_address.to_string(),
            display_name: default_display_name(wallet_address),
            created_at: Utc::now(),
        };
        self.wallet_index
            .insert(wallet_address.to_lowercase(), id.clone());
        self.users.insert(id, user.clone());
        user
    }

    pub fn update_display_name(
        &mut self,
        user_id: &str,
        display_name: String,
    ) -> Result<User, ApiError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        user.display_name = display_name;
        Ok(user.clone())
    }

    // =========================================================================
    // Datasets
    // =========================================================================

    pub fn list_datasets(&self) -> Vec<Dataset> {
        let mut datasets: Vec<Dataset> = self.datasets.values().cloned().collect();
        datasets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        datasets
    }

    pub fn dataset(&self, dataset_id: &str) -> Option<Dataset> {
        self.datasets.get(dataset_id).cloned()
    }

    pub fn create_dataset(&mut self, owner_id: &str, request: CreateDatasetRequest) -> Dataset {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let dataset = Dataset {
            id: id.clone(),
            owner_id: owner_id.to_string(),
            title: request.title,
            description: request.description,
            category: request.category,
            price: request.price,
            cid: request.cid,
            created_at: now,
            updated_at: now,
        };
        self.datasets.insert(id, dataset.clone());
        dataset
    }

    pub fn update_dataset(
        &mut self,
        dataset_id: &str,
        request: UpdateDatasetRequest,
    ) -> Result<Dataset, ApiError> {
        let dataset = self
            .datasets
            .get_mut(dataset_id)
            .ok_or_else(|| ApiError::not_found("Dataset not found"))?;

        if let Some(title) = request.title {
            dataset.title = title;
        }
        if let Some(description) = request.description {
            dataset.description = description;
        }
        if let Some(category) = request.category {
            dataset.category = category;
        }
        if let Some(price) = request.price {
            dataset.price = price;
        }
        dataset.updated_at = Utc::now();

        Ok(dataset.clone())
    }

    /// Delete a dataset and its reviews.
    pub fn delete_dataset(&mut self, dataset_id: &str) -> Result<(), ApiError> {
        if self.datasets.remove(dataset_id).is_none() {
            return Err(ApiError::not_found("Dataset not found"));
        }
        self.reviews.retain(|_, review| review.dataset_id != dataset_id);
        Ok(())
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    pub fn list_reviews_for(&self, dataset_id: &str) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .values()
            .filter(|review| review.dataset_id == dataset_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    pub fn review(&self, review_id: &str) -> Option<Review> {
        self.reviews.get(review_id).cloned()
    }

    pub fn create_review(
        &mut self,
        reviewer_id: &str,
        request: CreateReviewRequest,
    ) -> Result<Review, ApiError> {
        if !(1..=5).contains(&request.rating) {
            return Err(ApiError::bad_request("rating must be between 1 and 5"));
        }
        if !self.datasets.contains_key(&request.dataset_id) {
            return Err(ApiError::not_found("Dataset not found"));
        }

        let id = Uuid::new_v4().to_string();
        let review = Review {
            id: id.clone(),
            dataset_id: request.dataset_id,
            reviewer_id: reviewer_id.to_string(),
            rating: request.rating,
            comment: request.comment,
            created_at: Utc::now(),
        };
        self.reviews.insert(id, review.clone());
        Ok(review)
    }

    pub fn delete_review(&mut self, review_id: &str) -> Result<(), ApiError> {
        if self.reviews.remove(review_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Review not found"))
        }
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub fn transaction(&self, transaction_id: &str) -> Option<Transaction> {
        self.transactions.get(transaction_id).cloned()
    }

    /// List transactions a user participates in, as buyer, seller, or initiator.
    pub fn list_transactions_for(&self, user_id: &str) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .values()
            .filter(|tx| {
                tx.buyer_id == user_id || tx.seller_id == user_id || tx.initiator_id == user_id
            })
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        transactions
    }

    /// Record a purchase. The seller is resolved from the dataset's current
    /// owner; the initiator is the authenticated user recording the purchase.
    pub fn record_transaction(
        &mut self,
        initiator_id: &str,
        dataset_id: &str,
        amount: String,
        tx_hash: String,
    ) -> Result<Transaction, ApiError> {
        let dataset = self
            .datasets
            .get(dataset_id)
            .ok_or_else(|| ApiError::not_found("Dataset not found"))?;

        let id = Uuid::new_v4().to_string();
        let transaction = Transaction {
            id: id.clone(),
            dataset_id: dataset_id.to_string(),
            buyer_id: initiator_id.to_string(),
            seller_id: dataset.owner_id.clone(),
            initiator_id: initiator_id.to_string(),
            amount,
            tx_hash,
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
        };
        self.transactions.insert(id, transaction.clone());
        Ok(transaction)
    }

    pub fn set_transaction_status(
        &mut self,
        transaction_id: &str,
        status: TransactionStatus,
    ) -> Result<Transaction, ApiError> {
        let transaction = self
            .transactions
            .get_mut(transaction_id)
            .ok_or_else(|| ApiError::not_found("Transaction not found"))?;
        transaction.status = status;
        Ok(transaction.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset_request() -> CreateDatasetRequest {
        CreateDatasetRequest {
            title: "Street Scenes".into(),
            description: "Annotated dashcam footage".into(),
            category: "vision".into(),
            price: "1000".into(),
            cid: "bafybeigdyr".into(),
        }
    }

    #[test]
    fn lookup_or_create_is_idempotent_and_case_insensitive() {
        let mut store = MarketStore::new();
        let first = store.lookup_or_create_user("0xAbCd000000000000000000000000000000001234");
        let second = store.lookup_or_create_user("0xABCD000000000000000000000000000000001234");
        assert_eq!(first.id, second.id);
        // Address stored as first presented.
        assert_eq!(second.wallet_address, "0xAbCd000000000000000000000000000000001234");
    }

    #[test]
    fn default_display_name_uses_address_suffix() {
        let mut store = MarketStore::new();
        let user = store.lookup_or_create_user("0xAbCd000000000000000000000000000000F4aB12");
        assert_eq!(user.display_name, "user-f4ab12");
    }

    #[test]
    fn update_display_name_keeps_wallet() {
        let mut store = MarketStore::new();
        let user = store.lookup_or_create_user("0xaaa0000000000000000000000000000000000001");
        let updated = store
            .update_display_name(&user.id, "Ada".into())
            .unwrap();
        assert_eq!(updated.display_name, "Ada");
        assert_eq!(updated.wallet_address, user.wallet_address);
    }

    #[test]
    fn update_dataset_applies_partial_fields() {
        let mut store = MarketStore::new();
        let owner = store.lookup_or_create_user("0xaaa0000000000000000000000000000000000001");
        let dataset = store.create_dataset(&owner.id, sample_dataset_request());

        let updated = store
            .update_dataset(
                &dataset.id,
                UpdateDatasetRequest {
                    price: Some("2000".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, "2000");
        assert_eq!(updated.title, dataset.title);
        assert!(updated.updated_at >= dataset.updated_at);
    }

    #[test]
    fn delete_dataset_cascades_reviews() {
        let mut store = MarketStore::new();
        let owner = store.lookup_or_create_user("0xaaa0000000000000000000000000000000000001");
        let dataset = store.create_dataset(&owner.id, sample_dataset_request());
        store
            .create_review(
                &owner.id,
                CreateReviewRequest {
                    dataset_id: dataset.id.clone(),
                    rating: 4,
                    comment: "solid".into(),
                },
            )
            .unwrap();

        store.delete_dataset(&dataset.id).unwrap();
        assert!(store.list_reviews_for(&dataset.id).is_empty());
    }

    #[test]
    fn create_review_validates_rating_and_dataset() {
        let mut store = MarketStore::new();
        let user = store.lookup_or_create_user("0xaaa0000000000000000000000000000000000001");

        let err = store
            .create_review(
                &user.id,
                CreateReviewRequest {
                    dataset_id: "missing".into(),
                    rating: 6,
                    comment: "".into(),
                },
            )
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);

        let err = store
            .create_review(
                &user.id,
                CreateReviewRequest {
                    dataset_id: "missing".into(),
                    rating: 3,
                    comment: "".into(),
                },
            )
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn record_transaction_resolves_seller_from_dataset() {
        let mut store = MarketStore::new();
        let seller = store.lookup_or_create_user("0xaaa0000000000000000000000000000000000001");
        let buyer = store.lookup_or_create_user("0xbbb0000000000000000000000000000000000002");
        let dataset = store.create_dataset(&seller.id, sample_dataset_request());

        let tx = store
            .record_transaction(&buyer.id, &dataset.id, "1000".into(), "0xdeadbeef".into())
            .unwrap();

        assert_eq!(tx.buyer_id, buyer.id);
        assert_eq!(tx.seller_id, seller.id);
        assert_eq!(tx.initiator_id, buyer.id);
        assert_eq!(tx.status, TransactionStatus::Pending);

        // Both participants see the transaction.
        assert_eq!(store.list_transactions_for(&buyer.id).len(), 1);
        assert_eq!(store.list_transactions_for(&seller.id).len(), 1);
    }

    #[test]
    fn set_transaction_status_missing_errors() {
        let mut store = MarketStore::new();
        let err = store
            .set_transaction_status("missing", TransactionStatus::Confirmed)
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }
}
