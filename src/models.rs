// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! Wire format is camelCase to match the web front-end contract.
//!
//! ## Model Categories
//!
//! - **Users**: Wallet-keyed accounts, created lazily on first verified signature
//! - **Datasets**: Marketplace listings owned by a user
//! - **Reviews**: Purchase reviews attached to a dataset
//! - **Transactions**: Token-purchase records linking buyer, seller, and initiator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Users
// =============================================================================

/// A marketplace user account.
///
/// Users are keyed by wallet address (unique, compared case-insensitively)
/// and created lazily the first time a signature from that wallet verifies.
/// The wallet address is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for this user.
    pub id: String,
    /// The user's wallet address, as first presented (0x + 40 hex chars).
    pub wallet_address: String,
    /// Display name shown in listings and reviews.
    pub display_name: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Payload for updating the authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    pub display_name: String,
}

// =============================================================================
// Datasets
// =============================================================================

/// A dataset listed on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Unique identifier for this dataset.
    pub id: String,
    /// Id of the owning user.
    pub owner_id: String,
    /// Listing title.
    pub title: String,
    /// Longer description of the dataset contents.
    pub description: String,
    /// Marketplace category (e.g. "vision", "nlp").
    pub category: String,
    /// Price in token base units, as a decimal string.
    pub price: String,
    /// Content identifier of the stored payload (IPFS / 0G CID).
    pub cid: String,
    /// Listing creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a dataset listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatasetRequest {
    /// Listing title.
    pub title: String,
    /// Longer description of the dataset contents.
    pub description: String,
    /// Marketplace category.
    pub category: String,
    /// Price in token base units, as a decimal string.
    pub price: String,
    /// Content identifier of the stored payload.
    pub cid: String,
}

/// Payload for updating an existing dataset listing.
///
/// All fields are optional; absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDatasetRequest {
    /// Updated listing title.
    pub title: Option<String>,
    /// Updated description.
    pub description: Option<String>,
    /// Updated category.
    pub category: Option<String>,
    /// Updated price in token base units.
    pub price: Option<String>,
}

/// A dataset as returned by read endpoints, with optional personalization.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatasetView {
    /// The dataset itself.
    #[serde(flatten)]
    pub dataset: Dataset,
    /// Whether the requesting identity owns this dataset.
    ///
    /// Always `false` for unauthenticated reads. Personalization only;
    /// never used for authorization.
    pub owned: bool,
}

// =============================================================================
// Reviews
// =============================================================================

/// A review of a purchased dataset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier for this review.
    pub id: String,
    /// The reviewed dataset.
    pub dataset_id: String,
    /// Id of the user who wrote the review.
    pub reviewer_id: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Free-form review text.
    pub comment: String,
    /// Review creation time.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    /// The dataset being reviewed.
    pub dataset_id: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Free-form review text.
    pub comment: String,
}

// =============================================================================
// Transactions
// =============================================================================

/// Settlement status of a recorded purchase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Contract call submitted, not yet confirmed on-chain.
    Pending,
    /// Confirmed on-chain.
    Confirmed,
    /// Reverted or dropped.
    Failed,
}

/// A recorded token-purchase transaction.
///
/// The on-chain transfer happens client-side via the token contract; this
/// record mirrors it for marketplace bookkeeping. Any of buyer, seller, or
/// initiator may read or update the record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier for this transaction record.
    pub id: String,
    /// The purchased dataset.
    pub dataset_id: String,
    /// Id of the purchasing user.
    pub buyer_id: String,
    /// Id of the selling user (the dataset owner at purchase time).
    pub seller_id: String,
    /// Id of the user who recorded the transaction.
    pub initiator_id: String,
    /// Amount paid in token base units, as a decimal string.
    pub amount: String,
    /// On-chain transaction hash.
    pub tx_hash: String,
    /// Settlement status.
    pub status: TransactionStatus,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a purchase transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionRequest {
    /// The purchased dataset.
    pub dataset_id: String,
    /// Amount paid in token base units.
    pub amount: String,
    /// On-chain transaction hash.
    pub tx_hash: String,
}

/// Payload for updating a transaction's settlement status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionStatusRequest {
    /// New settlement status.
    pub status: TransactionStatus,
}
