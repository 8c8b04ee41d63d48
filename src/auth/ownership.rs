// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Resource ownership guard.
//!
//! Routes pass the resource kind explicitly instead of inferring it from the
//! URL, and each kind has a typed owner accessor instead of a runtime field
//! name. Transactions are special-cased: any of buyer, seller, or initiator
//! counts as an owner.

use super::error::AuthError;
use super::verify::AuthenticatedUser;
use crate::state::AppState;

/// The kinds of resource the guard knows how to authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Dataset,
    Review,
    Transaction,
}

impl ResourceKind {
    fn display_name(self) -> &'static str {
        match self {
            ResourceKind::Dataset => "Dataset",
            ResourceKind::Review => "Review",
            ResourceKind::Transaction => "Transaction",
        }
    }
}

/// Require that `user` owns the resource identified by `resource_id`.
///
/// Loads the resource under the store's read lock, so a concurrent delete is
/// observed as a clean `resource_not_found` rather than a crash. Mismatched
/// ownership yields `access_denied`.
pub async fn require_owner(
    state: &AppState,
    user: &AuthenticatedUser,
    kind: ResourceKind,
    resource_id: &str,
) -> Result<(), AuthError> {
    if resource_id.is_empty() {
        return Err(AuthError::ResourceNotFound(kind.display_name()));
    }

    let store = state.store.read().await;
    let owned = match kind {
        ResourceKind::Dataset => store
            .dataset(resource_id)
            .map(|dataset| dataset.owner_id == user.id),
        ResourceKind::Review => store
            .review(resource_id)
            .map(|review| review.reviewer_id == user.id),
        // Three-way OR: buyer, seller, or initiator may act on a transaction.
        ResourceKind::Transaction => store.transaction(resource_id).map(|tx| {
            tx.buyer_id == user.id || tx.seller_id == user.id || tx.initiator_id == user.id
        }),
    };

    match owned {
        None => Err(AuthError::ResourceNotFound(kind.display_name())),
        Some(false) => Err(AuthError::AccessDenied),
        Some(true) => Ok(()),
    }
}
