// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! # Authentication Module
//!
//! Wallet-signature authentication and resource authorization for the
//! Zatori marketplace API.
//!
//! ## Auth Flow
//!
//! 1. Front-end builds the canonical message for `(address, action, timestamp)`
//! 2. Wallet signs it via `personal_sign` (EIP-191)
//! 3. The mutation request body carries
//!    `{walletAddress, signature, timestamp, action, ...payload}`
//! 4. The [`Signed`] extractor:
//!    - rebuilds the message from the claimed fields
//!    - recovers the signer address and compares it to the claim
//!    - enforces the 5-minute freshness window
//!    - looks up or lazily creates the user record
//!
//! ## Security
//!
//! - A signature binds exactly one `(walletAddress, action, timestamp)` triple
//! - Stale timestamps are rejected; this bounds replay exposure
//! - Handlers bind their expected action via [`Signed::require_action`]
//! - [`OptionalAuth`] personalizes reads and is never used for authorization

pub mod error;
pub mod extractor;
pub mod message;
pub mod ownership;
pub mod verify;

pub use error::AuthError;
pub use extractor::{EmptyPayload, OptionalAuth, Signed};
pub use message::build_auth_message;
pub use ownership::{require_owner, ResourceKind};
pub use verify::{verify_credentials, AuthCredentials, AuthenticatedUser, SIGNATURE_MAX_AGE_MS};
