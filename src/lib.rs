// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Zatori Marketplace - Decentralized Intelligence Marketplace API
//!
//! This crate provides the API service behind the Zatori marketplace:
//! dataset listings, purchase reviews, and token-purchase records, all
//! authenticated by wallet signatures rather than sessions or JWTs.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Wallet-signature authentication and resource authorization
//! - `ratelimit` - Per-wallet upload rate limiting
//! - `store` - In-memory marketplace store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;
pub mod state;
pub mod store;
