// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ratelimit::UploadLimiter;
use crate::store::MarketStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<MarketStore>>,
    pub uploads: UploadLimiter,
}

impl AppState {
    pub fn new(store: MarketStore, uploads: UploadLimiter) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            uploads,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MarketStore::new(), UploadLimiter::default())
    }
}
