// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Per-wallet upload rate limiting.
//!
//! Caps upload-type operations per wallet per rolling window, tracked in
//! process memory keyed by lowercased wallet address. State is process-local:
//! restarts reset the limiter and multiple instances fragment it. A shared
//! counter store would be needed for horizontal scaling; see DESIGN.md.
//!
//! Usage is two-phase: `check` before the guarded operation, `commit` after
//! it succeeds. Failed uploads therefore do not consume quota.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::auth::AuthError;

/// Maximum uploads per wallet per window.
pub const UPLOAD_LIMIT: u32 = 10;

/// Length of the rolling window.
pub const UPLOAD_WINDOW: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_reset: Instant,
}

/// Windowed per-wallet counter.
///
/// Cheap to clone; clones share the same map. Constructed with explicit
/// `(limit, window)` so tests and alternative policies inject their own.
#[derive(Debug, Clone)]
pub struct UploadLimiter {
    entries: Arc<Mutex<HashMap<String, WindowEntry>>>,
    limit: u32,
    window: Duration,
}

impl Default for UploadLimiter {
    fn default() -> Self {
        Self::new(UPLOAD_LIMIT, UPLOAD_WINDOW)
    }
}

impl UploadLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            limit,
            window,
        }
    }

    /// Check whether `wallet_address` may perform another upload.
    ///
    /// Creates or resets the window entry as needed. Rejects with
    /// `rate_limit_exceeded` once the limit is reached, reporting minutes
    /// until the window resets. Does not consume quota; call [`commit`]
    /// after the guarded operation succeeds.
    ///
    /// [`commit`]: UploadLimiter::commit
    pub fn check(&self, wallet_address: &str) -> Result<(), AuthError> {
        let key = wallet_address.to_lowercase();
        let now = Instant::now();
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::Internal("rate limiter lock poisoned".into()))?;

        let entry = entries.entry(key).or_insert(WindowEntry {
            count: 0,
            window_reset: now + self.window,
        });
        if now >= entry.window_reset {
            entry.count = 0;
            entry.window_reset = now + self.window;
        }

        if entry.count >= self.limit {
            let remaining = entry.window_reset.saturating_duration_since(now);
            let minutes = (remaining.as_secs() + 59) / 60;
            tracing::warn!(wallet = %wallet_address, "upload rate limit exceeded");
            return Err(AuthError::RateLimitExceeded {
                minutes: minutes.max(1),
            });
        }

        Ok(())
    }

    /// Record one successful upload for `wallet_address`.
    pub fn commit(&self, wallet_address: &str) {
        let key = wallet_address.to_lowercase();
        let now = Instant::now();
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        let entry = entries.entry(key).or_insert(WindowEntry {
            count: 0,
            window_reset: now + self.window,
        });
        entry.count += 1;
    }

    /// Evict entries whose window has expired.
    ///
    /// Without this, wallets that go idle past their window would linger in
    /// the map forever. A background task calls it periodically.
    pub fn sweep(&self) {
        let now = Instant::now();
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.retain(|_, entry| entry.window_reset > now);
    }

    #[cfg(test)]
    fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}
