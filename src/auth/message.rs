// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zatori Labs

//! Deterministic signature message builder.
//!
//! The front-end builds this exact string and asks the wallet to sign it via
//! `personal_sign`; the verifier rebuilds it server-side from the claimed
//! fields before recovery. Any whitespace or format drift breaks all
//! verification, so the template lives in one place and nowhere else.

/// Build the message a wallet signs to authenticate an action.
///
/// The address is embedded exactly as the client supplied it (no case
/// normalization) and the timestamp is decimal epoch milliseconds.
pub fn build_auth_message(wallet_address: &str, action: &str, timestamp: i64) -> String {
    format!(
        "Zatori Marketplace Authentication\n\
         \n\
         Address: {wallet_address}\n\
         Action: {action}\n\
         Timestamp: {timestamp}\n\
         \n\
         Please sign this message to verify your identity."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_matches_template_exactly() {
        let message = build_auth_message(
            "0xAbCd000000000000000000000000000000001234",
            "dataset-upload",
            1700000000000,
        );
        assert_eq!(
            message,
            "Zatori Marketplace Authentication\n\
             \n\
             Address: 0xAbCd000000000000000000000000000000001234\n\
             Action: dataset-upload\n\
             Timestamp: 1700000000000\n\
             \n\
             Please sign this message to verify your identity."
        );
    }

    #[test]
    fn message_preserves_address_casing() {
        let upper = build_auth_message("0xABCD", "a", 1);
        let lower = build_auth_message("0xabcd", "a", 1);
        assert_ne!(upper, lower);
    }

    #[test]
    fn message_is_reproducible() {
        let a = build_auth_message("0x1234", "review-create", 42);
        let b = build_auth_message("0x1234", "review-create", 42);
        assert_eq!(a, b);
    }
}
