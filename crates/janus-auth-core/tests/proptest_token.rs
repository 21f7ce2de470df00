//! Property-based tests for access token verification and refresh token
//! value generation
//!
//! These tests verify:
//! - Arbitrary input never panics the verifier and never authenticates
//! - Tampering with a valid token is always detected
//! - Generated refresh token values stay inside the URL-safe alphabet

use janus_auth_core::crypto::generate_refresh_token;
use janus_auth_core::{AuthConfig, AuthError, TokenIssuer};
use janus_types::{Role, UserId};
use proptest::prelude::*;
use std::collections::HashSet;

fn issuer() -> TokenIssuer {
    let config = AuthConfig::try_new(
        "proptest-secret-proptest-secret-0123",
        "janus",
        "janus-api",
    )
    .unwrap();
    TokenIssuer::new(&config)
}

/// Strings that look vaguely token-like plus outright garbage
fn arb_junk_token() -> impl Strategy<Value = String> {
    prop_oneof![
        // Random printable noise
        "[ -~]{0,120}",
        // JWT-shaped but meaningless
        "[a-zA-Z0-9_-]{5,40}\\.[a-zA-Z0-9_-]{5,40}\\.[a-zA-Z0-9_-]{5,40}",
        // Degenerate separators
        Just(String::new()),
        Just(".".to_string()),
        Just("..".to_string()),
        Just("...".to_string()),
    ]
}

proptest! {
    /// Property: junk input is always rejected as unauthenticated, never a
    /// panic, never any other error shape
    #[test]
    fn prop_junk_never_authenticates(token in arb_junk_token()) {
        let result = issuer().verify(&token);
        prop_assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    /// Property: flipping any single character of a valid token invalidates it
    #[test]
    fn prop_single_char_tampering_detected(
        user_id in 1i32..100_000,
        position in 0usize..256,
    ) {
        let issuer = issuer();
        let token = issuer.issue(UserId(user_id), Role::User).unwrap();

        let position = position % token.len();
        let mut chars: Vec<char> = token.chars().collect();
        let original = chars[position];
        chars[position] = if original == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        if tampered != token {
            prop_assert!(matches!(
                issuer.verify(&tampered),
                Err(AuthError::Unauthenticated)
            ));
        }
    }

    /// Property: issued tokens always verify and carry the subject back
    #[test]
    fn prop_issued_tokens_roundtrip(user_id in 1i32..1_000_000) {
        let issuer = issuer();
        let token = issuer.issue(UserId(user_id), Role::User).unwrap();
        let claims = issuer.verify(&token).unwrap();
        prop_assert_eq!(claims.user_id(), Some(UserId(user_id)));
    }
}

#[test]
fn test_refresh_token_values_stay_url_safe() {
    for _ in 0..256 {
        let value = generate_refresh_token();
        assert_eq!(value.len(), 43);
        assert!(value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}

#[test]
fn test_refresh_token_values_do_not_collide() {
    let mut seen = HashSet::new();
    for _ in 0..4096 {
        assert!(seen.insert(generate_refresh_token()));
    }
}
