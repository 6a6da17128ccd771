//! Property-based tests for token issuance and verification
//!
//! These tests verify:
//! - Issued tokens verify with the issuing app and carry the exact claims
//! - A token never verifies under another app's secret
//! - Tampering with any part of a token is always detected
//! - Malformed tokens never cause panics

use std::time::Duration;

use proptest::prelude::*;
use sso_auth_core::{TokenError, TokenIssuer};
use sso_types::{App, User};

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary users
fn arb_user() -> impl Strategy<Value = User> {
    (
        1i64..i64::MAX,
        "[a-z0-9_.+-]+@[a-z0-9.-]+\\.[a-z]{2,4}",
    )
        .prop_map(|(id, email)| User::new(id, email, b"unused".to_vec()))
}

/// Generate apps with non-empty secrets
fn arb_app() -> impl Strategy<Value = App> {
    (
        1i32..i32::MAX,
        "[a-z-]{3,12}",
        prop::collection::vec(any::<u8>(), 1..64),
    )
        .prop_map(|(id, name, secret)| App::new(id, name, secret))
}

/// Generate positive TTLs up to one week
fn arb_ttl() -> impl Strategy<Value = Duration> {
    (1u64..7 * 24 * 3600).prop_map(Duration::from_secs)
}

/// Generate malformed token strings
fn arb_malformed_token() -> impl Strategy<Value = String> {
    prop_oneof![
        // No dots
        "[a-zA-Z0-9_-]{10,50}",
        // Too many segments
        "[a-zA-Z0-9_-]{5,10}\\.[a-zA-Z0-9_-]{5,10}\\.[a-zA-Z0-9_-]{5,10}\\.[a-zA-Z0-9_-]{5,10}",
        // Empty parts
        Just("..".to_string()),
        Just(".".to_string()),
        Just("".to_string()),
        // Invalid base64 characters
        "[!@#$%^&*()]{10,30}\\.[!@#$%^&*()]{10,30}\\.[a-zA-Z0-9_-]{20,40}",
    ]
}

// ============================================================================
// Roundtrip Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a freshly issued token verifies and carries the exact claims
    #[test]
    fn prop_issued_token_verifies(user in arb_user(), app in arb_app(), ttl in arb_ttl()) {
        let issuer = TokenIssuer::new();
        let token = issuer.issue(&user, &app, ttl).unwrap();

        let claims = issuer.verify(&token, &app).unwrap();
        prop_assert_eq!(claims.uid, user.id.0);
        prop_assert_eq!(claims.email, user.email);
        prop_assert_eq!(claims.app_id, app.id.0);
        prop_assert_eq!(claims.exp - claims.iat, ttl.as_secs() as i64);
    }

    /// Property: a token never verifies under a different secret
    #[test]
    fn prop_other_secret_rejected(
        user in arb_user(),
        app in arb_app(),
        other_secret in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        // HMAC zero-pads keys, so trailing zero bytes do not change the key
        let trim = |s: &[u8]| s.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        prop_assume!(other_secret[..trim(&other_secret)] != app.secret[..trim(&app.secret)]);

        let issuer = TokenIssuer::new();
        let token = issuer.issue(&user, &app, Duration::from_secs(60)).unwrap();

        let impostor = App::new(app.id, app.name.clone(), other_secret);
        prop_assert!(matches!(issuer.verify(&token, &impostor), Err(TokenError::Invalid)));
    }

    /// Property: flipping any character of the token is detected
    #[test]
    fn prop_tampering_detected(user in arb_user(), app in arb_app(), index in any::<prop::sample::Index>()) {
        let issuer = TokenIssuer::new();
        let token = issuer.issue(&user, &app, Duration::from_secs(60)).unwrap();

        let mut bytes = token.into_bytes();
        let i = index.index(bytes.len());
        if bytes[i] == b'.' {
            return Ok(());
        }
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        prop_assert!(issuer.verify(&tampered, &app).is_err());
    }

    /// Property: an empty secret never yields a token
    #[test]
    fn prop_empty_secret_never_signs(user in arb_user(), ttl in arb_ttl()) {
        let issuer = TokenIssuer::new();
        let app = App::new(1, "unsigned", Vec::new());
        prop_assert!(matches!(issuer.issue(&user, &app, ttl), Err(TokenError::InvalidInput(_))));
    }
}

// ============================================================================
// Malformed Input Properties
// ============================================================================

proptest! {
    /// Property: malformed tokens are rejected without panicking
    #[test]
    fn prop_malformed_token_rejected(token in arb_malformed_token(), app in arb_app()) {
        let issuer = TokenIssuer::new();
        prop_assert!(issuer.verify(&token, &app).is_err());
    }
}
