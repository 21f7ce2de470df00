//! Cryptographic primitives: password hashing and token entropy
//!
//! The verifier must not leak anything through error paths: a malformed
//! stored hash is reported as a plain mismatch, never as a distinct error.

use argon2::password_hash::{rand_core::OsRng as SaltRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::AuthError;

/// Refresh token entropy in bytes (256 bits)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Hash a plaintext password with Argon2id.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut SaltRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            AuthError::Internal("failed to hash password".to_string())
        })
}

/// Verify a plaintext password against a stored Argon2 hash.
///
/// Runs the full verification regardless of where a mismatch occurs; an
/// unparseable stored hash counts as a mismatch.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Generate a fresh refresh token value.
///
/// 32 bytes of OS randomness, URL-safe base64 without padding. Collisions
/// are not expected within the lifetime of the system; the store's unique
/// constraint catches the astronomically unlikely one.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
