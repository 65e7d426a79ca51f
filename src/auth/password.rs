// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification.
//!
//! bcrypt at the crate's default cost. Each hash embeds a fresh random
//! salt, so hashing the same password twice yields different strings;
//! verification recomputes with the embedded salt and compares in constant
//! time.

use bcrypt::{hash as bcrypt_hash, verify as bcrypt_verify, DEFAULT_COST};

use super::AuthError;

/// Hash a plaintext password for storage.
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    bcrypt_hash(plaintext, DEFAULT_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a plaintext password against a stored hash.
///
/// A malformed or foreign hash string verifies as `false` rather than
/// erroring; the caller treats any failed verification as invalid
/// credentials, not a system fault.
pub fn verify(plaintext: &str, hashed: &str) -> bool {
    bcrypt_verify(plaintext, hashed).unwrap_or(false)
}
