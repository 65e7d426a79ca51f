// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The user directory seam.
//!
//! `AuthService` reaches the user table only through this trait, so the
//! backing store stays an external collaborator: one single-row read
//! (`find_by_email`) and one single-row write (`set_confirmed`) with no
//! cross-call ordering guarantee and no retry.

use async_trait::async_trait;
use thiserror::Error;

/// A user row as the authentication core sees it.
///
/// Carries the password hash for in-process verification; the hash must
/// never leave this process, so the record itself is not serializable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_confirmed: bool,
}

/// Infrastructure failure while talking to the user store.
///
/// Distinct from every authentication outcome: a directory failure is a
/// 5xx-class fault for the request, never a 401.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

/// Look-up and confirmation updates on the user table.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by email. `Ok(None)` means the email is unknown.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DirectoryError>;

    /// Mark the user with this email as confirmed.
    ///
    /// Row-update semantics: updating a missing row succeeds (zero rows
    /// touched), and re-confirming an already-confirmed user is a no-op.
    async fn set_confirmed(&self, email: &str) -> Result<(), DirectoryError>;
}
