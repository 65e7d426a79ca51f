// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication service.
//!
//! Composes the token codec, the password hasher and the user directory:
//! login, token issuance, token-to-user resolution and email confirmation.
//! Stateless apart from the immutable codec configuration and the
//! directory handle, so a single instance is shared across requests
//! without synchronization.

use std::sync::Arc;

use tracing::debug;

use super::directory::{UserDirectory, UserRecord};
use super::token::{TokenCodec, TokenConfig, TokenType};
use super::{password, AuthError};

pub struct AuthService {
    codec: TokenCodec,
    directory: Arc<dyn UserDirectory>,
}

impl AuthService {
    pub fn new(config: TokenConfig, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            codec: TokenCodec::new(config),
            directory,
        }
    }

    /// Check credentials and return the user.
    ///
    /// Unknown email and wrong password yield the identical
    /// `InvalidCredentials`; a matched but unconfirmed user yields
    /// `NotConfirmed`. Only a fully matched, confirmed user is returned.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        debug!(email, "authenticating user");

        let Some(user) = self.directory.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_confirmed {
            return Err(AuthError::NotConfirmed);
        }

        Ok(user)
    }

    /// Issue an access token for `email`.
    ///
    /// Unconditional: confirmation is enforced at `authenticate` time, not
    /// at issue time.
    pub fn issue_access_token(&self, email: &str) -> Result<String, AuthError> {
        debug!(email, "issuing access token");
        self.codec.encode(email, TokenType::Access)
    }

    /// Issue a confirmation token for `email`, used right after
    /// registration.
    pub fn issue_confirmation_token(&self, email: &str) -> Result<String, AuthError> {
        debug!(email, "issuing confirmation token");
        self.codec.encode(email, TokenType::Confirmation)
    }

    /// Resolve a token of the expected type back to a verified user.
    pub async fn resolve_user(
        &self,
        token: &str,
        expected_type: TokenType,
    ) -> Result<UserRecord, AuthError> {
        let email = self.codec.decode(token, expected_type)?;

        self.directory
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Confirm the email address a confirmation token was issued for.
    ///
    /// Idempotent: re-confirming an already-confirmed user succeeds
    /// silently.
    pub async fn confirm(&self, token: &str) -> Result<UserRecord, AuthError> {
        let user = self.resolve_user(token, TokenType::Confirmation).await?;
        self.directory.set_confirmed(&user.email).await?;
        debug!(email = user.email, "user confirmed");

        Ok(UserRecord {
            is_confirmed: true,
            ..user
        })
    }
}
