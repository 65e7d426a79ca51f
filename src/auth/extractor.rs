// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the resolved UserRecord
//! }
//! ```
//!
//! Any failure (absent header, non-Bearer scheme, expired/forged/
//! wrong-type token, unknown subject) rejects the request with `401`
//! before the handler runs.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{token::TokenType, AuthError, UserRecord};
use crate::state::AppState;

/// Extractor for the authenticated user of the current request.
pub struct Auth(pub UserRecord);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // A user resolved earlier in the request (e.g. by another
        // extractor) is reused instead of verifying twice.
        if let Some(user) = parts.extensions.get::<UserRecord>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let user = state
            .auth
            .resolve_user(token.trim(), TokenType::Access)
            .await?;
        parts.extensions.insert(user.clone());

        Ok(Auth(user))
    }
}
