// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Every expected authentication failure is a distinct variant so callers
//! (and tests) can tell them apart, even though they all map to `401`.
//! Infrastructure failures (`Directory`, `Signing`, `Hashing`) are a
//! separate class and map to `500`; a broken user store must never
//! masquerade as bad credentials.

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use super::directory::DirectoryError;
use super::token::TokenType;

/// Authentication failure taxonomy.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Invalid authorization header format
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Unknown email or wrong password. One variant for both cases so the
    /// response does not reveal which one failed.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Credentials matched but the email was never confirmed
    #[error("Please confirm your email")]
    NotConfirmed,
    /// Token `exp` has passed
    #[error("Token has expired")]
    ExpiredToken,
    /// Token is structurally invalid or its signature does not verify
    #[error("Invalid token")]
    InvalidToken,
    /// Token verified but carries no `sub` claim
    #[error("Token is missing a subject")]
    MissingSubject,
    /// Token verified but its `type` claim is absent or not the expected one
    #[error("Token has incorrect type, expected '{expected}'")]
    WrongTokenType { expected: TokenType },
    /// Token subject no longer resolves to a user record
    #[error("Could not find user for this token")]
    UserNotFound,
    /// User directory failure (infrastructure, not an auth outcome)
    #[error("User directory unavailable: {0}")]
    Directory(String),
    /// Token signing failure (infrastructure, not an auth outcome)
    #[error("Token signing failed: {0}")]
    Signing(String),
    /// Password hashing failure (infrastructure, not an auth outcome)
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<DirectoryError> for AuthError {
    fn from(e: DirectoryError) -> Self {
        AuthError::Directory(e.to_string())
    }
}

#[derive(Serialize)]
struct AuthErrorBody {
    detail: String,
    error_code: String,
}

impl AuthError {
    /// Get the stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::NotConfirmed => "not_confirmed",
            AuthError::ExpiredToken => "expired_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::MissingSubject => "missing_subject",
            AuthError::WrongTokenType { .. } => "wrong_token_type",
            AuthError::UserNotFound => "user_not_found",
            AuthError::Directory(_) => "directory_error",
            AuthError::Signing(_) => "signing_error",
            AuthError::Hashing(_) => "hashing_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidCredentials
            | AuthError::NotConfirmed
            | AuthError::ExpiredToken
            | AuthError::InvalidToken
            | AuthError::MissingSubject
            | AuthError::WrongTokenType { .. }
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::Directory(_) | AuthError::Signing(_) | AuthError::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            detail: self.to_string(),
            error_code: self.error_code().to_string(),
        });

        // The bearer challenge belongs on auth rejections only, not on
        // infrastructure failures.
        if status == StatusCode::UNAUTHORIZED {
            (status, [(WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
