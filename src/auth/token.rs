// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed, expiring bearer tokens.
//!
//! Tokens are compact JWS strings (`header.payload.signature`, HMAC-SHA256)
//! carrying three claims: `sub` (the subject email), `exp` (UTC epoch
//! seconds) and `type` (`access` or `confirmation`). A token is valid only
//! by signature and expiry at verification time. There is no server-side
//! revocation, so an issued token stays usable until its `exp` passes.
//!
//! Expiry is checked with zero leeway. Issuance and verification share the
//! process clock, and a non-positive TTL must expire deterministically.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 30;

/// Default confirmation token lifetime in minutes (24 hours).
pub const DEFAULT_CONFIRMATION_TTL_MINUTES: i64 = 1440;

/// The two purposes a token can be issued for.
///
/// A token of one type is never accepted where the other is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential authorizing protected-request access.
    Access,
    /// Longer-lived, single-purpose credential proving email ownership.
    Confirmation,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Confirmation => "confirmation",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed claim set.
///
/// `sub` and `type` are optional on the decode side so their absence can be
/// reported as `MissingSubject` / `WrongTokenType` rather than a generic
/// deserialization failure.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    exp: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
}

/// Immutable token configuration.
///
/// Constructed once at startup from the environment and handed to
/// [`TokenCodec::new`]; never read from ambient global state. TTL overrides
/// accept negative values so tests can force immediate expiry.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    access_ttl_minutes: i64,
    confirmation_ttl_minutes: i64,
}

impl TokenConfig {
    /// Create a configuration with the default TTLs (30 min access,
    /// 24 h confirmation).
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_minutes: DEFAULT_ACCESS_TTL_MINUTES,
            confirmation_ttl_minutes: DEFAULT_CONFIRMATION_TTL_MINUTES,
        }
    }

    /// Override the access token TTL.
    pub fn with_access_ttl(mut self, minutes: i64) -> Self {
        self.access_ttl_minutes = minutes;
        self
    }

    /// Override the confirmation token TTL.
    pub fn with_confirmation_ttl(mut self, minutes: i64) -> Self {
        self.confirmation_ttl_minutes = minutes;
        self
    }
}

/// Encodes and decodes signed, typed, expiring tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_minutes: i64,
    confirmation_ttl_minutes: i64,
}

impl TokenCodec {
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl_minutes: config.access_ttl_minutes,
            confirmation_ttl_minutes: config.confirmation_ttl_minutes,
        }
    }

    fn ttl_minutes(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_ttl_minutes,
            TokenType::Confirmation => self.confirmation_ttl_minutes,
        }
    }

    /// Issue a token of the given type for `subject`.
    pub fn encode(&self, subject: &str, token_type: TokenType) -> Result<String, AuthError> {
        let expire = Utc::now() + TimeDelta::minutes(self.ttl_minutes(token_type));
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: expire.timestamp(),
            token_type: Some(token_type.as_str().to_string()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// Fails with `ExpiredToken` if `exp` has passed, `InvalidToken` for any
    /// structural or signature problem, `MissingSubject` if `sub` is absent
    /// and `WrongTokenType` if `type` is absent or not `expected_type`,
    /// checked in that order.
    pub fn decode(&self, token: &str, expected_type: TokenType) -> Result<String, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                    _ => AuthError::InvalidToken,
                }
            })?;

        let claims = token_data.claims;

        let subject = claims.sub.ok_or(AuthError::MissingSubject)?;

        if claims.token_type.as_deref() != Some(expected_type.as_str()) {
            return Err(AuthError::WrongTokenType {
                expected: expected_type,
            });
        }

        Ok(subject)
    }
}
