// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the social API.
//!
//! ## Auth Flow
//!
//! 1. `POST /register` hashes the password, stores an unconfirmed user and
//!    emails a `confirmation` token.
//! 2. `GET /confirm/{token}` resolves the token and flips the user to
//!    confirmed.
//! 3. `POST /token` checks credentials (confirmed users only) and returns
//!    an `access` token.
//! 4. Protected handlers take the [`Auth`] extractor, which verifies
//!    `Authorization: Bearer <token>` and resolves the current user.
//!
//! ## Security
//!
//! - Tokens are HS256-signed against a process-wide secret loaded once at
//!   startup; claims are `sub`, `exp`, `type`.
//! - A `confirmation` token is never accepted where an `access` token is
//!   required, and vice versa.
//! - Expiry is enforced with zero leeway; there is no revocation list, so
//!   a token stays valid until its `exp` passes.
//! - Unknown email and wrong password are indistinguishable to the client.
//! - Every auth failure maps to `401` with a `WWW-Authenticate: Bearer`
//!   challenge; store outages map to `500`, never `401`.

pub mod directory;
pub mod error;
pub mod extractor;
pub mod password;
pub mod service;
pub mod token;

pub use directory::{DirectoryError, UserDirectory, UserRecord};
pub use error::AuthError;
pub use extractor::Auth;
pub use service::AuthService;
pub use token::{TokenConfig, TokenType};
