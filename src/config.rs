// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `BASE_URL` | Public base URL used in confirmation links | `http://localhost:8080` |
//! | `JWT_SECRET` | HMAC secret for token signing | Insecure dev default |
//! | `ACCESS_TOKEN_TTL_MINUTES` | Access token lifetime | `30` |
//! | `CONFIRMATION_TOKEN_TTL_MINUTES` | Confirmation token lifetime | `1440` |
//! | `MAILGUN_DOMAIN` | Mailgun sending domain | Unset (delivery disabled) |
//! | `MAILGUN_API_KEY` | Mailgun API key | Unset (delivery disabled) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the public base URL.
///
/// Confirmation emails embed `{BASE_URL}/confirm/{token}`, so this must be
/// the address the service is reachable at from the outside, not the bind
/// address.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Environment variable name for the token signing secret.
///
/// The secret is read once at startup and is immutable for the lifetime of
/// the process. Every token issued by this process is signed with it
/// (HMAC-SHA256); restarting with a different secret invalidates all
/// outstanding tokens.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the access token TTL override (minutes).
pub const ACCESS_TOKEN_TTL_ENV: &str = "ACCESS_TOKEN_TTL_MINUTES";

/// Environment variable name for the confirmation token TTL override
/// (minutes).
pub const CONFIRMATION_TOKEN_TTL_ENV: &str = "CONFIRMATION_TOKEN_TTL_MINUTES";

/// Environment variable name for the Mailgun sending domain.
pub const MAILGUN_DOMAIN_ENV: &str = "MAILGUN_DOMAIN";

/// Environment variable name for the Mailgun API key.
pub const MAILGUN_API_KEY_ENV: &str = "MAILGUN_API_KEY";

/// Environment variable name for the logging format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Fallback signing secret for local development.
///
/// Only used when `JWT_SECRET` is unset; startup logs a warning when it is.
pub const DEV_JWT_SECRET: &str = "insecure-dev-secret-change-me";
