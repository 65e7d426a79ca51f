// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;
use url::Url;

use relational_social_server::{
    api::router,
    auth::TokenConfig,
    config::{
        ACCESS_TOKEN_TTL_ENV, BASE_URL_ENV, CONFIRMATION_TOKEN_TTL_ENV, DEV_JWT_SECRET,
        HOST_ENV, JWT_SECRET_ENV, LOG_FORMAT_ENV, PORT_ENV,
    },
    mailer::{Mailer, MailerConfig},
    state::AppState,
    store::InMemoryStore,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = matches!(env::var(LOG_FORMAT_ENV).as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn token_config_from_env() -> TokenConfig {
    let secret = match env::var(JWT_SECRET_ENV) {
        Ok(secret) => secret,
        Err(_) => {
            tracing::warn!(
                "{JWT_SECRET_ENV} is not set, falling back to the insecure development secret"
            );
            DEV_JWT_SECRET.to_string()
        }
    };

    let mut config = TokenConfig::new(secret);
    if let Some(minutes) = env::var(ACCESS_TOKEN_TTL_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config = config.with_access_ttl(minutes);
    }
    if let Some(minutes) = env::var(CONFIRMATION_TOKEN_TTL_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config = config.with_confirmation_ttl(minutes);
    }
    config
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let base_url: Url = env::var(BASE_URL_ENV)
        .unwrap_or_else(|_| "http://localhost:8080".to_string())
        .parse()
        .expect("Failed to parse BASE_URL");

    let mailer = Mailer::spawn(MailerConfig::from_env());
    let state = AppState::new(
        InMemoryStore::new(),
        token_config_from_env(),
        mailer,
        base_url,
    );
    let app = router(state);

    // Parse bind address
    let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(PORT_ENV)
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Relational Social server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}
