// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;
use url::Url;

use crate::auth::{AuthService, TokenConfig};
use crate::config::DEV_JWT_SECRET;
use crate::mailer::Mailer;
use crate::store::{InMemoryStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth: Arc<AuthService>,
    pub mailer: Mailer,
    /// Public base URL embedded in confirmation links.
    pub base_url: Url,
}

impl AppState {
    pub fn new(
        store: InMemoryStore,
        token_config: TokenConfig,
        mailer: Mailer,
        base_url: Url,
    ) -> Self {
        let store = Arc::new(RwLock::new(store));
        let directory = Arc::new(UserStore::new(store.clone()));
        let auth = Arc::new(AuthService::new(token_config, directory));

        Self {
            store,
            auth,
            mailer,
            base_url,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            InMemoryStore::new(),
            TokenConfig::new(DEV_JWT_SECRET),
            Mailer::null(),
            Url::parse("http://localhost:8080").expect("static base URL parses"),
        )
    }
}
