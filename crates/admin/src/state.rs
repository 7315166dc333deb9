//! Application state shared across handlers.

use std::sync::Arc;

use monngon_store::StoreClient;

use crate::config::AdminConfig;
use crate::services::{AssetClient, AuthClient};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: StoreClient,
    auth: AuthClient,
    assets: AssetClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let store = StoreClient::new(&config.store);
        let auth = AuthClient::new(&config.auth);
        let assets = AssetClient::new(&config.assets);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                auth,
                assets,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the document store client.
    #[must_use]
    pub fn store(&self) -> &StoreClient {
        &self.inner.store
    }

    /// Get a reference to the auth service client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }

    /// Get a reference to the asset host client.
    #[must_use]
    pub fn assets(&self) -> &AssetClient {
        &self.inner.assets
    }
}
