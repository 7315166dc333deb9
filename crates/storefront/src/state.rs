//! Application state shared across handlers.

use std::sync::Arc;

use monngon_store::StoreClient;

use crate::config::StorefrontConfig;
use crate::services::auth::AuthClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// document store and auth service clients plus the configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: StoreClient,
    auth: AuthClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = StoreClient::new(&config.store);
        let auth = AuthClient::new(&config.auth);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                auth,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
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
}
