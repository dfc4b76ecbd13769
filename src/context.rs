//! Application context: credential holder, cache store and client, built once
//! at start and torn down on logout.

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    api::{ApiClient, ApiError, ClientConfig},
    cache::QueryCache,
    guard::{Navigator, RouteDecision},
    session::{Session, Storage, StorageError},
};

#[derive(Clone, Debug)]
pub struct AppContext {
    session: Session,
    cache: QueryCache,
    api: ApiClient,
}

impl AppContext {
    /// Builds the context over `storage`. The persisted session is not read
    /// until [`AppContext::restore`] is called.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        let session = Session::new(storage);
        let cache = QueryCache::new();
        let api = ApiClient::new(config, session.clone(), cache.clone())?;
        Ok(Self {
            session,
            cache,
            api,
        })
    }

    /// Loads a persisted, unexpired credential. Returns whether one was found.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing store fails.
    pub fn restore(&self) -> Result<bool, StorageError> {
        let restored = self.session.restore()?;
        debug!(restored, "session restore");
        Ok(restored)
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        self.session.navigator()
    }

    /// Runs the route guard for `path` against the current session.
    pub fn visit(&self, path: &str) -> RouteDecision {
        self.navigator()
            .visit(path, self.session.is_authenticated())
    }

    /// Signs out: clears the credential, the profile blob and every cached
    /// read.
    ///
    /// # Errors
    /// Returns `StorageError` if the persisted record cannot be removed; the
    /// cache is reset regardless.
    pub fn logout(&self) -> Result<(), StorageError> {
        let result = self.session.destroy();
        self.cache.reset();
        info!("signed out");
        result
    }
}
