//! Application state for the web layer.

use std::sync::Arc;

use crate::api::RegistryApi;
use crate::catalog::Catalog;

use super::session::{SessionConfig, SessionStore};

/// Shared application state.
pub struct AppState<A> {
    /// Live browser sessions
    pub sessions: SessionStore<A>,

    /// Regions, paging and year range
    pub catalog: Arc<Catalog>,
}

impl<A: RegistryApi> AppState<A> {
    /// Create a new app state around a registry implementation.
    pub fn new(api: A, catalog: Arc<Catalog>, sessions: &SessionConfig) -> Self {
        Self {
            sessions: SessionStore::new(Arc::new(api), catalog.clone(), sessions),
            catalog,
        }
    }
}

impl<A: RegistryApi> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            catalog: self.catalog.clone(),
        }
    }
}
