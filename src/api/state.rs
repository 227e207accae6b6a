//! Application state for the TDS engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::RuleCatalog;

/// Shared application state.
///
/// Holds the rule catalog, loaded once at startup and read by every request.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rule catalog.
    catalog: Arc<RuleCatalog>,
}

impl AppState {
    /// Creates a new application state around the given catalog.
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Returns a reference to the rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }
}
