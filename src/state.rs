//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, the token service, and the task store.

use crate::auth::TokenService;
use crate::config::ConfigV1;
use crate::store::Store;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler and contains
/// references to the configuration, token service, and persistent store.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Issues and verifies session tokens.
    pub tokens: Arc<TokenService>,
    /// Persistent storage for users and tasks.
    pub store: Arc<dyn Store>,
}
