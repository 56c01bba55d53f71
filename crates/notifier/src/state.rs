use std::sync::Arc;

use miam_core::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (dispatcher clones share their capability
/// handles; config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The favorite-notification dispatcher.
    pub dispatcher: Dispatcher,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
