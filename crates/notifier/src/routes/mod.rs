pub mod health;
pub mod triggers;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /triggers/firestore    POST    Firestore document-created deliveries
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/triggers", triggers::router())
}
