//! Route definitions for the `/triggers` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::triggers;
use crate::state::AppState;

/// Routes mounted at `/triggers`.
///
/// ```text
/// POST   /firestore    -> receive_firestore_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/firestore", post(triggers::receive_firestore_event))
}
