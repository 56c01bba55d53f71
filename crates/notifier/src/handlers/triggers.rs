//! Handlers for inbound Firestore trigger deliveries.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use miam_core::DispatchOutcome;

use crate::error::{AppError, AppResult};
use crate::event::FirestoreCloudEvent;
use crate::state::AppState;

/// POST /v1/triggers/firestore
///
/// Accept one Firestore document-created delivery and run the favorite
/// dispatch rule on it.
///
/// - `200` with the dispatch outcome for events in the favorites tree.
/// - `204` for deliveries outside the trigger scope (foreign event type or
///   document path); acknowledging them stops redelivery.
/// - `400` for envelopes that violate the document-created contract.
/// - `500` when a capability fails, so the trigger mechanism redelivers.
pub async fn receive_firestore_event(
    State(state): State<AppState>,
    Json(envelope): Json<FirestoreCloudEvent>,
) -> AppResult<Response> {
    let event = envelope
        .to_favorite_event()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let Some(event) = event else {
        tracing::warn!(
            event_id = %envelope.id,
            event_type = %envelope.event_type,
            subject = %envelope.subject,
            "Ignoring delivery outside the favorites trigger scope",
        );
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    tracing::debug!(
        event_id = %envelope.id,
        user_id = %event.user_id,
        recipe_id = %event.recipe_id,
        "Received favorite-created event",
    );

    let outcome = state.dispatcher.dispatch(event).await?;

    let body = match outcome {
        DispatchOutcome::Sent => serde_json::json!({ "outcome": "sent" }),
        DispatchOutcome::Skipped(reason) => {
            serde_json::json!({ "outcome": "skipped", "reason": reason })
        }
    };

    Ok((StatusCode::OK, Json(body)).into_response())
}
