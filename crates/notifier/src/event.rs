//! Inbound Firestore trigger events.
//!
//! The trigger mechanism wraps each Firestore document change in a
//! CloudEvents 1.0 structured JSON envelope. The envelope's `subject` names
//! the changed document relative to the database root; favorite creations
//! live at `documents/favorites/{userId}/recipes/{recipeId}`. Anything else
//! delivered to this service is out of scope and ignored.

use chrono::Utc;
use serde::Deserialize;

use miam_core::{documents, FavoriteEvent};
use miam_firebase::Document;

/// CloudEvents `type` attribute of Firestore document-created events.
pub const DOCUMENT_CREATED_TYPE: &str = "google.cloud.firestore.document.v1.created";

/// First segment of every document subject, before the collection path.
const SUBJECT_DOCUMENTS_PREFIX: &str = "documents";

/// A Firestore trigger delivery in CloudEvents structured mode.
///
/// Only the attributes this service reads are modeled; the rest of the
/// envelope (`specversion`, extension attributes) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreCloudEvent {
    /// Sender-assigned event id, stable across redeliveries.
    pub id: String,
    /// Event type attribute, e.g. [`DOCUMENT_CREATED_TYPE`].
    #[serde(rename = "type")]
    pub event_type: String,
    /// Originating Firestore database resource.
    #[serde(default)]
    pub source: String,
    /// Path of the changed document relative to the database root.
    pub subject: String,
    /// Document payload.
    pub data: DocumentEventData,
}

/// Payload of a Firestore document event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentEventData {
    /// Post-change document. Absent on deletes.
    pub value: Option<Document>,
    /// Pre-change document. Absent on creates.
    pub old_value: Option<Document>,
}

/// A created event arrived without the created document.
#[derive(Debug, thiserror::Error)]
#[error("Document-created event carries no document")]
pub struct MissingDocument;

impl FirestoreCloudEvent {
    /// Interpret the envelope as a favorite-created event.
    ///
    /// Returns `Ok(None)` for deliveries this service deliberately ignores:
    /// event types other than [`DOCUMENT_CREATED_TYPE`] and documents
    /// outside the favorites tree. Fails only when a created event violates
    /// its payload contract by omitting the document.
    pub fn to_favorite_event(&self) -> Result<Option<FavoriteEvent>, MissingDocument> {
        if self.event_type != DOCUMENT_CREATED_TYPE {
            return Ok(None);
        }

        let Some((user_id, recipe_id)) = favorite_path_ids(&self.subject) else {
            return Ok(None);
        };

        let document = self.data.value.as_ref().ok_or(MissingDocument)?;

        // The recipe title is display copy; a favorite without one still
        // notifies, with an empty quoted title.
        let title = document
            .string_field(documents::TITLE_FIELD)
            .unwrap_or_default()
            .to_string();

        Ok(Some(FavoriteEvent {
            user_id: user_id.to_string(),
            recipe_id: recipe_id.to_string(),
            title,
            created_at: document.create_time.unwrap_or_else(Utc::now),
        }))
    }
}

/// Split a `documents/favorites/{userId}/recipes/{recipeId}` subject into
/// its identifier segments.
///
/// Returns `None` for every other path shape, including deeper paths under
/// the favorites tree and empty identifier segments.
fn favorite_path_ids(subject: &str) -> Option<(&str, &str)> {
    let segments: Vec<&str> = subject.split('/').collect();

    match segments.as_slice() {
        [prefix, favorites, user_id, recipes, recipe_id]
            if *prefix == SUBJECT_DOCUMENTS_PREFIX
                && *favorites == documents::FAVORITES_COLLECTION
                && *recipes == documents::RECIPES_SUBCOLLECTION
                && !user_id.is_empty()
                && !recipe_id.is_empty() =>
        {
            Some((*user_id, *recipe_id))
        }
        _ => None,
    }
}
