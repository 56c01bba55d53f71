//! Inbound favorite-created event record.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A user adding a recipe to their favorites, as observed by the trigger.
///
/// One value is parsed per trigger delivery and handed to the dispatcher by
/// value; nothing about it is retained across invocations. Redeliveries of
/// the same underlying change produce equal events and are dispatched again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteEvent {
    /// Owner of the favorites list the record was created under.
    pub user_id: String,
    /// Identifier of the created favorite record.
    pub recipe_id: String,
    /// Recipe display name. May be empty; only used for notification copy.
    pub title: String,
    /// Creation time of the favorite record (UTC).
    pub created_at: Timestamp,
}

impl FavoriteEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        recipe_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            recipe_id: recipe_id.into(),
            title: title.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_preserves_identifiers_and_title() {
        let event = FavoriteEvent::new("u1", "r42", "Pasta");

        assert_eq!(event.user_id, "u1");
        assert_eq!(event.recipe_id, "r42");
        assert_eq!(event.title, "Pasta");
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let event = FavoriteEvent::new("u1", "r42", "Pasta");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["user_id"], "u1");
        assert_eq!(json["recipe_id"], "r42");
        assert_eq!(json["title"], "Pasta");
        assert!(json["created_at"].is_string());
    }
}
