//! Outbound push-notification request and its fixed copy.

use serde::{Deserialize, Serialize};

/// Notification title used for every favorite-created push.
pub const FAVORITE_PUSH_TITLE: &str = "Favori ajouté";

/// A single push-notification send request.
///
/// Transport-agnostic: the delivery adapter decides how the token, title and
/// body map onto its wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Device registration token the notification is addressed to.
    pub token: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

impl PushMessage {
    /// Build the favorite-added notification for a recipe.
    ///
    /// The body quotes the recipe title verbatim, including when it is
    /// empty; the copy is product-owned and not localized per user.
    pub fn favorite_added(token: impl Into<String>, recipe_title: &str) -> Self {
        Self {
            token: token.into(),
            title: FAVORITE_PUSH_TITLE.to_string(),
            body: format!("La recette \"{recipe_title}\" a été ajoutée à vos favoris."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_added_uses_the_fixed_title() {
        let message = PushMessage::favorite_added("tok123", "Pasta");

        assert_eq!(message.token, "tok123");
        assert_eq!(message.title, "Favori ajouté");
    }

    #[test]
    fn favorite_added_quotes_the_recipe_title() {
        let message = PushMessage::favorite_added("tok123", "Pasta");

        assert_eq!(
            message.body,
            "La recette \"Pasta\" a été ajoutée à vos favoris."
        );
    }

    #[test]
    fn favorite_added_accepts_an_empty_title() {
        let message = PushMessage::favorite_added("tok123", "");

        assert_eq!(message.body, "La recette \"\" a été ajoutée à vos favoris.");
    }
}
