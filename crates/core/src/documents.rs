//! Well-known document collection and field names.
//!
//! The mobile app owns the document layout; this service only reads it.
//! Profile documents live under `users/{userId}` and favorite records under
//! `favorites/{userId}/recipes/{recipeId}`. The constants here keep the
//! store adapters and the trigger parser pointing at the same names.

/// Top-level collection holding one profile document per user.
pub const USERS_COLLECTION: &str = "users";

/// Top-level collection holding one favorites document per user.
pub const FAVORITES_COLLECTION: &str = "favorites";

/// Per-user subcollection holding one document per favorited recipe.
pub const RECIPES_SUBCOLLECTION: &str = "recipes";

/// Profile field carrying the FCM device registration token.
pub const FCM_TOKEN_FIELD: &str = "fcmToken";

/// Profile field carrying the push opt-in flag.
pub const NOTIF_PUSH_FIELD: &str = "notif_push";

/// Favorite-record field carrying the recipe display name.
pub const TITLE_FIELD: &str = "title";
