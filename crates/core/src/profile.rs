//! User profile projection consulted by the dispatcher.

use serde::{Deserialize, Serialize};

/// The subset of a user's profile document that decides push delivery.
///
/// Both fields are written by settings flows outside this service and may be
/// absent on older profiles, so each one is individually optional. Absence
/// always resolves to "do not push".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// FCM device registration token (`fcmToken` on the stored document).
    pub fcm_token: Option<String>,
    /// Push opt-in flag (`notif_push` on the stored document).
    pub notif_push: Option<bool>,
}

impl UserProfile {
    /// Whether the user has opted in to push notifications.
    ///
    /// An absent flag counts as opted out.
    pub fn push_opted_in(&self) -> bool {
        self.notif_push.unwrap_or(false)
    }

    /// The device token a push notification should be addressed to.
    ///
    /// Returns `None` when the token is absent or empty; an empty string is
    /// never a deliverable target.
    pub fn push_target(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|token| !token.is_empty())
    }
}
