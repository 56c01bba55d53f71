//! The favorite-notification dispatch rule.
//!
//! [`Dispatcher`] consumes one [`FavoriteEvent`] per invocation, resolves
//! the owner's profile through the injected [`ProfileStore`] and, when the
//! profile opts in and carries a usable device token, hands exactly one
//! [`PushMessage`] to the injected [`PushSender`]. Every invocation resolves
//! to a [`DispatchOutcome`] or fails with a [`DispatchError`]; skipping a
//! notification is an outcome, never an error.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::event::FavoriteEvent;
use crate::message::PushMessage;
use crate::profile::UserProfile;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of the profile-lookup capability itself.
///
/// Wraps whatever error the backing store produced. A missing profile is not
/// a lookup failure; stores report that as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
#[error("Profile lookup failed: {0}")]
pub struct LookupError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl LookupError {
    /// Wrap an underlying store error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Failure of the push-delivery capability itself.
#[derive(Debug, thiserror::Error)]
#[error("Push delivery failed: {0}")]
pub struct DeliveryError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl DeliveryError {
    /// Wrap an underlying transport error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// A fatal dispatch failure.
///
/// Only capability failures are fatal. Absent profiles, opted-out users and
/// missing device tokens resolve to [`DispatchOutcome::Skipped`] instead, so
/// a redelivered event can only fail for transient infrastructure reasons.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The profile lookup itself failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The push delivery itself failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a dispatch invocation produced no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No profile document exists for the event's user.
    ProfileMissing,
    /// The profile's push opt-in flag is absent or false.
    NotOptedIn,
    /// The profile carries no usable device token.
    NoDeviceToken,
}

/// Result of one dispatch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A push message was handed to the delivery capability.
    Sent,
    /// The event was consumed without producing a notification.
    Skipped(SkipReason),
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Read access to user profiles, keyed by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for `user_id`, or `None` when no profile document
    /// exists.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, LookupError>;
}

/// Hands push messages to the delivery transport.
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Request delivery of `message`.
    ///
    /// `Ok` means the transport accepted the request, not that the device
    /// displayed the notification.
    async fn send(&self, message: PushMessage) -> Result<(), DeliveryError>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// The favorite-notification dispatcher.
///
/// Construct once at startup over the two injected capabilities and share by
/// cloning; clones reference the same capability instances. The dispatcher
/// keeps no state between invocations, so redelivered events are dispatched
/// again without deduplication.
#[derive(Clone)]
pub struct Dispatcher {
    profiles: Arc<dyn ProfileStore>,
    push: Arc<dyn PushSender>,
}

impl Dispatcher {
    /// Create a dispatcher over the given capabilities.
    pub fn new(profiles: Arc<dyn ProfileStore>, push: Arc<dyn PushSender>) -> Self {
        Self { profiles, push }
    }

    /// Decide whether `event` warrants a push notification and send it.
    ///
    /// Awaits at most two calls, in order: the profile lookup, then (only
    /// for an opted-in profile with a usable token) the delivery. The checks
    /// run in a fixed order, so a profile that is both opted out and
    /// token-less reports [`SkipReason::NotOptedIn`].
    pub async fn dispatch(&self, event: FavoriteEvent) -> Result<DispatchOutcome, DispatchError> {
        let profile = match self.profiles.fetch_profile(&event.user_id).await? {
            Some(profile) => profile,
            None => {
                tracing::debug!(user_id = %event.user_id, "No profile for user, skipping push");
                return Ok(DispatchOutcome::Skipped(SkipReason::ProfileMissing));
            }
        };

        if !profile.push_opted_in() {
            tracing::debug!(user_id = %event.user_id, "User has not opted in to push, skipping");
            return Ok(DispatchOutcome::Skipped(SkipReason::NotOptedIn));
        }

        let Some(token) = profile.push_target() else {
            tracing::debug!(user_id = %event.user_id, "No device token on profile, skipping");
            return Ok(DispatchOutcome::Skipped(SkipReason::NoDeviceToken));
        };

        self.push
            .send(PushMessage::favorite_added(token, &event.title))
            .await?;

        tracing::info!(
            user_id = %event.user_id,
            recipe_id = %event.recipe_id,
            "Favorite push notification dispatched",
        );

        Ok(DispatchOutcome::Sent)
    }
}
