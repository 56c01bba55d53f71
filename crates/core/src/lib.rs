//! Core domain model for the miam favorite-notification service.
//!
//! Defines the inbound [`FavoriteEvent`], the [`UserProfile`] projection and
//! [`PushMessage`] value types, and the [`Dispatcher`] that turns an event
//! into at most one push notification. The two side-effecting capabilities
//! ([`ProfileStore`] and [`PushSender`]) are traits, so the decision rule
//! stays independent of Firebase and is exercised with in-memory fakes.

pub mod dispatch;
pub mod documents;
pub mod event;
pub mod message;
pub mod profile;
pub mod types;

pub use dispatch::{
    DeliveryError, DispatchError, DispatchOutcome, Dispatcher, LookupError, ProfileStore,
    PushSender, SkipReason,
};
pub use event::FavoriteEvent;
pub use message::PushMessage;
pub use profile::UserProfile;
