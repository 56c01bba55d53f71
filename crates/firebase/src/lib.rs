//! Firebase adapters for the miam favorite-notification service.
//!
//! Implements the two capabilities the dispatcher is generic over against
//! Google's REST APIs: [`FirestoreClient`] reads profile documents
//! (`ProfileStore`) and [`FcmClient`] delivers push notifications
//! (`PushSender`). Both authenticate through a shared [`TokenSource`].

pub mod auth;
pub mod document;
pub mod firestore;
pub mod messaging;

pub use auth::{AuthError, ServiceAccountKey, TokenSource};
pub use document::{Document, Value};
pub use firestore::{FirestoreClient, FirestoreError};
pub use messaging::{FcmClient, FcmError};
