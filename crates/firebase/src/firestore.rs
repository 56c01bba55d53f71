//! REST client for Firestore document reads.
//!
//! Wraps the Firestore REST API (`GET .../documents/{path}`) using
//! [`reqwest`] and projects profile documents into the
//! [`UserProfile`] shape the dispatcher consumes.

use std::time::Duration;

use async_trait::async_trait;

use miam_core::{documents, LookupError, ProfileStore, UserProfile};

use crate::auth::{AuthError, TokenSource};
use crate::document::Document;

/// Public Firestore REST endpoint.
const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// HTTP request timeout for a single document read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the Firestore REST layer.
///
/// An absent document is not an error; reads report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum FirestoreError {
    /// A bearer token could not be acquired.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Firestore returned a non-2xx status code other than 404.
    #[error("Firestore API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for document reads against one Firestore database.
///
/// Reads go to the project's `(default)` database.
pub struct FirestoreClient {
    client: reqwest::Client,
    auth: TokenSource,
    project_id: String,
    base_url: String,
}

impl FirestoreClient {
    /// Create a client for a project's default database.
    pub fn new(auth: TokenSource, project_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            auth,
            project_id: project_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (the Firestore emulator).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch a document by collection and id.
    ///
    /// Returns `Ok(None)` when the document does not exist.
    pub async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Document>, FirestoreError> {
        let token = self.auth.token().await?;
        let url = format!(
            "{}/projects/{}/databases/(default)/documents/{}/{}",
            self.base_url, self.project_id, collection, document_id
        );

        let response = self.client.get(url).bearer_auth(token).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::ensure_success(response).await?;
        Ok(Some(response.json::<Document>().await?))
    }

    /// Fetch the dispatch-relevant projection of a user's profile document.
    pub async fn fetch_user_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<UserProfile>, FirestoreError> {
        let document = self
            .get_document(documents::USERS_COLLECTION, user_id)
            .await?;
        Ok(document.map(|doc| profile_from_document(&doc)))
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`FirestoreError::ApiError`] containing
    /// the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, FirestoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FirestoreError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Project the dispatch-relevant fields out of a profile document.
///
/// Fields that are absent or of an unexpected kind read as absent, matching
/// the optional shape of [`UserProfile`].
fn profile_from_document(document: &Document) -> UserProfile {
    UserProfile {
        fcm_token: document
            .string_field(documents::FCM_TOKEN_FIELD)
            .map(str::to_owned),
        notif_push: document.bool_field(documents::NOTIF_PUSH_FIELD),
    }
}

#[async_trait]
impl ProfileStore for FirestoreClient {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, LookupError> {
        self.fetch_user_profile(user_id).await.map_err(LookupError::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn projects_token_and_opt_in_from_a_full_profile() {
        let doc = document(json!({
            "name": "projects/miam-app/databases/(default)/documents/users/u1",
            "fields": {
                "fcmToken": { "stringValue": "tok123" },
                "notif_push": { "booleanValue": true },
                "displayName": { "stringValue": "Jo" }
            }
        }));

        let profile = profile_from_document(&doc);

        assert_eq!(
            profile,
            UserProfile {
                fcm_token: Some("tok123".to_string()),
                notif_push: Some(true),
            }
        );
    }

    #[test]
    fn absent_fields_project_to_none() {
        let doc = document(json!({
            "fields": {
                "displayName": { "stringValue": "Jo" }
            }
        }));

        let profile = profile_from_document(&doc);

        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn mistyped_fields_project_to_none() {
        let doc = document(json!({
            "fields": {
                "fcmToken": { "booleanValue": true },
                "notif_push": { "stringValue": "yes" }
            }
        }));

        let profile = profile_from_document(&doc);

        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = FirestoreError::ApiError {
            status: 503,
            body: "unavailable".to_string(),
        };

        assert_eq!(err.to_string(), "Firestore API error (503): unavailable");
    }
}
