//! FCM HTTP v1 messaging client.
//!
//! Sends notification messages through `POST
//! /v1/projects/{project}/messages:send` using [`reqwest`] and implements
//! the [`PushSender`] capability for the dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use miam_core::{DeliveryError, PushMessage, PushSender};

use crate::auth::{AuthError, TokenSource};

/// Public FCM HTTP v1 endpoint.
const DEFAULT_BASE_URL: &str = "https://fcm.googleapis.com/v1";

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the FCM REST layer.
#[derive(Debug, thiserror::Error)]
pub enum FcmError {
    /// A bearer token could not be acquired.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The device token is no longer registered with FCM.
    #[error("Device token is no longer registered")]
    Unregistered,

    /// FCM returned a non-2xx status code.
    #[error("FCM API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Request envelope for `messages:send`.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

/// A message addressed to a single device token.
#[derive(Debug, Serialize)]
struct Message<'a> {
    token: &'a str,
    notification: Notification<'a>,
}

/// User-visible notification content.
#[derive(Debug, Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

impl<'a> SendRequest<'a> {
    fn from_push(message: &'a PushMessage) -> Self {
        Self {
            message: Message {
                token: &message.token,
                notification: Notification {
                    title: &message.title,
                    body: &message.body,
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// FcmClient
// ---------------------------------------------------------------------------

/// HTTP client for FCM sends on behalf of one Firebase project.
pub struct FcmClient {
    client: reqwest::Client,
    auth: TokenSource,
    project_id: String,
    base_url: String,
}

impl FcmClient {
    /// Create a client for a Firebase project.
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

    /// Point the client at a different endpoint (a local FCM stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send one notification message.
    ///
    /// A 404 from FCM means the token is stale and maps to
    /// [`FcmError::Unregistered`]; any other non-2xx status maps to
    /// [`FcmError::ApiError`].
    pub async fn send_message(&self, message: &PushMessage) -> Result<(), FcmError> {
        let token = self.auth.token().await?;
        let url = format!(
            "{}/projects/{}/messages:send",
            self.base_url, self.project_id
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&SendRequest::from_push(message))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FcmError::Unregistered);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FcmError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Map a raw send result onto the delivery capability's contract.
///
/// A stale token is a permanent per-device condition; failing the dispatch
/// would only make the trigger redeliver to the same token, so
/// [`FcmError::Unregistered`] resolves to a dropped send. Every other error
/// is a delivery failure.
fn delivery_result(result: Result<(), FcmError>) -> Result<(), DeliveryError> {
    match result {
        Err(FcmError::Unregistered) => {
            tracing::warn!("Dropped push notification for an unregistered device token");
            Ok(())
        }
        result => result.map_err(DeliveryError::new),
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(&self, message: PushMessage) -> Result<(), DeliveryError> {
        delivery_result(self.send_message(&message).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn send_request_matches_the_v1_wire_shape() {
        let message = PushMessage {
            token: "tok123".to_string(),
            title: "Favori ajouté".to_string(),
            body: "La recette \"Pasta\" a été ajoutée à vos favoris.".to_string(),
        };

        let wire = serde_json::to_value(SendRequest::from_push(&message)).unwrap();

        assert_eq!(
            wire,
            json!({
                "message": {
                    "token": "tok123",
                    "notification": {
                        "title": "Favori ajouté",
                        "body": "La recette \"Pasta\" a été ajoutée à vos favoris."
                    }
                }
            })
        );
    }

    #[test]
    fn unregistered_display_is_stable() {
        assert_eq!(
            FcmError::Unregistered.to_string(),
            "Device token is no longer registered"
        );
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = FcmError::ApiError {
            status: 429,
            body: "quota exceeded".to_string(),
        };

        assert_eq!(err.to_string(), "FCM API error (429): quota exceeded");
    }

    #[test]
    fn unregistered_token_resolves_to_a_dropped_send() {
        assert!(delivery_result(Err(FcmError::Unregistered)).is_ok());
    }

    #[test]
    fn api_errors_propagate_as_delivery_failures() {
        let err = delivery_result(Err(FcmError::ApiError {
            status: 500,
            body: "internal".to_string(),
        }))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Push delivery failed: FCM API error (500): internal"
        );
    }

    #[test]
    fn successful_sends_pass_through() {
        assert!(delivery_result(Ok(())).is_ok());
    }
}
