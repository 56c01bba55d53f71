#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use miam_core::{
    DeliveryError, Dispatcher, LookupError, ProfileStore, PushMessage, PushSender, UserProfile,
};
use miam_notifier::config::ServerConfig;
use miam_notifier::routes;
use miam_notifier::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
    }
}

/// In-memory profile store backed by a user-id map.
#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: HashMap<String, UserProfile>,
}

impl InMemoryProfiles {
    /// Store with no profiles at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store holding a single profile.
    pub fn with_profile(user_id: &str, profile: UserProfile) -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(user_id.to_string(), profile);
        Self { profiles }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfiles {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<UserProfile>, LookupError> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

/// Profile store whose lookups always fail.
pub struct FailingProfiles;

#[async_trait]
impl ProfileStore for FailingProfiles {
    async fn fetch_profile(&self, _user_id: &str) -> Result<Option<UserProfile>, LookupError> {
        Err(LookupError::new(std::io::Error::other(
            "profile store unreachable",
        )))
    }
}

/// Push sender that records every message it accepts.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<PushMessage>>,
}

impl RecordingSender {
    /// Snapshot of the messages accepted so far.
    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushSender for RecordingSender {
    async fn send(&self, message: PushMessage) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Push sender whose deliveries always fail.
pub struct FailingSender;

#[async_trait]
impl PushSender for FailingSender {
    async fn send(&self, _message: PushMessage) -> Result<(), DeliveryError> {
        Err(DeliveryError::new(std::io::Error::other(
            "transport rejected the message",
        )))
    }
}

/// Dispatcher over the given profile map with a recording sender, returning
/// the sender so tests can inspect what was delivered.
pub fn recording_dispatcher(profiles: InMemoryProfiles) -> (Dispatcher, Arc<RecordingSender>) {
    let sender = Arc::new(RecordingSender::default());
    let dispatcher = Dispatcher::new(Arc::new(profiles), sender.clone());
    (dispatcher, sender)
}

/// Build the full application router with all middleware layers, using the
/// given dispatcher.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(dispatcher: Dispatcher) -> Router {
    let state = AppState {
        dispatcher,
        config: Arc::new(test_config()),
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

/// Issue a GET request against the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}
