//! Test harness: the real router over in-memory repositories.

pub mod memory;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::app::{self, AppState};
use crate::auth::{JwtSecret, TokenCodec};
use crate::config::AppConfig;
use crate::events::DisabledSink;
use crate::UserId;

pub use memory::MemoryStore;

pub const TEST_SECRET: &str = "cozy-test-secret";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let codec = TokenCodec::new(JwtSecret::new(TEST_SECRET), 72);
        let state = AppState::new(codec, store.repositories(), Arc::new(DisabledSink), None);
        let config = AppConfig::from_lookup(|_| None);

        Self {
            store,
            router: app::router(state, &config),
        }
    }

    /// A token the gate accepts, for a user that need not exist.
    pub fn token_for(&self, user_id: UserId) -> String {
        TokenCodec::new(JwtSecret::new(TEST_SECRET), 72)
            .issue(&user_id)
            .expect("test codec has a secret")
    }

    /// Send one request through the full router. Empty bodies come back as `Null`.
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
