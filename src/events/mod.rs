use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const USER_REGISTERED: &str = "user.registered";
pub const USER_LOGGED_IN: &str = "user.logged_in";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to serialize event payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("event sink unavailable: {0}")]
    Unavailable(String),
}

/// Best-effort destination for domain events.
#[async_trait]
pub trait EventSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn publish(&self, event_type: &str, payload: Value) -> Result<(), EventError>;
}

/// Which sink the process publishes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Disabled,
    Log,
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "disabled" | "off" => Ok(SinkKind::Disabled),
            "log" | "tracing" => Ok(SinkKind::Log),
            other => Err(format!("unknown event sink '{}'", other)),
        }
    }
}

pub fn sink_for(kind: SinkKind) -> Arc<dyn EventSink> {
    match kind {
        SinkKind::Disabled => Arc::new(DisabledSink),
        SinkKind::Log => Arc::new(LogSink),
    }
}

/// Drops every event. Used when no broker is configured.
pub struct DisabledSink;

#[async_trait]
impl EventSink for DisabledSink {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn publish(&self, event_type: &str, _payload: Value) -> Result<(), EventError> {
        tracing::debug!(event_type, "event publishing disabled, dropping event");
        Ok(())
    }
}

/// Writes events to the structured log.
pub struct LogSink;

#[async_trait]
impl EventSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn publish(&self, event_type: &str, payload: Value) -> Result<(), EventError> {
        tracing::info!(event_type, %payload, "event published");
        Ok(())
    }
}

/// Payload of the user lifecycle events.
#[derive(Debug, Clone, Serialize)]
pub struct UserEvent {
    pub user_id: String,
    pub email: String,
}

/// Publish without blocking the caller. Failures are logged and swallowed.
pub fn publish_detached<T: Serialize>(sink: Arc<dyn EventSink>, event_type: &'static str, payload: &T) {
    let payload = match serde_json::to_value(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(event_type, "dropping event: {}", EventError::from(e));
            return;
        }
    };

    tokio::spawn(async move {
        if let Err(e) = sink.publish(event_type, payload).await {
            tracing::warn!(event_type, sink = sink.name(), "failed to publish event: {}", e);
        }
    });
}
