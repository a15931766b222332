//! Fire-and-forget delivery of the analytics event.
//!
//! The transport is send-only: a dispatch succeeds when the request was
//! issued without a local error. The response status and body are never
//! read, so "success" means issued, not confirmed.

use std::time::Duration;

use async_trait::async_trait;
use envelope_common::DispatchError;
use envelope_config::schema::TrackingConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JSON payload of the analytics ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub event: String,
}

impl TrackingEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }
}

#[async_trait]
pub trait EventDispatcher: Send + Sync {
    async fn dispatch(&self, event: &TrackingEvent) -> Result<(), DispatchError>;
}

/// POSTs the event as JSON to a fixed endpoint.
pub struct HttpDispatcher {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpDispatcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Build(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn from_config(config: &TrackingConfig) -> Result<Self, DispatchError> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EventDispatcher for HttpDispatcher {
    async fn dispatch(&self, event: &TrackingEvent) -> Result<(), DispatchError> {
        debug!(endpoint = %self.endpoint, event = %event.event, "dispatching tracking event");

        // The response is dropped unread on purpose.
        self.http
            .post(&self.endpoint)
            .json(event)
            .send()
            .await
            .map(drop)
            .map_err(|e| DispatchError::Transport(e.to_string()))
    }
}
