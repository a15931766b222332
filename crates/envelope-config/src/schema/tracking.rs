//! One-time analytics ping configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TRACKING_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbzu1YEV84l1okk_SQDJJcqil1sW9pqlPC6ph895-AV-skxVRWlwL_DSJguCtUBn6RVS/exec";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Value of the `event` field in the posted payload.
    pub event_name: String,
    /// Name of the persisted "already tracked" marker.
    pub flag_key: String,
    pub timeout_secs: u32,
}

impl TrackingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_secs))
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_TRACKING_ENDPOINT.into(),
            event_name: "Envelope Opened".into(),
            flag_key: "invitationClicked".into(),
            timeout_secs: 10,
        }
    }
}
