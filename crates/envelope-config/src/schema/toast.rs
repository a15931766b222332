//! Tracking toast configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// How long a success/error toast stays up (100-60000).
    pub duration_ms: u32,
    pub success_message: String,
    pub error_message: String,
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000,
            success_message: "Response has been recorded. Thank you!".into(),
            error_message: "Could not record visit. A client-side error occurred.".into(),
        }
    }
}
