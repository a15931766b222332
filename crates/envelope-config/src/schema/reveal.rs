//! Reveal timing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing of the open/close transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between an open activation and the card becoming visible (0-10000).
    pub settle_delay_ms: u32,
    /// Delay between a close activation and the envelope returning to hidden (0-10000).
    pub collapse_delay_ms: u32,
}

impl RevealConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.settle_delay_ms))
    }

    pub fn collapse_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.collapse_delay_ms))
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            collapse_delay_ms: 1000,
        }
    }
}
