use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the single invitation is in its open/close cycle.
///
/// `Hidden -> Revealing` on an open activation, `Revealing -> Visible` once
/// the settle delay elapses, `Visible -> Hidden` when a close activation's
/// collapse delay completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealState {
    #[default]
    Hidden,
    Revealing,
    Visible,
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RevealState::Hidden => "hidden",
            RevealState::Revealing => "revealing",
            RevealState::Visible => "visible",
        };
        f.write_str(s)
    }
}

/// Outcome of the one-time analytics dispatch as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrackingStatus::Idle => "idle",
            TrackingStatus::Sending => "sending",
            TrackingStatus::Success => "success",
            TrackingStatus::Error => "error",
        };
        f.write_str(s)
    }
}
