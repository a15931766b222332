//! Configuration schema types for the invitation.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the timings and assets the invitation
//! ships with.

mod audio;
mod particles;
mod reveal;
mod system;
mod toast;
mod tracking;

pub use audio::*;
pub use particles::*;
pub use reveal::*;
pub use system::*;
pub use toast::*;
pub use tracking::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct EnvelopeConfig {
    pub reveal: RevealConfig,
    pub audio: AudioConfig,
    pub particles: ParticleConfig,
    pub tracking: TrackingConfig,
    pub toast: ToastConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
