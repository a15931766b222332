//! Celebratory particle burst configuration.

use serde::{Deserialize, Serialize};

/// Shape of the burst generated on every reveal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles per reveal (1-1000).
    pub count: u32,
    /// Width of the symmetric offset range; offsets fall in `[-spread/2, spread/2)`.
    pub spread: f64,
    /// Upper bound (exclusive) of the per-particle animation delay.
    pub max_delay_ms: u32,
    /// Colours a particle may take, as `#RRGGBB`.
    pub palette: Vec<String>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 75,
            spread: 600.0,
            max_delay_ms: 300,
            palette: vec![
                "#FFFFFF".into(),
                "#FFD700".into(),
                "#ADD8E6".into(),
                "#E6E6FA".into(),
            ],
        }
    }
}
