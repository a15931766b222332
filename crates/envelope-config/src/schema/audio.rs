//! Ambient audio configuration: fade-out behaviour and source candidates.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Candidate tracks in priority order: CDN and raw mirrors of the main
/// track, a drive backup, then a generic classical fallback.
pub const DEFAULT_AUDIO_SOURCES: &[&str] = &[
    "https://cdn.jsdelivr.net/gh/skype8067-afk/muixcsaqwwd@main/audio/music.mp3",
    "https://cdn.jsdelivr.net/gh/skype8067-afk/muixcsaqwwd@master/audio/music.mp3",
    "https://raw.githubusercontent.com/skype8067-afk/muixcsaqwwd/main/audio/music.mp3",
    "https://raw.githubusercontent.com/skype8067-afk/muixcsaqwwd/master/audio/music.mp3",
    "https://cdn.jsdelivr.net/gh/skype8067-afk/muixcsaqwwd@main/music.mp3",
    "https://cdn.jsdelivr.net/gh/skype8067-afk/muixcsaqwwd@master/music.mp3",
    "https://drive.google.com/uc?export=download&id=1jysi8M6PWEe9PGZpH1tFhbHYwCqgFrqY&confirm=t",
    "https://files.freemusicarchive.org/storage-freemusicarchive-org/music/no_curator/Kevin_MacLeod/Classical_Sampler/Kevin_MacLeod_-_Gymnopedie_No_1.mp3",
];

/// Audio playback and fade-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Volume removed per fade tick (0.0 exclusive - 1.0).
    pub fade_step: f64,
    /// Interval between fade ticks in milliseconds (1-1000).
    pub fade_tick_ms: u32,
    /// Volume playback (re)starts at on every open (0.0-1.0).
    pub start_volume: f64,
    /// Per-candidate probe timeout when resolving sources (1-120).
    pub probe_timeout_secs: u32,
    /// Restart the track from the beginning when it ends.
    pub looping: bool,
    /// Ordered list of candidate media locations.
    pub sources: Vec<String>,
}

impl AudioConfig {
    pub fn fade_tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.fade_tick_ms))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.probe_timeout_secs))
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            fade_step: 0.05,
            fade_tick_ms: 50,
            start_volume: 1.0,
            probe_timeout_secs: 10,
            looping: true,
            sources: DEFAULT_AUDIO_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
