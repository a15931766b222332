//! The single ambient audio channel and its fade-out.

mod fader;

pub use fader::AudioFader;

use std::sync::{Arc, Mutex};

use envelope_common::PlaybackError;
use futures_util::future::BoxFuture;

/// Resolves once playback has actually begun (or failed to).
pub type PlaybackStart = BoxFuture<'static, Result<(), PlaybackError>>;

/// A playback channel the controller drives.
///
/// Only one owner mutates the channel at a time: the controller while
/// opening, the fader while closing. Exclusion comes from cancelling the
/// fade before every start, the mutex only makes access sound.
pub trait AudioChannel: Send {
    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    /// (Re)load the sources and begin playing.
    ///
    /// A `pause` issued before the returned future resolves should make it
    /// resolve to [`PlaybackError::Interrupted`].
    fn start(&mut self) -> PlaybackStart;

    fn pause(&mut self);

    /// Seek back to the beginning. A channel with nothing loaded ignores it.
    fn rewind(&mut self);

    fn is_playing(&self) -> bool;
}

pub type SharedAudio = Arc<Mutex<dyn AudioChannel>>;
