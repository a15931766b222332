//! Test doubles shared by the unit tests of this crate.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use envelope_common::{DispatchError, Event, PlaybackError, StoreError};
use futures_util::future::{self, FutureExt};
use tokio::sync::broadcast;
use tracing::subscriber::DefaultGuard;

use crate::audio::{AudioChannel, PlaybackStart};
use crate::dispatch::{EventDispatcher, TrackingEvent};
use crate::lock;
use crate::store::FlagStore;

/// Collects every event currently queued on a receiver.
pub(crate) fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Formatted log output of the current thread, for asserting on what was
/// reported. Tasks of a current-thread runtime log into it too.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub(crate) fn install(&self) -> DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.0)).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.0).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) struct CountingDispatcher {
    calls: AtomicUsize,
    last: Mutex<Option<TrackingEvent>>,
    fail: bool,
}

impl CountingDispatcher {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
            fail: false,
        }
    }

    /// Every dispatch fails as if the network were unreachable.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_event(&self) -> Option<TrackingEvent> {
        lock(&self.last).clone()
    }
}

#[async_trait]
impl EventDispatcher for CountingDispatcher {
    async fn dispatch(&self, event: &TrackingEvent) -> Result<(), DispatchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last) = Some(event.clone());
        if self.fail {
            Err(DispatchError::Transport("network unreachable".into()))
        } else {
            Ok(())
        }
    }
}

/// A flag store whose backing storage is gone.
pub(crate) struct FailingStore;

impl FlagStore for FailingStore {
    fn is_set(&self, _key: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    fn set(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only storage",
        )))
    }
}

/// Audio channel that records everything done to it.
#[derive(Debug)]
pub(crate) struct RecordingAudio {
    pub volume: f64,
    pub playing: bool,
    pub position_ms: u64,
    pub starts: usize,
    pub pauses: usize,
    /// Every volume ever written, in order.
    pub volumes: Vec<f64>,
    /// When set, `start` resolves to this error instead of playing.
    pub start_error: Option<PlaybackError>,
}

impl Default for RecordingAudio {
    fn default() -> Self {
        Self {
            volume: 1.0,
            playing: false,
            position_ms: 0,
            starts: 0,
            pauses: 0,
            volumes: Vec::new(),
            start_error: None,
        }
    }
}

impl RecordingAudio {
    pub(crate) fn shared() -> Arc<Mutex<RecordingAudio>> {
        Arc::new(Mutex::new(RecordingAudio::default()))
    }
}

impl AudioChannel for RecordingAudio {
    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        self.volumes.push(volume);
    }

    fn start(&mut self) -> PlaybackStart {
        self.starts += 1;
        if let Some(err) = self.start_error.clone() {
            return future::ready(Err(err)).boxed();
        }
        self.playing = true;
        // Pretend some of the track has already played.
        self.position_ms = 1_500;
        future::ready(Ok(())).boxed()
    }

    fn pause(&mut self) {
        self.playing = false;
        self.pauses += 1;
    }

    fn rewind(&mut self) {
        self.position_ms = 0;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
