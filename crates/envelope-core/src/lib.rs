//! Interaction core for the invitation.
//!
//! Provides the pieces behind "open the envelope":
//! - `RevealController`: the open/close state machine
//! - `ClickTracker`: at-most-once analytics ping backed by a persisted flag
//! - `AudioFader`: cancellable, time-stepped volume ramp
//! - `ParticleGenerator`: the celebratory burst shown on each reveal
//! - `ToastNotifier`: transient status derived from the tracking outcome
//!
//! Everything here schedules work with `tokio::spawn`, so it must be driven
//! from inside a tokio runtime. A current-thread runtime is enough.

pub mod audio;
pub mod dispatch;
pub mod particles;
pub mod reveal;
pub mod store;
pub mod timer;
pub mod toast;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use audio::{AudioChannel, AudioFader, PlaybackStart, SharedAudio};
pub use dispatch::{EventDispatcher, HttpDispatcher, TrackingEvent};
pub use particles::{Particle, ParticleGenerator};
pub use reveal::RevealController;
pub use store::{FileFlagStore, FlagStore, MemoryFlagStore};
pub use timer::ScheduledTask;
pub use toast::ToastNotifier;
pub use tracker::{ClickTracker, TrackingStatusCell};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// None of the guarded state can be left half-updated by a panic, so the
/// poisoned value is still consistent.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
