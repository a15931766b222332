//! Open/close state machine for the invitation.
//!
//! The public [`RevealState`] has three values. Internally the visible
//! state is split in two so the card view can hide the moment a close is
//! requested while the envelope itself only collapses after the delay:
//!
//! ```text
//!   Hidden --open--> Revealing --settle--> Shown --close--> Collapsing --collapse--> Hidden
//!                        ^                                       |
//!                        +-----------------open------------------+
//! ```
//!
//! `Shown` and `Collapsing` both report `RevealState::Visible`.


use std::sync::{Arc, Mutex};
use std::time::Duration;

use envelope_common::{Event, EventBus, RevealState};
use envelope_config::EnvelopeConfig;
use tracing::{debug, error, info};

use crate::audio::{AudioFader, SharedAudio};
use crate::lock;
use crate::particles::{Particle, ParticleGenerator};
use crate::timer::ScheduledTask;
use crate::tracker::ClickTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hidden,
    Revealing,
    Shown,
    Collapsing,
}

impl Phase {
    fn reveal_state(self) -> RevealState {
        match self {
            Phase::Hidden => RevealState::Hidden,
            Phase::Revealing => RevealState::Revealing,
            Phase::Shown | Phase::Collapsing => RevealState::Visible,
        }
    }

    fn card_visible(self) -> bool {
        self == Phase::Shown
    }
}

struct Inner {
    phase: Phase,
    particles: Vec<Particle>,
    fader: AudioFader,
    settle: Option<ScheduledTask>,
    collapse: Option<ScheduledTask>,
}

impl Inner {
    /// Move to `next`, publishing whatever became observably different.
    fn transition(&mut self, bus: &EventBus, next: Phase) {
        let prev = self.phase;
        self.phase = next;
        if next == Phase::Hidden {
            self.particles.clear();
        }

        debug!(?prev, ?next, "reveal transition");
        if prev.reveal_state() != next.reveal_state() {
            bus.publish(Event::RevealChanged(next.reveal_state()));
        }
        if prev.card_visible() != next.card_visible() {
            bus.publish(Event::CardVisibility(next.card_visible()));
        }
    }
}

/// Coordinates the reveal, tracking, and audio for the single invitation.
pub struct RevealController {
    inner: Arc<Mutex<Inner>>,
    audio: SharedAudio,
    tracker: Option<ClickTracker>,
    generator: ParticleGenerator,
    bus: Arc<EventBus>,
    settle_delay: Duration,
    collapse_delay: Duration,
    start_volume: f64,
}

impl RevealController {
    /// `tracker` is `None` when tracking is disabled.
    pub fn new(
        config: &EnvelopeConfig,
        audio: SharedAudio,
        tracker: Option<ClickTracker>,
        bus: Arc<EventBus>,
    ) -> Self {
        let inner = Inner {
            phase: Phase::Hidden,
            particles: Vec::new(),
            fader: AudioFader::new(Arc::clone(&audio), &config.audio),
            settle: None,
            collapse: None,
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            audio,
            tracker,
            generator: ParticleGenerator::new(&config.particles),
            bus,
            settle_delay: config.reveal.settle_delay(),
            collapse_delay: config.reveal.collapse_delay(),
            start_volume: config.audio.start_volume,
        }
    }

    pub fn state(&self) -> RevealState {
        lock(&self.inner).phase.reveal_state()
    }

    pub fn is_card_visible(&self) -> bool {
        lock(&self.inner).phase.card_visible()
    }

    /// The current burst; empty while hidden.
    pub fn particles(&self) -> Vec<Particle> {
        lock(&self.inner).particles.clone()
    }

    pub fn generator(&self) -> &ParticleGenerator {
        &self.generator
    }

    /// Open the envelope.
    ///
    /// Accepted from `Hidden`, and during a close's collapse window where it
    /// re-opens and preempts the fade-out. Returns `false` when ignored
    /// because the envelope is already revealing or shown.
    pub fn activate_open(&self) -> bool {
        let mut inner = lock(&self.inner);
        match inner.phase {
            Phase::Hidden => {}
            Phase::Collapsing => {
                inner.collapse = None;
                debug!("re-opened during collapse");
            }
            Phase::Revealing | Phase::Shown => {
                debug!("open ignored, already {}", inner.phase.reveal_state());
                return false;
            }
        }

        info!("envelope opened");
        inner.particles = self.generator.generate();
        inner.transition(&self.bus, Phase::Revealing);
        self.bus.publish(Event::ParticlesBurst(inner.particles.len()));

        inner.fader.cancel();
        if let Some(tracker) = &self.tracker {
            tracker.track();
        }

        let weak = Arc::downgrade(&self.inner);
        let bus = Arc::clone(&self.bus);
        inner.settle = Some(ScheduledTask::once(self.settle_delay, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = lock(&inner);
            if inner.phase == Phase::Revealing {
                inner.transition(&bus, Phase::Shown);
            }
        }));
        drop(inner);

        self.start_playback();
        true
    }

    /// Close the card.
    ///
    /// Only accepted while the card is shown. Hides the card immediately,
    /// fades the audio out and returns to `Hidden` after the collapse delay.
    pub fn activate_close(&self) -> bool {
        let mut inner = lock(&self.inner);
        if inner.phase != Phase::Shown {
            debug!("close ignored in {:?}", inner.phase);
            return false;
        }

        info!("invitation closed");
        inner.transition(&self.bus, Phase::Collapsing);

        let from = lock(&*self.audio).volume();
        inner.fader.start_fade(from);

        let weak = Arc::downgrade(&self.inner);
        let bus = Arc::clone(&self.bus);
        inner.collapse = Some(ScheduledTask::once(self.collapse_delay, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = lock(&inner);
            if inner.phase == Phase::Collapsing {
                inner.transition(&bus, Phase::Hidden);
            }
        }));
        true
    }

    /// Cancel every pending timer and any running fade.
    pub fn shutdown(&self) {
        let mut inner = lock(&self.inner);
        inner.settle = None;
        inner.collapse = None;
        inner.fader.cancel();
        debug!("reveal controller shut down");
    }

    /// Ask the channel to play from the configured volume. Failures never
    /// block the reveal; interruptions are expected and stay quiet.
    fn start_playback(&self) {
        let start = {
            let mut channel = lock(&*self.audio);
            channel.set_volume(self.start_volume);
            channel.start()
        };

        tokio::spawn(async move {
            match start.await {
                Ok(()) => debug!("playback started"),
                Err(e) if e.is_interruption() => {}
                Err(e) => error!("audio playback failed: {e}"),
            }
        });
    }
}
