//! Time-stepped volume ramp that stops playback when it reaches silence.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use envelope_config::schema::AudioConfig;
use tracing::debug;

use super::SharedAudio;
use crate::lock;
use crate::timer::ScheduledTask;

/// Drives at most one fade session on the shared channel.
pub struct AudioFader {
    audio: SharedAudio,
    step: f64,
    tick: Duration,
    session: Option<ScheduledTask>,
}

impl AudioFader {
    pub fn new(audio: SharedAudio, config: &AudioConfig) -> Self {
        Self {
            audio,
            step: config.fade_step,
            tick: config.fade_tick(),
            session: None,
        }
    }

    /// Start fading out from `from`, cancelling any session already running.
    ///
    /// Each tick removes one step while the volume is above a step; the
    /// tick after that snaps to zero, pauses and rewinds, and ends the
    /// session. From full volume that is `ceil(1 / step)` ticks.
    pub fn start_fade(&mut self, from: f64) {
        self.cancel();

        let audio = Arc::clone(&self.audio);
        let step = self.step;
        let mut volume = from.clamp(0.0, 1.0);
        debug!(from = volume, step, "starting fade-out");

        self.session = Some(ScheduledTask::every(self.tick, move || {
            let mut channel = lock(&*audio);
            if volume > step {
                volume = quantize(volume - step);
                channel.set_volume(volume);
                ControlFlow::Continue(())
            } else {
                channel.set_volume(0.0);
                channel.pause();
                channel.rewind();
                debug!("fade-out complete, playback stopped");
                ControlFlow::Break(())
            }
        }));
    }

    /// Stop the running session, leaving volume and playback as they are.
    ///
    /// Returns `true` if a session was still running.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                let was_running = !session.is_finished();
                session.cancel();
                if was_running {
                    debug!("fade-out cancelled");
                }
                was_running
            }
            None => false,
        }
    }
}

/// Rounds away float drift so repeated subtraction lands exactly on
/// multiples of the step.
fn quantize(volume: f64) -> f64 {
    ((volume * 1e6).round() / 1e6).max(0.0)
}
