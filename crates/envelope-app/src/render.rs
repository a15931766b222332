//! Text rendering of the invitation for the terminal front end.

use std::time::Duration;

use envelope_common::{Event, RevealState, Toast, TrackingStatus};
use envelope_core::{Particle, ParticleGenerator};

pub const HELP: &str = "commands: open, close, status, help, quit";

/// One line per observable transition. Bursts are rendered separately
/// because they need the particle set.
pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::RevealChanged(state) => Some(format!("[reveal] {state}")),
        Event::CardVisibility(true) => Some("[card] shown, `close` to put it away".into()),
        Event::CardVisibility(false) => Some("[card] hidden".into()),
        Event::TrackingChanged(TrackingStatus::Sending) => Some("[tracking] sending".into()),
        Event::TrackingChanged(_) => None,
        Event::ToastShown { message } => Some(format!("[toast] {message}")),
        Event::ToastCleared => Some("[toast] cleared".into()),
        Event::ParticlesBurst(_) | Event::Shutdown | Event::Unknown => None,
    }
}

/// Particle count per palette colour, in palette order.
pub fn burst_summary(particles: &[Particle], generator: &ParticleGenerator) -> String {
    let palette = generator.palette();
    let mut counts = vec![0usize; palette.len()];
    for colour in particles.iter().filter_map(|p| generator.color_of(p)) {
        if let Some(i) = palette.iter().position(|c| c == colour) {
            counts[i] += 1;
        }
    }

    let colours: Vec<String> = palette
        .iter()
        .zip(&counts)
        .map(|(colour, n)| format!("{colour} x{n}"))
        .collect();
    format!("[burst] {} particles: {}", particles.len(), colours.join(", "))
}

pub fn status_line(state: RevealState, card_visible: bool, tracking: TrackingStatus) -> String {
    let card = if card_visible { "shown" } else { "hidden" };
    format!("[status] reveal={state} card={card} tracking={tracking}")
}

pub fn audio_line(
    playing: bool,
    looping: bool,
    source: Option<&str>,
    position: Duration,
) -> String {
    let Some(source) = source else {
        return "[audio] nothing loaded".to_string();
    };
    let what = if playing { "playing" } else { "paused" };
    let repeat = if looping { " (looping)" } else { "" };
    format!(
        "[audio] {what} {source} at {:.1}s{repeat}",
        position.as_secs_f64()
    )
}

/// The toast on screen and how long it stays.
pub fn toast_line(toast: Option<&Toast>) -> String {
    match toast {
        Some(toast) => format!(
            "[toast] {} ({}s left)",
            toast.message,
            toast.remaining().as_secs_f64().ceil()
        ),
        None => "[toast] none".to_string(),
    }
}
