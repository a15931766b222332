use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{RevealState, TrackingStatus};

/// Everything observable about the invitation, one event per transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    RevealChanged(RevealState),
    CardVisibility(bool),
    TrackingChanged(TrackingStatus),
    ParticlesBurst(usize),
    ToastShown { message: String },
    ToastCleared,
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        match self.sender.send(event) {
            Ok(n) => n,
            Err(e) => {
                tracing::trace!("no subscribers for {:?}", e.0);
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
