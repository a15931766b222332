//! At-most-once analytics ping per device.
//!
//! The persisted flag is written before the dispatch is issued, so rapid
//! repeated activations or a crash mid-request can never produce a second
//! send. A failed dispatch is not retried: the flag stays set and later
//! activations report success from the flag.

use std::sync::{Arc, Mutex};

use envelope_common::{new_correlation_id, Event, EventBus, TrackingStatus};
use envelope_config::schema::TrackingConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::dispatch::{EventDispatcher, TrackingEvent};
use crate::lock;
use crate::store::FlagStore;

/// The process-wide `TrackingStatus`, observable through a watch channel
/// and mirrored onto the event bus.
///
/// Every write bumps a generation so a delayed writer can tell whether the
/// value it saw has since been replaced.
#[derive(Clone)]
pub struct TrackingStatusCell {
    tx: Arc<watch::Sender<TrackingStatus>>,
    generation: Arc<Mutex<u64>>,
    bus: Arc<EventBus>,
}

impl TrackingStatusCell {
    pub fn new(bus: Arc<EventBus>) -> Self {
        let (tx, _) = watch::channel(TrackingStatus::Idle);
        Self {
            tx: Arc::new(tx),
            generation: Arc::new(Mutex::new(0)),
            bus,
        }
    }

    pub fn get(&self) -> TrackingStatus {
        *self.tx.borrow()
    }

    /// The current status together with the generation that wrote it.
    pub fn snapshot(&self) -> (TrackingStatus, u64) {
        let generation = lock(&self.generation);
        (*self.tx.borrow(), *generation)
    }

    /// Publishes `status`, notifying watchers even if it did not change.
    pub fn set(&self, status: TrackingStatus) {
        let mut generation = lock(&self.generation);
        *generation += 1;
        self.publish(status);
    }

    /// Publishes `status` only if nothing was written since `generation`.
    pub fn set_if_unchanged(&self, generation: u64, status: TrackingStatus) -> bool {
        let mut current = lock(&self.generation);
        if *current != generation {
            return false;
        }
        *current += 1;
        self.publish(status);
        true
    }

    fn publish(&self, status: TrackingStatus) {
        self.tx.send_replace(status);
        self.bus.publish(Event::TrackingChanged(status));
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackingStatus> {
        self.tx.subscribe()
    }
}

#[derive(Clone)]
pub struct ClickTracker {
    store: Arc<dyn FlagStore>,
    dispatcher: Arc<dyn EventDispatcher>,
    status: TrackingStatusCell,
    flag_key: String,
    event: TrackingEvent,
}

impl ClickTracker {
    pub fn new(
        store: Arc<dyn FlagStore>,
        dispatcher: Arc<dyn EventDispatcher>,
        status: TrackingStatusCell,
        config: &TrackingConfig,
    ) -> Self {
        Self {
            store,
            dispatcher,
            status,
            flag_key: config.flag_key.clone(),
            event: TrackingEvent::new(config.event_name.clone()),
        }
    }

    pub fn status(&self) -> &TrackingStatusCell {
        &self.status
    }

    /// Report this activation, dispatching the event only if this device
    /// has never been tracked.
    ///
    /// Returns the handle of the spawned dispatch, or `None` when nothing
    /// was sent (already tracked, or the flag store failed).
    pub fn track(&self) -> Option<JoinHandle<()>> {
        match self.store.is_set(&self.flag_key) {
            Ok(true) => {
                info!("click already tracked for this device");
                self.status.set(TrackingStatus::Success);
                return None;
            }
            Ok(false) => {}
            Err(e) => {
                warn!("could not read tracking flag: {e}");
                self.status.set(TrackingStatus::Error);
                return None;
            }
        }

        // Without a persisted flag a later activation could send again.
        if let Err(e) = self.store.set(&self.flag_key) {
            warn!("could not persist tracking flag, not dispatching: {e}");
            self.status.set(TrackingStatus::Error);
            return None;
        }
        self.status.set(TrackingStatus::Sending);

        let dispatcher = Arc::clone(&self.dispatcher);
        let status = self.status.clone();
        let event = self.event.clone();
        let correlation = new_correlation_id();
        info!(%correlation, "sending tracking event");

        Some(tokio::spawn(async move {
            match dispatcher.dispatch(&event).await {
                Ok(()) => {
                    info!(%correlation, "tracking request sent");
                    status.set(TrackingStatus::Success);
                }
                Err(e) => {
                    error!(%correlation, "failed to send tracking request: {e}");
                    status.set(TrackingStatus::Error);
                }
            }
        }))
    }
}
