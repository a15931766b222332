//! Transient toast derived from the tracking status.
//!
//! Nothing is shown while the status is `Idle` or `Sending`. On `Success`
//! or `Error` the toast appears and a timer forces the status back to
//! `Idle`, which in turn hides it. A new terminal status while the timer is
//! pending replaces the timer.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use envelope_common::{Event, EventBus, Toast, ToastLevel, TrackingStatus};
use envelope_config::schema::ToastConfig;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::lock;
use crate::timer::ScheduledTask;
use crate::tracker::TrackingStatusCell;

#[derive(Default)]
struct ToastState {
    current: Option<Toast>,
    timer: Option<ScheduledTask>,
}

pub struct ToastNotifier {
    state: Arc<Mutex<ToastState>>,
    watcher: JoinHandle<()>,
}

impl ToastNotifier {
    /// Start observing `status`.
    pub fn spawn(status: TrackingStatusCell, config: &ToastConfig, bus: Arc<EventBus>) -> Self {
        let state = Arc::new(Mutex::new(ToastState::default()));
        let observer = Observer {
            state: Arc::downgrade(&state),
            status: status.clone(),
            bus,
            ttl: config.duration(),
            success_message: config.success_message.clone(),
            error_message: config.error_message.clone(),
        };

        let mut rx = status.subscribe();
        let watcher = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let (current, generation) = observer.status.snapshot();
                if !observer.observe(current, generation) {
                    break;
                }
            }
        });

        Self { state, watcher }
    }

    /// The toast currently on screen, if any.
    pub fn current(&self) -> Option<Toast> {
        lock(&self.state).current.clone()
    }

    /// Stop observing and cancel a pending auto-clear.
    pub fn shutdown(&self) {
        self.watcher.abort();
        lock(&self.state).timer = None;
    }
}

impl Drop for ToastNotifier {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

struct Observer {
    state: Weak<Mutex<ToastState>>,
    status: TrackingStatusCell,
    bus: Arc<EventBus>,
    ttl: Duration,
    success_message: String,
    error_message: String,
}

impl Observer {
    /// Returns `false` once the notifier is gone.
    fn observe(&self, status: TrackingStatus, generation: u64) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let mut state = lock(&state);

        match ToastLevel::for_status(status) {
            Some(level) => {
                let message = match level {
                    ToastLevel::Success => &self.success_message,
                    ToastLevel::Error => &self.error_message,
                };
                debug!(?level, "showing toast");
                state.current = Some(Toast::new(level, message.clone(), self.ttl));
                self.bus.publish(Event::ToastShown {
                    message: message.clone(),
                });

                // A status written after this one owns the toast now.
                let status = self.status.clone();
                state.timer = Some(ScheduledTask::once(self.ttl, move || {
                    if !status.set_if_unchanged(generation, TrackingStatus::Idle) {
                        debug!("stale toast timer skipped");
                    }
                }));
            }
            None => {
                state.timer = None;
                if state.current.take().is_some() {
                    debug!("toast cleared");
                    self.bus.publish(Event::ToastCleared);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::drain;
    use tokio::time::sleep;

    fn setup() -> (TrackingStatusCell, ToastNotifier, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new(64));
        let status = TrackingStatusCell::new(Arc::clone(&bus));
        let notifier = ToastNotifier::spawn(status.clone(), &ToastConfig::default(), bus.clone());
        (status, notifier, bus)
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_shown_while_sending() {
        let (status, notifier, _bus) = setup();
        status.set(TrackingStatus::Sending);
        sleep(Duration::from_millis(10)).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn success_toast_auto_clears() {
        let (status, notifier, bus) = setup();
        let mut rx = bus.subscribe();

        status.set(TrackingStatus::Success);
        sleep(Duration::from_millis(10)).await;
        let toast = notifier.current().expect("toast shown");
        assert_eq!(toast.level, ToastLevel::Success);
        assert_eq!(toast.message, "Response has been recorded. Thank you!");

        sleep(Duration::from_millis(4980)).await;
        assert!(notifier.current().is_some());
        assert_eq!(status.get(), TrackingStatus::Success);

        sleep(Duration::from_millis(20)).await;
        assert!(notifier.current().is_none());
        assert_eq!(status.get(), TrackingStatus::Idle);

        let events = drain(&mut rx);
        assert!(events.contains(&Event::ToastCleared));
        assert!(events.iter().any(|e| matches!(e, Event::ToastShown { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn error_toast_uses_error_message() {
        let (status, notifier, _bus) = setup();
        status.set(TrackingStatus::Error);
        sleep(Duration::from_millis(10)).await;
        let toast = notifier.current().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.starts_with("Could not record visit"));
    }

    #[tokio::test(start_paused = true)]
    async fn new_terminal_status_restarts_timer() {
        let (status, notifier, _bus) = setup();
        status.set(TrackingStatus::Success);
        sleep(Duration::from_millis(3000)).await;

        status.set(TrackingStatus::Success);
        sleep(Duration::from_millis(3000)).await;
        // 6s after the first toast, 3s after the second.
        assert!(notifier.current().is_some());
        assert_eq!(status.get(), TrackingStatus::Success);

        sleep(Duration::from_millis(2100)).await;
        assert!(notifier.current().is_none());
        assert_eq!(status.get(), TrackingStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn status_set_at_timer_deadline_survives() {
        let (status, notifier, _bus) = setup();
        status.set(TrackingStatus::Success);
        sleep(Duration::from_millis(10)).await;

        // Wake on the first timer's deadline, racing it with a fresh result.
        sleep(Duration::from_millis(4990)).await;
        status.set(TrackingStatus::Success);
        sleep(Duration::from_millis(10)).await;

        assert_eq!(status.get(), TrackingStatus::Success);
        assert!(notifier.current().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_auto_clear() {
        let (status, notifier, _bus) = setup();
        status.set(TrackingStatus::Error);
        sleep(Duration::from_millis(10)).await;

        notifier.shutdown();
        sleep(Duration::from_millis(6000)).await;
        assert_eq!(status.get(), TrackingStatus::Error);
    }
}
