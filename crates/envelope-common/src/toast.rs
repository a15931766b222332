use std::time::{Duration, Instant};

use crate::types::TrackingStatus;

/// Severity of the tracking toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    /// Maps a tracking status to the toast it produces, if any.
    pub fn for_status(status: TrackingStatus) -> Option<Self> {
        match status {
            TrackingStatus::Success => Some(ToastLevel::Success),
            TrackingStatus::Error => Some(ToastLevel::Error),
            TrackingStatus::Idle | TrackingStatus::Sending => None,
        }
    }
}

/// A transient, auto-dismissing status message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Time left before the toast is dismissed; zero once it has expired.
    pub fn remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.created_at.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_for_status() {
        assert_eq!(ToastLevel::for_status(TrackingStatus::Idle), None);
        assert_eq!(ToastLevel::for_status(TrackingStatus::Sending), None);
        assert_eq!(
            ToastLevel::for_status(TrackingStatus::Success),
            Some(ToastLevel::Success)
        );
        assert_eq!(
            ToastLevel::for_status(TrackingStatus::Error),
            Some(ToastLevel::Error)
        );
    }

    #[test]
    fn fresh_toast_has_time_left() {
        let toast = Toast::new(ToastLevel::Success, "thanks", Duration::from_secs(5));
        assert!(toast.remaining() > Duration::from_secs(4));
        assert!(toast.remaining() <= Duration::from_secs(5));
        assert_eq!(toast.message, "thanks");
    }

    #[test]
    fn zero_ttl_toast_has_no_time_left() {
        let toast = Toast::new(ToastLevel::Error, "oops", Duration::ZERO);
        assert_eq!(toast.remaining(), Duration::ZERO);
    }
}
