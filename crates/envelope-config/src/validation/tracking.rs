//! Tracking endpoint and flag key validation.

use crate::schema::EnvelopeConfig;

use super::helpers::{validate_http_url, validate_non_empty, validate_range};

/// Only checked when tracking is enabled; a disabled tracker never reads them.
pub(crate) fn validate_tracking(errors: &mut Vec<String>, config: &EnvelopeConfig) {
    let tracking = &config.tracking;
    if !tracking.enabled {
        return;
    }

    validate_http_url(errors, "tracking.endpoint", &tracking.endpoint);
    validate_non_empty(errors, "tracking.event_name", &tracking.event_name);
    validate_range(errors, "tracking.timeout_secs", tracking.timeout_secs, 1, 120);

    let key_ok = !tracking.flag_key.is_empty()
        && tracking
            .flag_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !tracking.flag_key.starts_with('.');
    if !key_ok {
        errors.push(format!(
            "tracking.flag_key = {:?} must be non-empty and use only [A-Za-z0-9_.-]",
            tracking.flag_key
        ));
    }
}
