//! Reveal and toast timing validation.

use crate::schema::EnvelopeConfig;

use super::helpers::validate_range;

/// Validate settle and collapse delays.
pub(crate) fn validate_reveal(errors: &mut Vec<String>, config: &EnvelopeConfig) {
    validate_range(
        errors,
        "reveal.settle_delay_ms",
        config.reveal.settle_delay_ms,
        0,
        10_000,
    );
    validate_range(
        errors,
        "reveal.collapse_delay_ms",
        config.reveal.collapse_delay_ms,
        0,
        10_000,
    );
}

/// Validate toast lifetime.
pub(crate) fn validate_toast(errors: &mut Vec<String>, config: &EnvelopeConfig) {
    validate_range(
        errors,
        "toast.duration_ms",
        config.toast.duration_ms,
        100,
        60_000,
    );
}
