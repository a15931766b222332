//! Audio fade and source list validation.

use crate::schema::EnvelopeConfig;

use super::helpers::{validate_http_url, validate_positive_f64, validate_range, validate_range_f64};

pub(crate) fn validate_audio(errors: &mut Vec<String>, config: &EnvelopeConfig) {
    let audio = &config.audio;
    validate_positive_f64(errors, "audio.fade_step", audio.fade_step, 1.0);
    validate_range(errors, "audio.fade_tick_ms", audio.fade_tick_ms, 1, 1000);
    validate_range_f64(errors, "audio.start_volume", audio.start_volume, 0.0, 1.0);
    validate_range(
        errors,
        "audio.probe_timeout_secs",
        audio.probe_timeout_secs,
        1,
        120,
    );

    if audio.sources.is_empty() {
        errors.push("audio.sources must list at least one candidate".into());
    }
    for (i, source) in audio.sources.iter().enumerate() {
        validate_http_url(errors, &format!("audio.sources[{i}]"), source);
    }
}
