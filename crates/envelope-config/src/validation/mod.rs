//! Full configuration validation.
//!
//! Validates all numeric ranges, URLs, palette colours and the flag key.
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod audio;
mod helpers;
mod particles;
mod timing;
mod tracking;


use crate::schema::EnvelopeConfig;
use envelope_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &EnvelopeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    timing::validate_reveal(&mut errors, config);
    timing::validate_toast(&mut errors, config);
    audio::validate_audio(&mut errors, config);
    particles::validate_particles(&mut errors, config);
    tracking::validate_tracking(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
