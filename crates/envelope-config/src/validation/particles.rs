//! Particle burst validation.

use crate::schema::EnvelopeConfig;

use super::helpers::{validate_positive_f64, validate_range};

pub(crate) fn validate_particles(errors: &mut Vec<String>, config: &EnvelopeConfig) {
    let particles = &config.particles;
    validate_range(errors, "particles.count", particles.count, 1, 1000);
    validate_positive_f64(errors, "particles.spread", particles.spread, 10_000.0);
    validate_range(
        errors,
        "particles.max_delay_ms",
        particles.max_delay_ms,
        0,
        10_000,
    );

    if particles.palette.is_empty() {
        errors.push("particles.palette must contain at least one colour".into());
    }
    for (i, color) in particles.palette.iter().enumerate() {
        if !is_hex_color(color) {
            errors.push(format!(
                "particles.palette[{i}] = {color:?} is not a #RRGGBB colour"
            ));
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
