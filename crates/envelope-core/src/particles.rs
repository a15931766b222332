//! Randomized particle burst shown when the envelope opens.

use envelope_config::schema::ParticleConfig;
use rand::Rng;
use serde::Serialize;

/// One particle of the burst: where it flies to, its colour and when it starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub id: usize,
    /// Horizontal offset from the burst centre.
    pub dx: f64,
    /// Vertical offset from the burst centre.
    pub dy: f64,
    /// Index into [`ParticleGenerator::palette`].
    pub color_index: usize,
    pub delay_ms: u32,
}

/// Produces a fresh burst descriptor set on demand.
#[derive(Debug, Clone)]
pub struct ParticleGenerator {
    count: usize,
    half_spread: f64,
    max_delay_ms: u32,
    palette: Vec<String>,
}

impl ParticleGenerator {
    pub fn new(config: &ParticleConfig) -> Self {
        Self {
            count: config.count as usize,
            half_spread: config.spread / 2.0,
            max_delay_ms: config.max_delay_ms,
            palette: config.palette.clone(),
        }
    }

    /// Offsets fall in `[-half_spread, half_spread)`.
    pub fn half_spread(&self) -> f64 {
        self.half_spread
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Colour of a particle produced by this generator.
    pub fn color_of(&self, particle: &Particle) -> Option<&str> {
        self.palette.get(particle.color_index).map(String::as_str)
    }

    /// Generate a burst using the thread-local RNG.
    pub fn generate(&self) -> Vec<Particle> {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate a burst from the given randomness source.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Particle> {
        (0..self.count)
            .map(|id| Particle {
                id,
                dx: self.offset(rng),
                dy: self.offset(rng),
                color_index: if self.palette.is_empty() {
                    0
                } else {
                    rng.gen_range(0..self.palette.len())
                },
                delay_ms: if self.max_delay_ms == 0 {
                    0
                } else {
                    rng.gen_range(0..self.max_delay_ms)
                },
            })
            .collect()
    }

    fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.half_spread > 0.0 {
            rng.gen_range(-self.half_spread..self.half_spread)
        } else {
            0.0
        }
    }
}

impl Default for ParticleGenerator {
    fn default() -> Self {
        Self::new(&ParticleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_exactly_the_configured_count() {
        let generator = ParticleGenerator::default();
        for _ in 0..20 {
            assert_eq!(generator.generate().len(), 75);
        }
    }

    #[test]
    fn ids_are_ordinals() {
        let burst = ParticleGenerator::default().generate();
        for (i, p) in burst.iter().enumerate() {
            assert_eq!(p.id, i);
        }
    }

    #[test]
    fn values_stay_within_bounds() {
        let generator = ParticleGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            for p in generator.generate_with(&mut rng) {
                assert!((-300.0..300.0).contains(&p.dx), "dx out of range: {}", p.dx);
                assert!((-300.0..300.0).contains(&p.dy), "dy out of range: {}", p.dy);
                assert!(p.color_index < 4);
                assert!(p.delay_ms < 300);
                assert!(generator.color_of(&p).is_some());
            }
        }
    }

    #[test]
    fn colors_come_from_palette() {
        let config = ParticleConfig {
            palette: vec!["#123456".into()],
            ..ParticleConfig::default()
        };
        let generator = ParticleGenerator::new(&config);
        for p in generator.generate() {
            assert_eq!(generator.color_of(&p), Some("#123456"));
        }
    }

    #[test]
    fn bursts_differ_between_calls() {
        let generator = ParticleGenerator::default();
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn degenerate_config_does_not_panic() {
        let config = ParticleConfig {
            count: 3,
            spread: 0.0,
            max_delay_ms: 0,
            palette: Vec::new(),
        };
        let burst = ParticleGenerator::new(&config).generate();
        assert_eq!(burst.len(), 3);
        assert!(burst.iter().all(|p| p.dx == 0.0 && p.dy == 0.0 && p.delay_ms == 0));
    }
}
