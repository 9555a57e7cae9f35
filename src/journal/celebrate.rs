//! Celebration burst played when a memory is saved

use rand::Rng;
use serde::Serialize;

/// Particle palette
pub const CONFETTI_COLORS: [&str; 5] = ["#ff9ff3", "#feca57", "#ff6b6b", "#48dbfb", "#1dd1a1"];

/// Particles per burst
pub const BURST_SIZE: usize = 20;

/// How long a particle lives before it is removed, in milliseconds
pub const PARTICLE_LIFETIME_MS: u64 = 5_000;

/// A single confetti particle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub color: &'static str,
    /// Horizontal start position in viewport-width units, `[0, 100)`
    pub left_vw: f64,
    /// Fall animation length in seconds, `[2, 5)`
    pub fall_secs: f64,
    /// Total spin while falling, in degrees, `[0, 720)`
    pub spin_deg: f64,
    pub size_px: u32,
    pub opacity: f64,
}

/// A burst of particles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub lifetime_ms: u64,
}

impl Celebration {
    pub fn burst<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let particles = (0..BURST_SIZE)
            .map(|_| Particle {
                color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
                left_vw: rng.random_range(0.0..100.0),
                fall_secs: rng.random_range(2.0..5.0),
                spin_deg: rng.random_range(0.0..720.0),
                size_px: 10,
                opacity: 0.8,
            })
            .collect();

        Self {
            particles,
            lifetime_ms: PARTICLE_LIFETIME_MS,
        }
    }
}
