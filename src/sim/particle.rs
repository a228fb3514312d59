//! Particle bursts and their integration
//!
//! Particles are purely visual: they never collide or score.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::*;

/// A short-lived spark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, decreases by [`PARTICLE_DECAY`] every tick
    pub life: f32,
    pub size: f32,
    pub color: Color,
}

impl Particle {
    /// Advance one tick
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.size *= PARTICLE_SHRINK;
        self.life = (self.life - PARTICLE_DECAY).max(0.0);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Build a burst of [`BURST_SIZE`] particles flying out of `origin`.
///
/// Each particle gets a uniformly random direction, a speed in
/// `[BURST_MIN_SPEED, BURST_MAX_SPEED)` and the source color.
pub fn burst<R: Rng>(origin: Vec2, color: Color, rng: &mut R) -> Vec<Particle> {
    (0..BURST_SIZE)
        .map(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(BURST_MIN_SPEED..BURST_MAX_SPEED);
            Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                size: rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE),
                color,
            }
        })
        .collect()
}

/// Step every particle and drop the spent ones (order preserved)
pub fn step_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.step();
    }
    particles.retain(|p| !p.is_dead());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::seeded_rng;
    use proptest::prelude::*;

    #[test]
    fn test_burst_shape() {
        let mut rng = seeded_rng(1);
        let color = Color::hsl(200.0, 90.0, 60.0);
        let origin = Vec2::new(10.0, 20.0);
        let particles = burst(origin, color, &mut rng);

        assert_eq!(particles.len(), BURST_SIZE);
        for p in &particles {
            assert_eq!(p.pos, origin);
            assert_eq!(p.color, color);
            assert_eq!(p.life, 1.0);
            let speed = p.vel.length();
            assert!(speed >= BURST_MIN_SPEED - 1e-4 && speed < BURST_MAX_SPEED + 1e-4);
        }
    }

    #[test]
    fn test_particle_expires_after_fifty_ticks() {
        let mut rng = seeded_rng(2);
        let mut particles = burst(Vec2::ZERO, Color::WHITE, &mut rng);
        let mut ticks = 0;
        while !particles.is_empty() {
            step_particles(&mut particles);
            ticks += 1;
            assert!(ticks <= 51, "particles should die after ~50 ticks");
        }
        assert!(ticks >= 49);
    }

    #[test]
    fn test_size_shrinks_multiplicatively() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 2.0),
            life: 1.0,
            size: 4.0,
            color: Color::WHITE,
        };
        p.step();
        assert_eq!(p.pos, Vec2::new(1.0, 2.0));
        assert!((p.size - 3.8).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_life_strictly_decreasing_and_bounded(seed in any::<u64>(), ticks in 1usize..80) {
            let mut rng = seeded_rng(seed);
            let mut particles = burst(Vec2::ZERO, Color::WHITE, &mut rng);
            for _ in 0..ticks {
                let before: Vec<f32> = particles.iter().map(|p| p.life).collect();
                step_particles(&mut particles);
                // Bursts share a birth tick, so survivors keep their index
                for (p, old) in particles.iter().zip(before) {
                    prop_assert!(p.life > 0.0 && p.life <= 1.0);
                    prop_assert!((old - p.life - PARTICLE_DECAY).abs() < 1e-5);
                }
                prop_assert!(particles.iter().all(|p| !p.is_dead()));
            }
        }
    }
}
