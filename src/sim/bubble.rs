//! Bubble entity: spawning and per-tick physics

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::state::Extent;
use crate::consts::{BUBBLE_LIGHTNESS, BUBBLE_SATURATION};
use crate::tuning::RealmTuning;

/// A rising, poppable bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Rise speed (units per tick)
    pub speed: f32,
    /// Wobble phase offset (radians)
    pub phase: f32,
    pub color: Color,
    /// Fades in from 0 to 1
    pub opacity: f32,
}

impl Bubble {
    /// Create a bubble just below the bottom edge with randomized attributes
    pub fn spawn<R: Rng>(id: u32, extent: Extent, tuning: &RealmTuning, rng: &mut R) -> Self {
        let radius = rng.random_range(tuning.radius_min..tuning.radius_max);
        let x = if extent.width > 0.0 {
            rng.random_range(0.0..extent.width)
        } else {
            0.0
        };
        Self {
            id,
            pos: Vec2::new(x, extent.height + radius),
            radius,
            speed: rng.random_range(tuning.speed_min..tuning.speed_max),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            color: Color::random_in_band(
                rng,
                tuning.hue_min,
                tuning.hue_max,
                BUBBLE_SATURATION,
                BUBBLE_LIGHTNESS,
            ),
            opacity: 0.0,
        }
    }

    /// Advance one tick: rise, wobble, get pushed by the pointer, fade in
    pub fn step(&mut self, frame: u64, pointer: Option<Vec2>, tuning: &RealmTuning) {
        self.pos.y -= self.speed;
        self.pos.x +=
            (frame as f32 * tuning.wobble_frequency + self.phase).sin() * tuning.wobble_amplitude;

        if let Some(pointer) = pointer {
            let away = self.pos - pointer;
            let dist = away.length();
            if dist < tuning.repulsion_radius {
                // Dead-center pointer pushes right
                let dir = if dist > 0.0 { away / dist } else { Vec2::X };
                self.pos += dir * (tuning.repulsion_radius - dist) * tuning.repulsion_strength;
            }
        }

        if self.opacity < 1.0 {
            self.opacity = (self.opacity + tuning.fade_in_step).min(1.0);
        }
    }

    /// Risen past the top edge by more than its diameter
    #[inline]
    pub fn is_gone(&self) -> bool {
        self.pos.y < -self.radius * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::seeded_rng;

    fn still_tuning() -> RealmTuning {
        RealmTuning {
            wobble_amplitude: 0.0,
            ..RealmTuning::default()
        }
    }

    #[test]
    fn test_spawn_attributes_in_range() {
        let tuning = RealmTuning::default();
        let extent = Extent::new(400.0, 300.0);
        let mut rng = seeded_rng(11);
        for id in 0..200 {
            let b = Bubble::spawn(id, extent, &tuning, &mut rng);
            assert!(b.radius >= 15.0 && b.radius < 35.0);
            assert!(b.speed >= 0.5 && b.speed < 2.0);
            assert!((180.0..220.0).contains(&b.color.h));
            assert!(b.pos.x >= 0.0 && b.pos.x < 400.0);
            assert_eq!(b.pos.y, 300.0 + b.radius);
            assert_eq!(b.opacity, 0.0);
        }
    }

    #[test]
    fn test_rises_without_forces() {
        let tuning = still_tuning();
        let mut b = Bubble::spawn(1, Extent::new(100.0, 100.0), &tuning, &mut seeded_rng(1));
        let start = b.pos;
        b.step(0, None, &tuning);
        assert_eq!(b.pos.x, start.x);
        assert!((b.pos.y - (start.y - b.speed)).abs() < 1e-5);
    }

    #[test]
    fn test_pointer_pushes_away() {
        let tuning = still_tuning();
        let mut b = Bubble::spawn(1, Extent::new(100.0, 100.0), &tuning, &mut seeded_rng(1));
        b.speed = 0.0;
        b.pos = Vec2::new(50.0, 50.0);
        // Pointer 40 units to the left: push of (100 - 40) * 0.05 = 3 to the right
        b.step(0, Some(Vec2::new(10.0, 50.0)), &tuning);
        assert!((b.pos.x - 53.0).abs() < 1e-4);
        assert!((b.pos.y - 50.0).abs() < 1e-4);

        // Outside the radius: no push
        b.step(0, Some(Vec2::new(500.0, 50.0)), &tuning);
        assert!((b.pos.x - 53.0).abs() < 1e-4);
    }

    #[test]
    fn test_opacity_saturates() {
        let tuning = still_tuning();
        let mut b = Bubble::spawn(1, Extent::new(100.0, 100.0), &tuning, &mut seeded_rng(1));
        for _ in 0..60 {
            b.step(0, None, &tuning);
        }
        assert_eq!(b.opacity, 1.0);
    }
}
