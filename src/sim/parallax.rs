//! Skyline parallax scroller for the racer background
//!
//! Two layers share one element type: a slow dim layer and a fast glowing
//! layer, told apart only by their speed factor. Elements are never removed;
//! they wrap back to the top at a fresh horizontal position.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::state::Extent;
use crate::consts::{FAR_LAYER_FACTOR, GLOW_FACTOR_THRESHOLD, NEAR_LAYER_FACTOR};

/// A background building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxElement {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Multiplier on the base scroll speed
    pub speed_factor: f32,
}

impl ParallaxElement {
    /// Fast-layer elements render with glow and lit windows
    #[inline]
    pub fn glows(&self) -> bool {
        self.speed_factor > GLOW_FACTOR_THRESHOLD
    }
}

/// Uniform sample in `[0, max)`, or 0 for an empty span
fn span<R: Rng>(rng: &mut R, max: f32) -> f32 {
    if max > 0.0 { rng.random_range(0.0..max) } else { 0.0 }
}

/// The full parallax population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skyline {
    pub elements: Vec<ParallaxElement>,
}

impl Skyline {
    /// Scatter both layers over the surface
    pub fn populate<R: Rng>(extent: Extent, far_count: usize, near_count: usize, rng: &mut R) -> Self {
        let mut elements = Vec::with_capacity(far_count + near_count);

        for _ in 0..far_count {
            let width = rng.random_range(40.0..100.0);
            let height = rng.random_range(100.0..250.0);
            let lightness = rng.random_range(10.0..30.0);
            elements.push(ParallaxElement {
                pos: Vec2::new(span(rng, extent.width), span(rng, extent.height)),
                size: Vec2::new(width, height),
                color: Color::hsl(rng.random_range(220.0..280.0), 60.0, lightness),
                speed_factor: FAR_LAYER_FACTOR,
            });
        }

        for _ in 0..near_count {
            let width = rng.random_range(50.0..130.0);
            let height = rng.random_range(150.0..350.0);
            elements.push(ParallaxElement {
                pos: Vec2::new(span(rng, extent.width), span(rng, extent.height)),
                size: Vec2::new(width, height),
                color: Color::hsl(rng.random_range(0.0..360.0), 80.0, 50.0),
                speed_factor: NEAR_LAYER_FACTOR,
            });
        }

        Self { elements }
    }

    /// Scroll every element down; wrap the ones past the bottom edge
    pub fn scroll<R: Rng>(&mut self, base_speed: f32, extent: Extent, rng: &mut R) {
        for el in &mut self.elements {
            el.pos.y += base_speed * el.speed_factor;
            if el.pos.y > extent.height {
                el.pos.y = -el.size.y;
                el.pos.x = span(rng, extent.width);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::seeded_rng;
    use proptest::prelude::*;

    #[test]
    fn test_populate_layers() {
        let mut rng = seeded_rng(1);
        let skyline = Skyline::populate(Extent::new(800.0, 600.0), 20, 15, &mut rng);
        assert_eq!(skyline.len(), 35);
        assert_eq!(skyline.elements.iter().filter(|e| e.glows()).count(), 15);
        for el in &skyline.elements {
            assert!(el.pos.x >= 0.0 && el.pos.x < 800.0);
            assert!(el.pos.y >= 0.0 && el.pos.y < 600.0);
        }
    }

    #[test]
    fn test_scroll_speed_factor() {
        let mut rng = seeded_rng(2);
        let mut skyline = Skyline::populate(Extent::new(800.0, 600.0), 1, 1, &mut rng);
        skyline.elements[0].pos.y = 0.0;
        skyline.elements[1].pos.y = 0.0;
        skyline.scroll(10.0, Extent::new(800.0, 600.0), &mut rng);
        assert!((skyline.elements[0].pos.y - 2.0).abs() < 1e-5);
        assert!((skyline.elements[1].pos.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_wraps_to_top() {
        let extent = Extent::new(800.0, 600.0);
        let mut rng = seeded_rng(3);
        let mut skyline = Skyline::populate(extent, 1, 0, &mut rng);
        skyline.elements[0].pos.y = 599.0;
        skyline.scroll(10.0, extent, &mut rng);
        let el = &skyline.elements[0];
        assert_eq!(el.pos.y, -el.size.y);
        assert!(el.pos.x >= 0.0 && el.pos.x < 800.0);
    }

    proptest! {
        #[test]
        fn prop_never_destroyed(seed in any::<u64>(), ticks in 1usize..500, speed in 0.0f32..30.0) {
            let extent = Extent::new(640.0, 480.0);
            let mut rng = seeded_rng(seed);
            let mut skyline = Skyline::populate(extent, 20, 15, &mut rng);
            for _ in 0..ticks {
                skyline.scroll(speed, extent, &mut rng);
            }
            prop_assert_eq!(skyline.len(), 35);
            for el in &skyline.elements {
                prop_assert!(el.pos.y <= extent.height);
            }
        }
    }
}
