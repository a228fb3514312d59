//! HSL colors
//!
//! Entity colors are picked inside hue bands, so HSL is the native space.
//! The drawing surface takes CSS strings.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hue (degrees), saturation and lightness (percent), alpha (0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::hsl(0.0, 0.0, 100.0);
    pub const BLACK: Color = Color::hsl(0.0, 0.0, 0.0);

    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l, a: 1.0 }
    }

    pub const fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Same color with a different alpha (clamped to 0-1)
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Random hue in `[hue_min, hue_max)` at fixed saturation/lightness
    pub fn random_in_band<R: Rng>(
        rng: &mut R,
        hue_min: f32,
        hue_max: f32,
        s: f32,
        l: f32,
    ) -> Self {
        Self::hsl(rng.random_range(hue_min..hue_max), s, l)
    }

    /// CSS `hsla()` string
    pub fn to_css(&self) -> String {
        format!(
            "hsla({:.1}, {:.1}%, {:.1}%, {:.3})",
            self.h.rem_euclid(360.0),
            self.s,
            self.l,
            self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::seeded_rng;

    #[test]
    fn test_css_format() {
        assert_eq!(
            Color::hsla(200.0, 90.0, 60.0, 0.5).to_css(),
            "hsla(200.0, 90.0%, 60.0%, 0.500)"
        );
        // Hue wraps into [0, 360)
        assert!(Color::hsl(370.0, 0.0, 0.0).to_css().starts_with("hsla(10.0"));
    }

    #[test]
    fn test_random_band_bounds() {
        let mut rng = seeded_rng(3);
        for _ in 0..100 {
            let c = Color::random_in_band(&mut rng, 180.0, 220.0, 90.0, 60.0);
            assert!((180.0..220.0).contains(&c.h));
            assert_eq!(c.a, 1.0);
        }
    }
}
