//! Shared simulation types
//!
//! Session phase, surface extents, the seeded RNG and the events a tick
//! raises for the audio layer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Attract mode: ambient motion only, waiting for a start action
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended by a terminal collision (racer only)
    Ended,
}

/// Logical size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Clamp a point into the surface
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Things that happened during a tick that the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A session (re)started
    Started,
    /// A bubble was popped; `pitch` is the tone's start frequency in Hz
    Popped { pos: Vec2, pitch: f32 },
    /// An obstacle expired off the bottom and was scored
    Scored { total: u64 },
    /// Player hit an obstacle; the run is over
    Crashed { score: u64 },
}

/// Seeded RNG used for every randomized attribute
pub type SimRng = Pcg32;

/// Build the simulation RNG from a seed
pub fn seeded_rng(seed: u64) -> SimRng {
    Pcg32::seed_from_u64(seed)
}

/// Monotonic entity ID allocator
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_id: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}
