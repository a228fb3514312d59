//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (store order, oldest first)
//! - No rendering or platform dependencies

pub mod bubble;
pub mod collision;
pub mod color;
pub mod parallax;
pub mod particle;
pub mod racer;
pub mod realm;
pub mod state;
pub mod tick;

pub use bubble::Bubble;
pub use collision::{Rect, first_hit, padded_overlap, pop_target};
pub use color::Color;
pub use parallax::{ParallaxElement, Skyline};
pub use particle::{Particle, burst, step_particles};
pub use racer::{Obstacle, RacerState};
pub use realm::RealmState;
pub use state::{Extent, GameEvent, IdAllocator, SessionPhase, SimRng, seeded_rng};
pub use tick::{Game, TickInput};
