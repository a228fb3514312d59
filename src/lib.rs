//! Neon Arcade - two canvas arcade toys
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, session state)
//! - `renderer`: Drawing surface abstraction and scene drawing
//! - `audio`: Audio cue dispatch (Web Audio in the browser)
//! - `platform`: Frame loop driver, input slot and browser glue
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    // === Bubble Realm ===

    /// Ticks between bubbles while playing (spawn when the counter exceeds this)
    pub const BUBBLE_SPAWN_RATE: u32 = 40;
    pub const BUBBLE_MIN_RADIUS: f32 = 15.0;
    pub const BUBBLE_MAX_RADIUS: f32 = 35.0;
    /// Rise speed range (units per tick)
    pub const BUBBLE_MIN_SPEED: f32 = 0.5;
    pub const BUBBLE_MAX_SPEED: f32 = 2.0;
    /// Cyan band
    pub const BUBBLE_HUE_MIN: f32 = 180.0;
    pub const BUBBLE_HUE_MAX: f32 = 220.0;
    pub const BUBBLE_SATURATION: f32 = 90.0;
    pub const BUBBLE_LIGHTNESS: f32 = 60.0;
    /// Per-tick spawn chance while idle
    pub const AMBIENT_SPAWN_CHANCE: f64 = 0.05;
    pub const AMBIENT_MAX_BUBBLES: usize = 15;
    pub const WOBBLE_FREQUENCY: f32 = 0.02;
    pub const WOBBLE_AMPLITUDE: f32 = 0.5;
    /// Pointer push-away radius
    pub const REPULSION_RADIUS: f32 = 100.0;
    pub const REPULSION_STRENGTH: f32 = 0.05;
    pub const FADE_IN_STEP: f32 = 0.02;
    /// Extra reach added to a bubble's radius for pop hits
    pub const POP_TOLERANCE: f32 = 15.0;
    /// Pop tone start frequency range (Hz)
    pub const POP_PITCH_MIN: f32 = 300.0;
    pub const POP_PITCH_MAX: f32 = 600.0;

    // === Particles ===

    pub const BURST_SIZE: usize = 8;
    pub const BURST_MIN_SPEED: f32 = 1.0;
    pub const BURST_MAX_SPEED: f32 = 4.0;
    pub const PARTICLE_MIN_SIZE: f32 = 1.0;
    pub const PARTICLE_MAX_SIZE: f32 = 4.0;
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_SHRINK: f32 = 0.95;

    // === Night Run ===

    pub const GAME_SPEED_BASE: f32 = 8.0;
    /// Player lateral speed while a key is held (units per tick)
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const ROAD_WIDTH: f32 = 300.0;
    pub const LANE_COUNT: u32 = 3;
    /// Gap between the road edge and the player's center limit
    pub const CORRIDOR_MARGIN: f32 = 20.0;
    pub const CAR_WIDTH: f32 = 40.0;
    pub const CAR_HEIGHT: f32 = 70.0;
    /// Player car top edge sits this far above the bottom
    pub const PLAYER_BOTTOM_OFFSET: f32 = 150.0;
    pub const OBSTACLE_SPAWN_Y: f32 = -100.0;
    /// Distance past the bottom edge before an obstacle expires
    pub const EXPIRY_MARGIN: f32 = 100.0;
    pub const OBSTACLE_AWARD: u64 = 100;
    /// Score per game speed increment
    pub const SPEED_STEP_SCORE: u64 = 500;
    pub const SPAWN_INTERVAL_BASE: u64 = 60;
    pub const SPAWN_INTERVAL_MIN: u64 = 30;
    /// Score per spawn interval decrement
    pub const INTERVAL_STEP_SCORE: u64 = 1000;
    pub const SPEED_JITTER_MIN: f32 = 0.8;
    pub const SPEED_JITTER_MAX: f32 = 1.2;
    /// Neon band
    pub const OBSTACLE_HUE_MIN: f32 = 180.0;
    pub const OBSTACLE_HUE_MAX: f32 = 360.0;
    /// Car boxes must overlap by more than this on each axis to collide
    pub const HITBOX_PADDING: f32 = 5.0;
    /// Lane marking dash pattern
    pub const LANE_DASH_ON: f32 = 20.0;
    pub const LANE_DASH_OFF: f32 = 30.0;
    /// Background scroll speed multiplier while not playing
    pub const IDLE_SCROLL_FACTOR: f32 = 0.5;

    // === Skyline parallax ===

    pub const FAR_LAYER_COUNT: usize = 20;
    pub const FAR_LAYER_FACTOR: f32 = 0.2;
    pub const NEAR_LAYER_COUNT: usize = 15;
    pub const NEAR_LAYER_FACTOR: f32 = 0.6;
    /// Elements faster than this render with glow and lit windows
    pub const GLOW_FACTOR_THRESHOLD: f32 = 0.4;
}

/// Cheap integer hash for the skyline window flicker
#[inline]
pub fn hash_u32(a: u32, b: u32) -> u32 {
    a.wrapping_mul(2654435761).wrapping_add(b.wrapping_mul(31337)) ^ (a >> 7)
}
