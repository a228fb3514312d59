//! Per-tick input and the game interface
//!
//! Each game advances exactly one tick per rendered frame. Inputs are a
//! snapshot of the latest pointer/keyboard state, taken once per tick.

use glam::Vec2;

use super::state::{Extent, GameEvent, SessionPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Latest pointer position in surface space (None until it enters)
    pub pointer: Option<Vec2>,
    /// Pointer press since the previous tick
    pub press: Option<Vec2>,
    /// Steering target x from a pointer move/press since the previous tick
    pub steer_x: Option<f32>,
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
}

/// A simulation the loop driver can run
pub trait Game {
    /// Advance the simulation by one tick
    fn tick(&mut self, input: &TickInput);

    /// Explicit start/restart action
    fn start(&mut self);

    fn phase(&self) -> SessionPhase;

    fn score(&self) -> u64;

    fn extent(&self) -> Extent;

    /// The drawing surface changed size
    fn resize(&mut self, extent: Extent);

    /// Take the events raised since the last drain
    fn drain_events(&mut self) -> Vec<GameEvent>;

    /// Speed driving the continuous engine tone, while one should sound
    fn engine_speed(&self) -> Option<f32> {
        None
    }
}
