//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual natively)
//! - Input events (latest-input slot)
//! - Event listener lifetime and teardown (web)

pub mod driver;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt;
use std::str::FromStr;

pub use driver::{FrameHandle, FrameScheduler, LoopDriver, ManualScheduler};
pub use input::{InputSlot, SteerKey};

/// Which simulation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    /// Bubble Realm
    Realm,
    /// Night Run
    Racer,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Realm => "realm",
            GameKind::Racer => "racer",
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realm" | "bubble-realm" | "bubbles" => Ok(GameKind::Realm),
            "racer" | "night-run" | "run" => Ok(GameKind::Racer),
            other => Err(format!("unknown game '{}' (expected realm or racer)", other)),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
