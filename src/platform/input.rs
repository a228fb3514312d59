//! Latest-input slot
//!
//! Host events write here immediately (last write wins, nothing is queued).
//! The loop driver takes one snapshot per tick.

use glam::Vec2;

use crate::sim::{Extent, TickInput};

/// Steering keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerKey {
    Left,
    Right,
}

impl SteerKey {
    /// Map a `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(SteerKey::Left),
            "ArrowRight" | "KeyD" => Some(SteerKey::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    pointer: Option<Vec2>,
    press: Option<Vec2>,
    steer_x: Option<f32>,
    left: bool,
    right: bool,
    resize: Option<Extent>,
}

impl InputSlot {
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        self.steer_x = Some(pos.x);
    }

    /// Press also counts as a move
    pub fn pointer_pressed(&mut self, pos: Vec2) {
        self.pointer_moved(pos);
        self.press = Some(pos);
    }

    /// Pointer left the surface
    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Returns whether the key is a steering key
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.set_key(code, false)
    }

    fn set_key(&mut self, code: &str, held: bool) -> bool {
        match SteerKey::from_code(code) {
            Some(SteerKey::Left) => self.left = held,
            Some(SteerKey::Right) => self.right = held,
            None => return false,
        }
        true
    }

    pub fn resized(&mut self, extent: Extent) {
        self.resize = Some(extent);
    }

    /// Snapshot for one tick. Presses, steering targets and resizes are
    /// consumed; the pointer position and held keys persist.
    pub fn take(&mut self) -> (TickInput, Option<Extent>) {
        let input = TickInput {
            pointer: self.pointer,
            press: self.press.take(),
            steer_x: self.steer_x.take(),
            left: self.left,
            right: self.right,
        };
        (input, self.resize.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut slot = InputSlot::default();
        slot.pointer_moved(Vec2::new(1.0, 1.0));
        slot.pointer_moved(Vec2::new(5.0, 7.0));
        let (input, _) = slot.take();
        assert_eq!(input.pointer, Some(Vec2::new(5.0, 7.0)));
        assert_eq!(input.steer_x, Some(5.0));
    }

    #[test]
    fn test_one_shots_consumed() {
        let mut slot = InputSlot::default();
        slot.pointer_pressed(Vec2::new(3.0, 4.0));
        slot.resized(Extent::new(10.0, 10.0));

        let (first, resize) = slot.take();
        assert_eq!(first.press, Some(Vec2::new(3.0, 4.0)));
        assert_eq!(resize, Some(Extent::new(10.0, 10.0)));

        let (second, resize) = slot.take();
        assert_eq!(second.press, None);
        assert_eq!(second.steer_x, None);
        assert_eq!(second.pointer, Some(Vec2::new(3.0, 4.0)));
        assert_eq!(resize, None);
    }

    #[test]
    fn test_held_keys_persist() {
        let mut slot = InputSlot::default();
        assert!(slot.key_down("KeyA"));
        assert!(slot.key_down("ArrowRight"));
        assert!(!slot.key_down("Space"));
        assert!(slot.take().0.left);
        let (input, _) = slot.take();
        assert!(input.left && input.right);

        slot.key_up("ArrowLeft");
        let (input, _) = slot.take();
        assert!(!input.left && input.right);
    }

    #[test]
    fn test_pointer_leave_clears_position() {
        let mut slot = InputSlot::default();
        slot.pointer_moved(Vec2::ONE);
        slot.pointer_left();
        assert_eq!(slot.take().0.pointer, None);
    }
}
