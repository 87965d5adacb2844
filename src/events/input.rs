//! Per-player button edges.
//!
//! [`ButtonEdges`] is produced by [`InputSender`](crate::resources::input::InputSender),
//! possibly on another thread, and drained into `Messages<ButtonEdges>` at the
//! start of each tick. Game UIs read it to relay button presses.

use bevy_ecs::prelude::*;

use crate::components::player::PlayerId;

/// Buttons that changed state for one player since its previous sample.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdges {
    pub player: PlayerId,
    /// Bits that went down.
    pub pressed: u64,
    /// Bits that went up.
    pub released: u64,
}

impl ButtonEdges {
    pub fn is_empty(&self) -> bool {
        self.pressed == 0 && self.released == 0
    }

    pub fn was_pressed(&self, button: u64) -> bool {
        self.pressed & button != 0
    }

    pub fn was_released(&self, button: u64) -> bool {
        self.released & button != 0
    }
}
