//! Player controller and pawn components.
//!
//! A connected player is represented by two entities, mirroring the
//! simulation:
//!
//! - the **controller** ([`PlayerController`]) lives as long as the
//!   connection and owns per-player view settings such as [`DesiredFov`];
//! - the **pawn** ([`PlayerPawn`]) is the body in the world. It is recreated
//!   on respawn and carries health, movement, camera and status flags.
//!
//! [`PlayerId`] is the stable identity used to key effect state by player,
//! since pawn entities come and go.

use bevy_ecs::prelude::{Component, Entity};

/// Default field of view restored when an override ends.
pub const DEFAULT_FOV: u32 = 90;
/// Lowest accepted field-of-view override.
pub const MIN_FOV: i32 = 16;
/// Highest accepted field-of-view override.
pub const MAX_FOV: i32 = 179;

/// Pawn status flag: movement input is ignored.
pub const FL_FROZEN: u32 = 1 << 5;
/// Pawn status flag: the player is operating a UI and cannot act.
pub const FL_ATCONTROLS: u32 = 1 << 6;

/// Stable player slot identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

/// Connection-scoped player entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerController {
    pub player: PlayerId,
    /// Current pawn, if the player has one.
    pub pawn: Option<Entity>,
}

/// Field of view requested by the controller.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesiredFov(pub u32);

impl Default for DesiredFov {
    fn default() -> Self {
        DesiredFov(DEFAULT_FOV)
    }
}

/// In-world body of a player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerPawn {
    pub player: PlayerId,
    pub controller: Entity,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    Dying,
    Dead,
}

/// Pawn status bitmask (`FL_*`).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PawnFlags(pub u32);

impl PawnFlags {
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    pub fn has(&self, flag: u32) -> bool {
        self.0 & flag != 0
    }
}

/// Multiplier on the pawn's movement speed. `1.0` is neutral.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct VelocityModifier(pub f32);

impl Default for VelocityModifier {
    fn default() -> Self {
        VelocityModifier(1.0)
    }
}

/// Entity the pawn's camera renders from. `None` is the "own eyes" sentinel.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewEntity(pub Option<Entity>);

/// Weapon currently held by the pawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveWeapon(pub Option<Entity>);
