//! Spawn flag bitmask component.
//!
//! Map authors configure entity behavior through spawn flag bits. The bit
//! meanings depend on the entity class, so the constants are grouped by the
//! subsystem that reads them.

use bevy_ecs::prelude::Component;

/// `game_player_equip`: strip the player's items before equipping.
pub const EQUIP_STRIP_FIRST: u32 = 0x0002;

/// `game_ui`: put the activator "at controls" while active.
pub const GAMEUI_FREEZE_PLAYER: u32 = 32;
/// `game_ui`: a jump press deactivates the UI.
pub const GAMEUI_JUMP_DEACTIVATE: u32 = 256;

/// `point_viewcontrol`: freeze the player while the camera is active.
pub const VIEWCONTROL_FREEZE_PLAYER: u32 = 32;
/// `point_viewcontrol`: apply the relay's field of view (stored in its health).
pub const VIEWCONTROL_SET_FOV: u32 = 64;
/// `point_viewcontrol`: hold the player's weapon off while the camera is active.
pub const VIEWCONTROL_DISABLE_WEAPON: u32 = 128;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnFlags(pub u32);

impl SpawnFlags {
    pub fn has(&self, flag: u32) -> bool {
        self.0 & flag != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_checks_individual_bits() {
        let flags = SpawnFlags(VIEWCONTROL_SET_FOV | VIEWCONTROL_FREEZE_PLAYER);
        assert!(flags.has(VIEWCONTROL_SET_FOV));
        assert!(flags.has(VIEWCONTROL_FREEZE_PLAYER));
        assert!(!flags.has(VIEWCONTROL_DISABLE_WEAPON));
        assert!(!SpawnFlags::default().has(EQUIP_STRIP_FIRST));
    }
}
