//! Identity components mirrored from the host simulation.
//!
//! The host inserts these on every entity it mirrors into the world. Their
//! presence is what makes an entity "live" for the coordinator: an
//! [`EntityRef`](crate::components::entityref::EntityRef) is valid exactly
//! while its entity still carries a [`DesignerName`].
//!
//! String comparisons against designer names and script tags are
//! case-insensitive, matching how the simulation itself treats class names.

use bevy_ecs::prelude::Component;

/// Designer (class) name of a player pawn.
pub const DESIGNER_PLAYER: &str = "player";
/// Designer name of a player controller.
pub const DESIGNER_PLAYER_CONTROLLER: &str = "cs_player_controller";
/// Designer name of gravity trigger volumes.
pub const DESIGNER_TRIGGER_GRAVITY: &str = "trigger_gravity";
/// Designer name of item equip entities.
pub const DESIGNER_PLAYER_EQUIP: &str = "game_player_equip";
/// Designer name of the logic entity that hosts a `game_ui` script.
pub const DESIGNER_LOGIC_CASE: &str = "logic_case";
/// Designer name of the logic entity that hosts a `point_viewcontrol` script.
pub const DESIGNER_LOGIC_RELAY: &str = "logic_relay";
/// Designer name used when spawning the ignite visual.
pub const DESIGNER_PARTICLE_SYSTEM: &str = "info_particle_system";

/// Script tag marking a `logic_case` as a game UI instance.
pub const SCRIPT_GAME_UI: &str = "game_ui";
/// Script tag marking a `logic_relay` as a view-control relay.
pub const SCRIPT_POINT_VIEWCONTROL: &str = "point_viewcontrol";

/// Class name of a simulation entity (`player`, `trigger_gravity`, ...).
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DesignerName(pub String);

impl DesignerName {
    pub fn new(name: impl Into<String>) -> Self {
        DesignerName(name.into())
    }

    /// Case-insensitive comparison against a designer name.
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// The entity's own name, used by other entities to reference it.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct EntityName(pub String);

impl EntityName {
    pub fn new(name: impl Into<String>) -> Self {
        EntityName(name.into())
    }
}

/// Name of the entity this entity points at (its `target` keyvalue).
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TargetName(pub String);

impl TargetName {
    pub fn new(name: impl Into<String>) -> Self {
        TargetName(name.into())
    }
}

/// Private script tag attached by the map, used to emulate entity classes the
/// simulation no longer ships (`game_ui`, `point_viewcontrol`).
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag(pub String);

impl ScriptTag {
    pub fn new(tag: impl Into<String>) -> Self {
        ScriptTag(tag.into())
    }

    pub fn is(&self, tag: &str) -> bool {
        self.0.eq_ignore_ascii_case(tag)
    }
}

/// Stable per-instance key assigned by the map editor.
///
/// Survives entity re-creation across rounds, which is why per-map tables
/// key on it instead of on [`Entity`](bevy_ecs::prelude::Entity).
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HammerId(pub String);

impl HammerId {
    pub fn new(id: impl Into<String>) -> Self {
        HammerId(id.into())
    }
}
