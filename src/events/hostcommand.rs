//! Actions the coordinator asks the host simulation to perform.
//!
//! Most effects are plain component writes that the host picks up through
//! change detection. Everything else (forwarding an input to an entity,
//! killing a player, creating or removing the native side of an entity) is
//! written as a [`HostCommand`] message. The host drains
//! `Messages<HostCommand>` after every tick and every notification it sends;
//! see [`crate::coordinator::Coordinator::drain_commands`].

use bevy_ecs::prelude::*;
use glam::Vec3;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Deliver a named input to `target`'s input port.
    AcceptInput {
        target: Entity,
        input: String,
        activator: Option<Entity>,
        caller: Option<Entity>,
        value: Option<String>,
    },
    /// Kill the player owning `pawn`.
    CommitSuicide { pawn: Entity },
    /// Create the native counterpart of an entity the coordinator spawned.
    /// Its description is read from the entity's components.
    Spawn { entity: Entity },
    Teleport {
        entity: Entity,
        origin: Vec3,
        rotation: Vec3,
    },
    /// Destroy the native counterpart of `entity`.
    Remove { entity: Entity },
    /// Strip every item from the pawn.
    RemoveItems { pawn: Entity },
    GiveItem { pawn: Entity, item: String },
}

impl HostCommand {
    pub fn accept_input(
        target: Entity,
        input: &str,
        activator: Option<Entity>,
        caller: Option<Entity>,
        value: Option<&str>,
    ) -> Self {
        HostCommand::AcceptInput {
            target,
            input: input.to_string(),
            activator,
            caller,
            value: value.filter(|v| !v.is_empty()).map(str::to_string),
        }
    }

    /// Entity the command acts on.
    pub fn entity(&self) -> Entity {
        match self {
            HostCommand::AcceptInput { target, .. } => *target,
            HostCommand::CommitSuicide { pawn }
            | HostCommand::RemoveItems { pawn }
            | HostCommand::GiveItem { pawn, .. } => *pawn,
            HostCommand::Spawn { entity }
            | HostCommand::Teleport { entity, .. }
            | HostCommand::Remove { entity } => *entity,
        }
    }
}
