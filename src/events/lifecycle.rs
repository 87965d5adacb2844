//! Entity, player and level lifecycle notifications from the host.
//!
//! Registries are scoped to these boundaries: the observers in
//! [`crate::systems::lifecycle`] reset or prune them when a map loads, a
//! round starts or ends, a player dies or leaves, or an entity is destroyed.
//!
//! `EntityDeleted` must be sent while the entity is still in the world; the
//! host despawns it afterwards.

use bevy_ecs::prelude::*;

use crate::components::player::PlayerId;

/// The host mirrored a new entity into the world.
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityCreated {
    pub entity: Entity,
}

/// The simulation is about to destroy an entity.
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDeleted {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDeath {
    pub player: PlayerId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDisconnect {
    pub player: PlayerId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct RoundStart;

#[derive(Event, Debug, Clone, Copy)]
pub struct RoundEnd;

/// A new map is starting; every entity of the previous one is gone.
#[derive(Event, Debug, Clone)]
pub struct MapLoad {
    pub map: String,
}

/// Reload the configuration and the current map's gravity table.
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadConfig;
