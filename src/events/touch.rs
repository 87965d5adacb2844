//! Touch notifications: two entities' volumes began or ceased overlapping.
//!
//! `trigger` is the volume that was touched, `other` the entity touching it.
//! No ordering guarantee exists between notifications of different pairs.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct StartTouch {
    pub trigger: Entity,
    pub other: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EndTouch {
    pub trigger: Entity,
    pub other: Entity,
}
