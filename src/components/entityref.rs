//! Revalidatable handle to a simulation entity.
//!
//! Effect records never hold borrowed component data or raw host pointers;
//! they hold an [`EntityRef`] and revalidate it against the world every time
//! it is used. [`Entity`] already encodes index and generation, so a slot
//! that was freed and reused by a new entity never compares equal to a stale
//! reference, and a stale reference never resolves.
//!
//! # Validity
//!
//! An entity is live while it carries
//! [`DesignerName`](crate::components::identity::DesignerName). The host
//! removes mirrored entities from the world when the simulation destroys them.

use bevy_ecs::prelude::*;

use crate::components::identity::DesignerName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef(Entity);

impl EntityRef {
    pub fn new(entity: Entity) -> Self {
        EntityRef(entity)
    }

    /// The underlying entity id, without any validity check.
    pub fn entity(&self) -> Entity {
        self.0
    }

    /// True while the referenced entity is live.
    pub fn is_valid(&self, live: &Query<&DesignerName>) -> bool {
        live.contains(self.0)
    }

    /// Validity check usable outside systems.
    pub fn is_valid_in(&self, world: &World) -> bool {
        world.get::<DesignerName>(self.0).is_some()
    }
}

impl From<Entity> for EntityRef {
    fn from(entity: Entity) -> Self {
        EntityRef(entity)
    }
}
