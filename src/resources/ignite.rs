//! Ignite (damage-over-time) state.
//!
//! One [`IgniteRecord`] per burning player, keyed by [`PlayerId`]. The
//! registry is shared (`Arc<RwLock<_>>`): disconnect handling and host-side
//! queries may reach it from outside the tick.
//!
//! # Related
//!
//! - [`crate::systems::ignite`] – trigger, tick and cleanup logic

use bevy_ecs::prelude::*;

use crate::components::entityref::EntityRef;
use crate::components::player::PlayerId;
use crate::resources::registry::SharedRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct IgniteRecord {
    /// The burning pawn.
    pub victim: EntityRef,
    /// Burning visual following the victim, if one could be spawned.
    pub attached_effect: Option<EntityRef>,
    /// Timestamp after which the effect ends.
    pub end_time: f64,
    /// Timestamp of the next damage tick.
    pub next_tick_time: f64,
}

impl IgniteRecord {
    /// Extend the effect so it lasts at least until `end_time`. Never shortens.
    pub fn extend_to(&mut self, end_time: f64) {
        if end_time > self.end_time {
            self.end_time = end_time;
        }
    }
}

/// Shared ignite registry resource. Clone it to hand a handle to another thread.
#[derive(Resource, Debug, Clone, Default)]
pub struct IgniteRegistry(pub SharedRegistry<PlayerId, IgniteRecord>);

impl IgniteRegistry {
    pub fn handle(&self) -> SharedRegistry<PlayerId, IgniteRecord> {
        self.0.clone()
    }

    pub fn is_burning(&self, player: PlayerId) -> bool {
        self.0.contains(&player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_to_never_shortens() {
        let mut world = World::new();
        let victim = EntityRef::new(world.spawn_empty().id());
        let mut record = IgniteRecord {
            victim,
            attached_effect: None,
            end_time: 5.0,
            next_tick_time: 0.5,
        };
        record.extend_to(3.0);
        assert_eq!(record.end_time, 5.0);
        record.extend_to(8.0);
        assert_eq!(record.end_time, 8.0);
        assert_eq!(record.next_tick_time, 0.5);
    }
}
