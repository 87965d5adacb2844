//! Game UI relay state.
//!
//! A game UI instance is either inactive or active for exactly one
//! activator. Records are created on the first activation and survive
//! deactivation (the activator is simply cleared), so the record of a UI
//! entity exists from its first use until the entity or the round goes away.

use bevy_ecs::prelude::*;

use crate::components::entityref::EntityRef;
use crate::resources::registry::EffectRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameUiRecord {
    /// The `logic_case` hosting the UI.
    pub source: EntityRef,
    /// Entity operating the UI; `None` while inactive.
    pub activator: Option<EntityRef>,
}

impl GameUiRecord {
    pub fn new(source: EntityRef) -> Self {
        GameUiRecord {
            source,
            activator: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.activator.is_some()
    }
}

/// UI records keyed by UI entity.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameUiRegistry(pub EffectRegistry<Entity, GameUiRecord>);
