//! Camera override state per `point_viewcontrol` relay.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::components::entityref::EntityRef;
use crate::components::player::PlayerId;
use crate::resources::registry::EffectRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewControlRecord {
    /// The relay entity.
    pub relay: EntityRef,
    /// Cached camera target. Resolved lazily by name, nulled once invalid.
    pub target: Option<EntityRef>,
    /// Players whose camera is overridden by this relay.
    pub active_players: FxHashSet<PlayerId>,
}

impl ViewControlRecord {
    pub fn new(relay: EntityRef) -> Self {
        ViewControlRecord {
            relay,
            target: None,
            active_players: FxHashSet::default(),
        }
    }
}

/// Relay records keyed by relay entity.
#[derive(Resource, Debug, Clone, Default)]
pub struct ViewControlRegistry(pub EffectRegistry<Entity, ViewControlRecord>);
