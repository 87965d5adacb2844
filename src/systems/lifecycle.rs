//! Level-scoped configuration observers.
//!
//! Effect registries reset themselves from their own subsystem's observers.
//! This module keeps what belongs to the level as a whole: the gravity table
//! of the current map and the reloadable configuration.

use bevy_ecs::prelude::*;
use log::info;

use crate::events::lifecycle::{MapLoad, ReloadConfig, RoundStart};
use crate::resources::config::{ConfigRoot, EntityFixConfig};
use crate::resources::mapgravity::MapGravity;

pub fn map_load_observer(
    trigger: On<MapLoad>,
    root: Res<ConfigRoot>,
    mut gravity: ResMut<MapGravity>,
) {
    let map = &trigger.event().map;
    info!("Map {map} loaded");
    gravity.load(&root, map);
}

/// Retry the gravity table if the current map had none.
pub fn round_start_observer(
    _trigger: On<RoundStart>,
    root: Res<ConfigRoot>,
    mut gravity: ResMut<MapGravity>,
) {
    if let Some(map) = gravity.map().map(str::to_owned) {
        gravity.ensure_loaded(&root, &map);
    }
}

/// Re-read the configuration file and the current map's gravity table.
pub fn reload_config_observer(
    _trigger: On<ReloadConfig>,
    root: Res<ConfigRoot>,
    mut config: ResMut<EntityFixConfig>,
    mut gravity: ResMut<MapGravity>,
) {
    info!("Reloading configuration from {}", root.0.display());
    *config = EntityFixConfig::load_or_default(&root);
    gravity.reload(&root);
}
