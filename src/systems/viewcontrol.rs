//! View control: camera override driven by `point_viewcontrol` relays.
//!
//! A `logic_relay` tagged `point_viewcontrol` binds the camera of the
//! players it is enabled for to the entity named by its `target`. The target
//! is looked up by name the first time it is needed and cached until it
//! becomes invalid.
//!
//! The override is re-asserted for every member on each tick by
//! [`viewcontrol_refresh_system`], so other game logic cannot silently undo
//! it while the relay is enabled.
//!
//! # Flags
//!
//! - [`VIEWCONTROL_SET_FOV`]: the field of view is set to the relay's health
//!   (16 to 179) while enabled and back to 90 when disabled.
//! - [`VIEWCONTROL_FREEZE_PLAYER`]: the pawn is frozen while enabled.
//! - [`VIEWCONTROL_DISABLE_WEAPON`]: the held weapon cannot attack while
//!   enabled.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;

use crate::components::entityref::EntityRef;
use crate::components::health::Health;
use crate::components::identity::{EntityName, ScriptTag, TargetName};
use crate::components::player::{
    ActiveWeapon, DEFAULT_FOV, DesiredFov, FL_FROZEN, MAX_FOV, MIN_FOV, PawnFlags, PlayerId,
    ViewEntity,
};
use crate::components::spawnflags::{
    SpawnFlags, VIEWCONTROL_DISABLE_WEAPON, VIEWCONTROL_FREEZE_PLAYER, VIEWCONTROL_SET_FOV,
};
use crate::components::weapon::AttackCooldown;
use crate::events::acceptinput::{ViewControlAction, ViewControlInput};
use crate::events::lifecycle::{
    EntityCreated, EntityDeleted, MapLoad, PlayerDeath, PlayerDisconnect, RoundEnd,
};
use crate::resources::viewcontrol::{ViewControlRecord, ViewControlRegistry};
use crate::resources::worldtime::WorldTime;
use crate::systems::context::Players;
use crate::systems::dispatch::is_view_control;

/// Ticks the held weapon stays unable to attack, re-pushed every tick.
pub const WEAPON_HOLD_TICKS: u32 = 24;

/// Field of view a relay applies while enabled.
pub fn relay_fov(health: Option<&Health>) -> u32 {
    match health {
        Some(Health(fov)) if (MIN_FOV..=MAX_FOV).contains(fov) => *fov as u32,
        _ => DEFAULT_FOV,
    }
}

#[derive(SystemParam)]
pub struct ViewControls<'w, 's> {
    registry: ResMut<'w, ViewControlRegistry>,
    time: Res<'w, WorldTime>,
    relays: Query<
        'w,
        's,
        (
            Option<&'static SpawnFlags>,
            Option<&'static Health>,
            Option<&'static TargetName>,
        ),
    >,
    names: Query<'w, 's, (Entity, &'static EntityName)>,
    views: Query<'w, 's, &'static mut ViewEntity>,
    fovs: Query<'w, 's, &'static mut DesiredFov>,
    pawn_flags: Query<'w, 's, &'static mut PawnFlags>,
    weapons: Query<'w, 's, &'static ActiveWeapon>,
    cooldowns: Query<'w, 's, &'static mut AttackCooldown>,
}

impl ViewControls<'_, '_> {
    pub fn ensure_record(&mut self, relay: Entity) {
        self.registry
            .0
            .get_or_insert_with(relay, || ViewControlRecord::new(EntityRef::new(relay)));
    }

    /// Cached target of `relay`, looked up by name when the cache is empty or
    /// stale. Only the cache field is written.
    pub fn resolve_target(&mut self, players: &Players, relay: Entity) -> Option<EntityRef> {
        let record = self
            .registry
            .0
            .get_or_insert_with(relay, || ViewControlRecord::new(EntityRef::new(relay)));
        if let Some(target) = record.target {
            if players.is_valid(target) {
                return Some(target);
            }
            record.target = None;
        }

        let (_, _, target_name) = self.relays.get(relay).ok()?;
        let wanted = target_name?.0.as_str();
        if wanted.trim().is_empty() {
            return None;
        }
        let found = self
            .names
            .iter()
            .filter(|(entity, _)| players.is_live(*entity))
            .find(|(_, name)| name.0.eq_ignore_ascii_case(wanted))
            .map(|(entity, _)| EntityRef::new(entity));
        if let Some(target) = found {
            debug!("viewcontrol {relay:?}: target '{wanted}' is {:?}", target.entity());
        }
        record.target = found;
        found
    }

    /// Apply (`enable`) or lift the override for one player.
    ///
    /// Enabling needs a resolved target; lifting does not.
    fn apply(
        &mut self,
        players: &Players,
        relay: Entity,
        target: Option<EntityRef>,
        player: PlayerId,
        enable: bool,
    ) {
        if enable && target.is_none() {
            return;
        }
        let (Some(controller), Some(pawn)) =
            (players.controller_of(player), players.pawn_of(player))
        else {
            return;
        };
        let (flags, fov) = self
            .relays
            .get(relay)
            .map(|(flags, health, _)| (flags.copied().unwrap_or_default(), relay_fov(health)))
            .unwrap_or_default();

        if let Ok(mut view) = self.views.get_mut(pawn) {
            let wanted = if enable {
                ViewEntity(target.map(|t| t.entity()))
            } else {
                ViewEntity(None)
            };
            view.set_if_neq(wanted);
        }

        if flags.has(VIEWCONTROL_SET_FOV)
            && let Ok(mut desired) = self.fovs.get_mut(controller)
        {
            let wanted = if enable { fov } else { DEFAULT_FOV };
            desired.set_if_neq(DesiredFov(wanted));
        }

        if flags.has(VIEWCONTROL_FREEZE_PLAYER)
            && let Ok(mut pawn_flags) = self.pawn_flags.get_mut(pawn)
            && pawn_flags.has(FL_FROZEN) != enable
        {
            if enable {
                pawn_flags.set(FL_FROZEN);
            } else {
                pawn_flags.clear(FL_FROZEN);
            }
        }

        if enable && flags.has(VIEWCONTROL_DISABLE_WEAPON) {
            let floor = self.time.tick.saturating_add(WEAPON_HOLD_TICKS);
            if let Ok(ActiveWeapon(Some(weapon))) = self.weapons.get(pawn)
                && let Ok(mut cooldown) = self.cooldowns.get_mut(*weapon)
                && (cooldown.next_primary_tick < floor || cooldown.next_secondary_tick < floor)
            {
                cooldown.floor_at(floor);
            }
        }
    }

    pub fn enable(&mut self, players: &Players, relay: Entity, player: PlayerId) {
        let target = self.resolve_target(players, relay);
        if let Some(record) = self.registry.0.get_mut(&relay) {
            record.active_players.insert(player);
        }
        self.apply(players, relay, target, player, true);
    }

    pub fn disable(&mut self, players: &Players, relay: Entity, player: PlayerId) {
        let target = self.resolve_target(players, relay);
        if let Some(record) = self.registry.0.get_mut(&relay) {
            record.active_players.remove(&player);
        }
        self.apply(players, relay, target, player, false);
    }

    pub fn enable_all(&mut self, players: &Players, relay: Entity) {
        for player in players.connected() {
            self.enable(players, relay, player);
        }
    }

    pub fn disable_all(&mut self, players: &Players, relay: Entity) {
        let Some(record) = self.registry.0.get_mut(&relay) else {
            return;
        };
        let target = record.target;
        let mut members: Vec<PlayerId> = record.active_players.drain().collect();
        members.sort_unstable();
        for player in members {
            self.apply(players, relay, target, player, false);
        }
    }

    /// Lift every override of `relay` and forget it.
    pub fn discard(&mut self, players: &Players, relay: Entity) {
        self.disable_all(players, relay);
        self.registry.0.remove(&relay);
    }

    /// Drop `player` from every relay and lift its override.
    pub fn remove_player(&mut self, players: &Players, player: PlayerId) {
        let relays = self
            .registry
            .0
            .find_keys(|_, record| record.active_players.contains(&player));
        for relay in relays {
            self.disable(players, relay, player);
        }
    }

    /// The cached target of some relays is about to disappear: point their
    /// members' cameras back at their own eyes and empty the caches. Members
    /// stay enrolled and follow the next target that resolves.
    pub fn release_target(&mut self, players: &Players, target: Entity) {
        let relays = self.registry.0.find_keys(|_, record| {
            record.target.is_some_and(|t| t.entity() == target)
        });
        for relay in relays {
            let Some(record) = self.registry.0.get_mut(&relay) else {
                continue;
            };
            record.target = None;
            let members: Vec<PlayerId> = record.active_players.iter().copied().collect();
            for player in members {
                if let Some(pawn) = players.pawn_of(player)
                    && let Ok(mut view) = self.views.get_mut(pawn)
                {
                    view.set_if_neq(ViewEntity(None));
                }
            }
        }
    }

    /// Re-assert every active override, pruning players that left.
    pub fn refresh(&mut self, players: &Players) {
        let relays = self
            .registry
            .0
            .find_keys(|_, record| !record.active_players.is_empty());
        for relay in relays {
            if !players.is_live(relay) {
                continue;
            }
            let mut members = match self.registry.0.get_mut(&relay) {
                Some(record) => {
                    record
                        .active_players
                        .retain(|player| players.controller_of(*player).is_some());
                    record.active_players.iter().copied().collect::<Vec<_>>()
                }
                None => continue,
            };
            members.sort_unstable();
            let target = self.resolve_target(players, relay);
            for player in members {
                self.apply(players, relay, target, player, true);
            }
        }
    }

    /// Forget relays destroyed without notice, lifting their overrides.
    pub fn sweep(&mut self, players: &Players) {
        let gone = self.registry.0.find_keys(|relay, _| !players.is_live(*relay));
        for relay in gone {
            debug!("viewcontrol {relay:?}: record dropped, entity gone");
            self.discard(players, relay);
        }
    }

    pub fn reset(&mut self) {
        self.registry.0.reset();
    }

    pub fn relays(&self) -> Vec<Entity> {
        self.registry.0.keys()
    }
}

pub fn viewcontrol_input_observer(
    trigger: On<ViewControlInput>,
    players: Players,
    mut views: ViewControls,
) {
    let input = trigger.event();
    if !players.is_live(input.relay) {
        return;
    }
    let activating = input.activator.and_then(|a| players.player_of(a));
    match input.action {
        ViewControlAction::Enable => {
            if let Some(player) = activating {
                views.enable(&players, input.relay, player);
            }
        }
        ViewControlAction::Disable => {
            if let Some(player) = activating {
                views.disable(&players, input.relay, player);
            }
        }
        ViewControlAction::EnableAll => views.enable_all(&players, input.relay),
        ViewControlAction::DisableAll => {
            views.resolve_target(&players, input.relay);
            views.disable_all(&players, input.relay);
        }
    }
}

pub fn viewcontrol_refresh_system(players: Players, mut views: ViewControls) {
    views.sweep(&players);
    views.refresh(&players);
}

/// Relays get their record as soon as they exist.
pub fn viewcontrol_entity_created_observer(
    trigger: On<EntityCreated>,
    players: Players,
    tags: Query<&ScriptTag>,
    mut views: ViewControls,
) {
    let entity = trigger.event().entity;
    if is_view_control(&players.live, &tags, entity) {
        views.ensure_record(entity);
    }
}

pub fn viewcontrol_entity_deleted_observer(
    trigger: On<EntityDeleted>,
    players: Players,
    mut views: ViewControls,
) {
    let deleted = trigger.event().entity;
    views.discard(&players, deleted);
    views.release_target(&players, deleted);
}

pub fn viewcontrol_player_death_observer(
    trigger: On<PlayerDeath>,
    players: Players,
    mut views: ViewControls,
) {
    views.remove_player(&players, trigger.event().player);
}

pub fn viewcontrol_disconnect_observer(
    trigger: On<PlayerDisconnect>,
    players: Players,
    mut views: ViewControls,
) {
    views.remove_player(&players, trigger.event().player);
}

pub fn viewcontrol_round_end_observer(
    _trigger: On<RoundEnd>,
    players: Players,
    mut views: ViewControls,
) {
    for relay in views.relays() {
        views.disable_all(&players, relay);
    }
    views.reset();
}

pub fn viewcontrol_map_load_observer(_trigger: On<MapLoad>, mut views: ViewControls) {
    views.reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_fov_accepts_only_the_valid_range() {
        assert_eq!(relay_fov(Some(&Health(120))), 120);
        assert_eq!(relay_fov(Some(&Health(16))), 16);
        assert_eq!(relay_fov(Some(&Health(179))), 179);
        assert_eq!(relay_fov(Some(&Health(15))), DEFAULT_FOV);
        assert_eq!(relay_fov(Some(&Health(180))), DEFAULT_FOV);
        assert_eq!(relay_fov(None), DEFAULT_FOV);
    }
}
