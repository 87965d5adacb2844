//! Game UI: relays an operating player's button edges to a `logic_case`.
//!
//! A `logic_case` tagged `game_ui` is inactive until it receives `Activate`.
//! From then on every press/release of the relayed buttons by the activating
//! player reaches the case as `InValue Pressed<Button>` /
//! `InValue Unpressed<Button>`, until `Deactivate` arrives or the activator
//! goes away.
//!
//! # Flags
//!
//! - [`GAMEUI_FREEZE_PLAYER`]: the activator's pawn is "at controls" while
//!   the UI is active.
//! - [`GAMEUI_JUMP_DEACTIVATE`]: pressing jump deactivates the UI. The jump
//!   check runs before any button of the same sample is relayed.
//!
//! # Re-activation
//!
//! Activating an active UI for another player replaces the recorded
//! activator. The previous activator is not deactivated and keeps its
//! "at controls" flag, as the map logic expects.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;

use crate::components::entityref::EntityRef;
use crate::components::player::{FL_ATCONTROLS, PawnFlags, PlayerId};
use crate::components::spawnflags::{GAMEUI_FREEZE_PLAYER, GAMEUI_JUMP_DEACTIVATE, SpawnFlags};
use crate::events::acceptinput::{GameUiAction, GameUiInput};
use crate::events::hostcommand::HostCommand;
use crate::events::input::ButtonEdges;
use crate::events::lifecycle::{EntityDeleted, MapLoad, PlayerDeath, PlayerDisconnect, RoundEnd};
use crate::resources::gameui::{GameUiRecord, GameUiRegistry};
use crate::resources::input::{IN_JUMP, RELAYED_BUTTONS};
use crate::systems::context::Players;

#[derive(SystemParam)]
pub struct GameUis<'w, 's> {
    registry: ResMut<'w, GameUiRegistry>,
    spawnflags: Query<'w, 's, &'static SpawnFlags>,
    pawn_flags: Query<'w, 's, &'static mut PawnFlags>,
    host: MessageWriter<'w, HostCommand>,
}

impl GameUis<'_, '_> {
    fn has_flag(&self, ui: Entity, flag: u32) -> bool {
        self.spawnflags.get(ui).is_ok_and(|flags| flags.has(flag))
    }

    fn set_at_controls(&mut self, players: &Players, ui: Entity, activator: Entity, on: bool) {
        if !self.has_flag(ui, GAMEUI_FREEZE_PLAYER) {
            return;
        }
        let Some(pawn) = players.pawn_behind(activator) else {
            return;
        };
        if let Ok(mut flags) = self.pawn_flags.get_mut(pawn) {
            if on {
                flags.set(FL_ATCONTROLS);
            } else {
                flags.clear(FL_ATCONTROLS);
            }
        }
    }

    fn player_value(&mut self, ui: Entity, activator: Entity, value: &str) {
        self.host.write(HostCommand::accept_input(
            ui,
            "InValue",
            Some(activator),
            Some(activator),
            Some(value),
        ));
    }

    pub fn activate(&mut self, players: &Players, ui: Entity, activator: Entity) {
        if !players.is_live(ui) || !players.is_live(activator) {
            return;
        }
        let record = self
            .registry
            .0
            .get_or_insert_with(ui, || GameUiRecord::new(EntityRef::new(ui)));
        if let Some(previous) = record.activator.filter(|p| p.entity() != activator) {
            debug!(
                "game_ui {ui:?}: {:?} supersedes {:?}",
                activator,
                previous.entity()
            );
        }
        record.activator = Some(EntityRef::new(activator));

        self.set_at_controls(players, ui, activator, true);
        self.player_value(ui, activator, "PlayerOn");
    }

    /// Mark the UI inactive and report `PlayerOff` for whoever operated it.
    ///
    /// `activator` is the entity named by the input. When it is missing or
    /// gone, the recorded activator is used instead.
    pub fn deactivate(&mut self, players: &Players, ui: Entity, activator: Option<Entity>) {
        let recorded = self
            .registry
            .0
            .get_mut(&ui)
            .and_then(|record| record.activator.take())
            .map(|handle| handle.entity());
        let Some(operator) = activator
            .filter(|a| players.is_live(*a))
            .or(recorded.filter(|r| players.is_live(*r)))
        else {
            return;
        };
        self.set_at_controls(players, ui, operator, false);
        self.player_value(ui, operator, "PlayerOff");
    }

    /// Deactivate on behalf of the simulation.
    ///
    /// Forwards `Deactivate` to the UI so its own outputs fire, and clears the
    /// record immediately so nothing more is relayed this tick.
    pub fn force_deactivate(&mut self, players: &Players, ui: Entity) {
        let Some(activator) = self
            .registry
            .0
            .get_mut(&ui)
            .and_then(|record| record.activator.take())
        else {
            return;
        };
        debug!("game_ui {ui:?}: forced deactivate of {:?}", activator.entity());
        self.host.write(HostCommand::accept_input(
            ui,
            "Deactivate",
            Some(activator.entity()),
            Some(ui),
            None,
        ));
        if players.is_valid(activator) {
            self.set_at_controls(players, ui, activator.entity(), false);
        }
    }

    /// UIs whose current activator belongs to `player`, even when that
    /// player's controller is already gone.
    pub fn operated_by(&self, players: &Players, player: PlayerId) -> Vec<Entity> {
        self.registry.0.find_keys(|_, record| {
            record
                .activator
                .is_some_and(|a| players.owner_of(a.entity()) == Some(player))
        })
    }

    pub fn force_deactivate_player(&mut self, players: &Players, player: PlayerId) {
        for ui in self.operated_by(players, player) {
            self.force_deactivate(players, ui);
        }
    }

    /// Relay one player's button edges to every UI that player operates.
    pub fn relay(&mut self, players: &Players, edges: &ButtonEdges) {
        for ui in self.operated_by(players, edges.player) {
            if !players.is_live(ui) {
                continue;
            }
            if self.has_flag(ui, GAMEUI_JUMP_DEACTIVATE) && edges.was_pressed(IN_JUMP) {
                self.force_deactivate(players, ui);
                continue;
            }
            let Some(activator) = self
                .registry
                .0
                .get(&ui)
                .and_then(|record| record.activator)
                .map(|handle| handle.entity())
            else {
                continue;
            };
            for (button, name) in RELAYED_BUTTONS {
                let value = if edges.was_pressed(button) {
                    format!("Pressed{name}")
                } else if edges.was_released(button) {
                    format!("Unpressed{name}")
                } else {
                    continue;
                };
                self.host.write(HostCommand::accept_input(
                    ui,
                    "InValue",
                    Some(activator),
                    Some(ui),
                    Some(&value),
                ));
            }
        }
    }

    /// Drop records of vanished UIs and forget activators that are gone.
    pub fn sweep(&mut self, players: &Players) {
        for (ui, _) in self.registry.0.sweep(|ui, _| !players.is_live(*ui)) {
            debug!("game_ui {ui:?}: record dropped, entity gone");
        }
        for (_, record) in self.registry.0.iter_mut() {
            if record.activator.is_some_and(|a| !players.is_valid(a)) {
                record.activator = None;
            }
        }
    }
}

pub fn gameui_input_observer(trigger: On<GameUiInput>, players: Players, mut uis: GameUis) {
    let input = trigger.event();
    match (input.action, input.activator) {
        (GameUiAction::Activate, Some(activator)) => uis.activate(&players, input.ui, activator),
        (GameUiAction::Activate, None) => {}
        (GameUiAction::Deactivate, activator) => uis.deactivate(&players, input.ui, activator),
    }
}

/// Relay this tick's button edges. Runs after the input bridge is drained.
pub fn gameui_relay_system(
    mut reader: MessageReader<ButtonEdges>,
    players: Players,
    mut uis: GameUis,
) {
    for edges in reader.read() {
        uis.relay(&players, edges);
    }
}

pub fn gameui_sweep_system(players: Players, mut uis: GameUis) {
    uis.sweep(&players);
}

pub fn gameui_player_death_observer(trigger: On<PlayerDeath>, players: Players, mut uis: GameUis) {
    uis.force_deactivate_player(&players, trigger.event().player);
}

pub fn gameui_disconnect_observer(
    trigger: On<PlayerDisconnect>,
    players: Players,
    mut uis: GameUis,
) {
    uis.force_deactivate_player(&players, trigger.event().player);
}

pub fn gameui_round_end_observer(_trigger: On<RoundEnd>, players: Players, mut uis: GameUis) {
    for ui in uis.registry.0.keys() {
        uis.force_deactivate(&players, ui);
    }
    uis.registry.0.reset();
}

pub fn gameui_map_load_observer(_trigger: On<MapLoad>, mut registry: ResMut<GameUiRegistry>) {
    registry.0.reset();
}

/// A destroyed UI is deactivated and forgotten; a destroyed activator
/// deactivates the UIs it operated.
pub fn gameui_entity_deleted_observer(
    trigger: On<EntityDeleted>,
    players: Players,
    mut uis: GameUis,
) {
    let deleted = trigger.event().entity;
    if uis.registry.0.contains(&deleted) {
        uis.force_deactivate(&players, deleted);
        uis.registry.0.remove(&deleted);
        return;
    }
    let operated = uis.registry.0.find_keys(|_, record| {
        record
            .activator
            .is_some_and(|a| a.entity() == deleted)
    });
    for ui in operated {
        uis.force_deactivate(&players, ui);
    }
}
