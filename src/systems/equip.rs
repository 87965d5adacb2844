//! `game_player_equip` with the strip-first flag.
//!
//! The simulation's own equip entity no longer strips items before handing
//! out new ones. When the map asks for it (spawn flag
//! [`EQUIP_STRIP_FIRST`]), the strip is performed here and the optional item
//! handed out afterwards. Without the flag the entity is left alone.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::spawnflags::{EQUIP_STRIP_FIRST, SpawnFlags};
use crate::events::acceptinput::{EquipAction, EquipInput};
use crate::events::hostcommand::HostCommand;
use crate::systems::context::Players;

pub fn equip_input_observer(
    trigger: On<EquipInput>,
    players: Players,
    flags: Query<&SpawnFlags>,
    mut host: MessageWriter<HostCommand>,
) {
    let input = trigger.event();
    if !flags
        .get(input.equip)
        .is_ok_and(|flags| flags.has(EQUIP_STRIP_FIRST))
    {
        return;
    }

    match input.action {
        EquipAction::Use | EquipAction::TriggerForActivatedPlayer => {
            let Some((player, pawn)) = input.activator.and_then(|a| players.alive_player_of(a))
            else {
                return;
            };
            debug!("equip {:?}: stripping {player:?}", input.equip);
            host.write(HostCommand::RemoveItems { pawn });
            if input.action == EquipAction::TriggerForActivatedPlayer
                && let Some(item) = &input.item
            {
                host.write(HostCommand::GiveItem {
                    pawn,
                    item: item.clone(),
                });
            }
        }
        EquipAction::TriggerForAllPlayers => {
            for (_, pawn) in players.alive_pawns() {
                host.write(HostCommand::RemoveItems { pawn });
            }
        }
    }
}
