//! Accept-input routing.
//!
//! [`accept_input_observer`] inspects every input the host reports and turns
//! the ones this crate handles into effect requests. Classification order
//! matters: an ignite input is recognised by name on any entity before the
//! receiving entity's class is looked at.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::identity::{
    DESIGNER_LOGIC_CASE, DESIGNER_LOGIC_RELAY, DESIGNER_PLAYER_EQUIP, DesignerName,
    SCRIPT_GAME_UI, SCRIPT_POINT_VIEWCONTROL, ScriptTag,
};
use crate::events::acceptinput::{
    AcceptInputHook, EquipAction, EquipInput, GameUiAction, GameUiInput, IgniteRequest,
    ViewControlAction, ViewControlInput,
};

/// Input name fragment that sets the activator on fire (`IgniteLifetime`).
pub const IGNITE_INPUT: &str = "ignitel";

fn tagged(
    names: &Query<&DesignerName>,
    tags: &Query<&ScriptTag>,
    entity: Entity,
    designer: &str,
    tag: &str,
) -> bool {
    names.get(entity).is_ok_and(|name| name.is(designer))
        && tags.get(entity).is_ok_and(|script| script.is(tag))
}

/// A `logic_case` emulating a `game_ui`.
pub fn is_game_ui(names: &Query<&DesignerName>, tags: &Query<&ScriptTag>, entity: Entity) -> bool {
    tagged(names, tags, entity, DESIGNER_LOGIC_CASE, SCRIPT_GAME_UI)
}

/// A `logic_relay` emulating a `point_viewcontrol`.
pub fn is_view_control(
    names: &Query<&DesignerName>,
    tags: &Query<&ScriptTag>,
    entity: Entity,
) -> bool {
    tagged(names, tags, entity, DESIGNER_LOGIC_RELAY, SCRIPT_POINT_VIEWCONTROL)
}

fn is_ignite_input(input: &str) -> bool {
    input.to_ascii_lowercase().contains(IGNITE_INPUT)
}

/// Parse an ignite duration. Non-numeric and non-finite values are rejected.
pub fn parse_duration(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|d| d.is_finite())
}

pub fn accept_input_observer(
    trigger: On<AcceptInputHook>,
    names: Query<&DesignerName>,
    tags: Query<&ScriptTag>,
    mut commands: Commands,
) {
    let hook = trigger.event();
    if hook.input.trim().is_empty() {
        return;
    }
    let Ok(designer) = names.get(hook.entity) else {
        return;
    };

    if is_ignite_input(&hook.input) {
        let Some(activator) = hook.activator else {
            return;
        };
        let value = hook.value.render();
        match parse_duration(&value) {
            Some(duration) => commands.trigger(IgniteRequest {
                activator,
                duration,
            }),
            None => debug!("{}: ignoring malformed duration '{value}'", hook.input),
        }
        return;
    }

    if designer.is(DESIGNER_PLAYER_EQUIP) {
        if let Some(action) = EquipAction::from_input(&hook.input) {
            commands.trigger(EquipInput {
                equip: hook.entity,
                activator: hook.activator,
                action,
                item: hook.value.text(),
            });
        }
        return;
    }

    if is_game_ui(&names, &tags, hook.entity) {
        if let Some(action) = GameUiAction::from_input(&hook.input) {
            commands.trigger(GameUiInput {
                ui: hook.entity,
                activator: hook.activator,
                action,
            });
        }
        return;
    }

    if is_view_control(&names, &tags, hook.entity)
        && let Some(action) = ViewControlAction::from_input(&hook.input)
    {
        commands.trigger(ViewControlInput {
            relay: hook.entity,
            activator: hook.activator,
            action,
        });
    }
}
