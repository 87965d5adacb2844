//! Accept-input notifications and the effect requests routed from them.
//!
//! The host reports every input delivered to an entity through its I/O port
//! as an [`AcceptInputHook`]. [`crate::systems::dispatch`] classifies the
//! receiving entity and the input name, then triggers one of the request
//! events below, each observed by the matching effect subsystem.

use bevy_ecs::prelude::*;

use crate::variant::Variant;

/// An input reached `entity`'s input port.
#[derive(Event, Debug, Clone)]
pub struct AcceptInputHook {
    pub entity: Entity,
    pub input: String,
    pub activator: Option<Entity>,
    pub caller: Option<Entity>,
    pub value: Variant,
}

impl AcceptInputHook {
    pub fn new(entity: Entity, input: impl Into<String>) -> Self {
        AcceptInputHook {
            entity,
            input: input.into(),
            activator: None,
            caller: None,
            value: Variant::Empty,
        }
    }

    pub fn with_activator(mut self, activator: Entity) -> Self {
        self.activator = Some(activator);
        self
    }

    pub fn with_caller(mut self, caller: Entity) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_value(mut self, value: impl Into<Variant>) -> Self {
        self.value = value.into();
        self
    }
}

/// Set `activator` on fire for `duration` seconds.
#[derive(Event, Debug, Clone, Copy)]
pub struct IgniteRequest {
    pub activator: Entity,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameUiAction {
    Activate,
    Deactivate,
}

impl GameUiAction {
    pub fn from_input(input: &str) -> Option<Self> {
        if input.eq_ignore_ascii_case("Activate") {
            Some(GameUiAction::Activate)
        } else if input.eq_ignore_ascii_case("Deactivate") {
            Some(GameUiAction::Deactivate)
        } else {
            None
        }
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct GameUiInput {
    pub ui: Entity,
    pub activator: Option<Entity>,
    pub action: GameUiAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewControlAction {
    Enable,
    Disable,
    EnableAll,
    DisableAll,
}

impl ViewControlAction {
    pub fn from_input(input: &str) -> Option<Self> {
        [
            ("EnableCamera", ViewControlAction::Enable),
            ("DisableCamera", ViewControlAction::Disable),
            ("EnableCameraAll", ViewControlAction::EnableAll),
            ("DisableCameraAll", ViewControlAction::DisableAll),
        ]
        .into_iter()
        .find(|(name, _)| input.eq_ignore_ascii_case(name))
        .map(|(_, action)| action)
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ViewControlInput {
    pub relay: Entity,
    pub activator: Option<Entity>,
    pub action: ViewControlAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipAction {
    Use,
    TriggerForActivatedPlayer,
    TriggerForAllPlayers,
}

impl EquipAction {
    pub fn from_input(input: &str) -> Option<Self> {
        [
            ("Use", EquipAction::Use),
            ("TriggerForActivatedPlayer", EquipAction::TriggerForActivatedPlayer),
            ("TriggerForAllPlayers", EquipAction::TriggerForAllPlayers),
        ]
        .into_iter()
        .find(|(name, _)| input.eq_ignore_ascii_case(name))
        .map(|(_, action)| action)
    }
}

#[derive(Event, Debug, Clone)]
pub struct EquipInput {
    pub equip: Entity,
    pub activator: Option<Entity>,
    pub action: EquipAction,
    /// Item to hand out after stripping (`TriggerForActivatedPlayer` only).
    pub item: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_names_match_case_insensitively() {
        assert_eq!(
            GameUiAction::from_input("activate"),
            Some(GameUiAction::Activate)
        );
        assert_eq!(
            ViewControlAction::from_input("ENABLECAMERAALL"),
            Some(ViewControlAction::EnableAll)
        );
        assert_eq!(
            EquipAction::from_input("triggerforallplayers"),
            Some(EquipAction::TriggerForAllPlayers)
        );
        assert_eq!(ViewControlAction::from_input("Toggle"), None);
    }
}
