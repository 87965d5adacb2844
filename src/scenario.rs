//! Scripted replay of host notifications.
//!
//! Operators validate a configuration root (config file and per-map gravity
//! tables) offline by replaying a JSON scenario against a headless
//! [`Coordinator`]:
//!
//! ```json
//! {
//!   "map": "ze_example",
//!   "players": [1, 2],
//!   "entities": [
//!     { "key": "grav", "designer": "trigger_gravity", "hammer_id": "1204518" },
//!     { "key": "cam", "designer": "info_target", "name": "cam_intro" },
//!     { "key": "relay", "designer": "logic_relay", "script": "point_viewcontrol",
//!       "target": "cam_intro", "spawnflags": 64, "health": 120 }
//!   ],
//!   "steps": [
//!     { "StartTouch": { "trigger": "grav", "other": "player:1" } },
//!     { "AcceptInput": { "entity": "relay", "input": "EnableCamera", "activator": "player:2" } },
//!     { "AcceptInput": { "entity": "player:1", "input": "IgniteLifetime",
//!       "activator": "player:1", "value": { "Float": 2.0 } } },
//!     { "Tick": { "count": 128 } },
//!     "RoundEnd"
//!   ]
//! }
//! ```
//!
//! Entity references are scenario keys, `player:<id>` for a player's pawn or
//! `controller:<id>` for its controller.

use std::fmt;
use std::path::Path;

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::components::gravity::GravityScale;
use crate::components::health::Health;
use crate::components::identity::{DesignerName, EntityName, HammerId, ScriptTag, TargetName};
use crate::components::player::{
    DesiredFov, PawnFlags, PlayerController, PlayerId, VelocityModifier, ViewEntity,
};
use crate::components::spawnflags::SpawnFlags;
use crate::components::transform::AbsTransform;
use crate::coordinator::Coordinator;
use crate::events::acceptinput::AcceptInputHook;
use crate::events::hostcommand::HostCommand;
use crate::resources::config::{ConfigError, read_json};
use crate::resources::input::Key;
use crate::variant::Variant;

/// 64 ticks per second, the simulation's default rate.
pub const DEFAULT_TICK_INTERVAL: f32 = 1.0 / 64.0;

fn default_tick_interval() -> f32 {
    DEFAULT_TICK_INTERVAL
}

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f32,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub players: Vec<u32>,
    #[serde(default)]
    pub entities: Vec<ScenarioEntity>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_json(path)
    }
}

/// A non-player entity to mirror before the replay starts.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioEntity {
    pub key: String,
    pub designer: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub hammer_id: Option<String>,
    #[serde(default)]
    pub spawnflags: u32,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub gravity: Option<f32>,
    #[serde(default)]
    pub origin: Option<Vec3>,
}

#[derive(Debug, Deserialize)]
pub enum Step {
    Tick {
        #[serde(default = "one")]
        count: u32,
    },
    AcceptInput {
        entity: String,
        input: String,
        #[serde(default)]
        activator: Option<String>,
        #[serde(default)]
        value: Variant,
    },
    StartTouch {
        trigger: String,
        other: String,
    },
    EndTouch {
        trigger: String,
        other: String,
    },
    /// Full button mask sample.
    Buttons {
        player: u32,
        mask: u64,
    },
    /// Single key transition.
    Key {
        player: u32,
        key: String,
        pressed: bool,
    },
    PlayerDeath {
        player: u32,
    },
    PlayerDisconnect {
        player: u32,
    },
    Despawn {
        entity: String,
    },
    RoundStart,
    RoundEnd,
    ReloadConfig,
}

#[derive(Debug)]
pub enum ScenarioError {
    UnknownEntity(String),
    UnknownKey(String),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::UnknownEntity(name) => write!(f, "unknown entity reference '{name}'"),
            ScenarioError::UnknownKey(name) => write!(f, "unknown key '{name}'"),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Drives a [`Coordinator`] through a scenario, tracking spawned entities.
pub struct ScenarioRunner {
    coordinator: Coordinator,
    entities: FxHashMap<String, Entity>,
    players: FxHashMap<u32, (Entity, Entity)>,
    tick_interval: f32,
}

impl ScenarioRunner {
    /// Mirror the scenario's players and entities into `coordinator`.
    pub fn new(mut coordinator: Coordinator, scenario: &Scenario) -> Self {
        let mut players = FxHashMap::default();
        for (slot, id) in scenario.players.iter().enumerate() {
            let origin = Vec3::new(slot as f32 * 64.0, 0.0, 0.0);
            players.insert(*id, coordinator.spawn_player(PlayerId(*id), origin));
        }

        let mut entities = FxHashMap::default();
        for mirror in &scenario.entities {
            let entity = coordinator
                .world_mut()
                .spawn((
                    DesignerName::new(mirror.designer.as_str()),
                    SpawnFlags(mirror.spawnflags),
                    AbsTransform::at(mirror.origin.unwrap_or(Vec3::ZERO)),
                ))
                .id();
            {
                let mut mirrored = coordinator.world_mut().entity_mut(entity);
                if let Some(name) = &mirror.name {
                    mirrored.insert(EntityName::new(name.as_str()));
                }
                if let Some(target) = &mirror.target {
                    mirrored.insert(TargetName::new(target.as_str()));
                }
                if let Some(script) = &mirror.script {
                    mirrored.insert(ScriptTag::new(script.as_str()));
                }
                if let Some(id) = &mirror.hammer_id {
                    mirrored.insert(HammerId::new(id.as_str()));
                }
                if let Some(health) = mirror.health {
                    mirrored.insert(Health(health));
                }
                if let Some(scale) = mirror.gravity {
                    mirrored.insert(GravityScale::new(scale));
                }
            }
            coordinator.entity_created(entity);
            entities.insert(mirror.key.clone(), entity);
        }

        ScenarioRunner {
            coordinator,
            entities,
            players,
            tick_interval: scenario.tick_interval,
        }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut Coordinator {
        &mut self.coordinator
    }

    /// Resolve a scenario entity reference.
    pub fn resolve(&self, reference: &str) -> Result<Entity, ScenarioError> {
        let unknown = || ScenarioError::UnknownEntity(reference.to_string());
        if let Some((kind, id)) = reference.split_once(':') {
            let id: u32 = id.parse().map_err(|_| unknown())?;
            let (controller, pawn) = self.players.get(&id).ok_or_else(unknown)?;
            return match kind {
                "player" => Ok(*pawn),
                "controller" => Ok(*controller),
                _ => Err(unknown()),
            };
        }
        self.entities.get(reference).copied().ok_or_else(unknown)
    }

    /// Apply one step and return the commands it produced.
    pub fn run_step(&mut self, step: &Step) -> Result<Vec<HostCommand>, ScenarioError> {
        match step {
            Step::Tick { count } => {
                for _ in 0..*count {
                    self.coordinator.tick(self.tick_interval);
                }
            }
            Step::AcceptInput {
                entity,
                input,
                activator,
                value,
            } => {
                let mut hook = AcceptInputHook::new(self.resolve(entity)?, input.as_str())
                    .with_value(value.clone());
                if let Some(activator) = activator {
                    hook = hook.with_activator(self.resolve(activator)?);
                }
                self.coordinator.accept_input(hook);
            }
            Step::StartTouch { trigger, other } => {
                let (trigger, other) = (self.resolve(trigger)?, self.resolve(other)?);
                self.coordinator.start_touch(trigger, other);
            }
            Step::EndTouch { trigger, other } => {
                let (trigger, other) = (self.resolve(trigger)?, self.resolve(other)?);
                self.coordinator.end_touch(trigger, other);
            }
            Step::Buttons { player, mask } => {
                self.coordinator
                    .input_sender()
                    .submit_buttons(PlayerId(*player), *mask);
            }
            Step::Key {
                player,
                key,
                pressed,
            } => {
                let key = Key::from_name(key).ok_or_else(|| ScenarioError::UnknownKey(key.clone()))?;
                self.coordinator
                    .input_sender()
                    .submit_key(PlayerId(*player), key, *pressed);
            }
            Step::PlayerDeath { player } => self.coordinator.player_death(PlayerId(*player)),
            Step::PlayerDisconnect { player } => {
                self.coordinator.player_disconnect(PlayerId(*player));
                if let Some((controller, pawn)) = self.players.remove(player) {
                    self.coordinator.despawn(pawn);
                    self.coordinator.despawn(controller);
                }
            }
            Step::Despawn { entity } => {
                let target = self.resolve(entity)?;
                self.coordinator.despawn(target);
                self.entities.retain(|_, e| *e != target);
            }
            Step::RoundStart => self.coordinator.round_start(),
            Step::RoundEnd => self.coordinator.round_end(),
            Step::ReloadConfig => self.coordinator.reload_config(),
        }
        Ok(self.coordinator.drain_commands())
    }

    /// Run every step, logging the commands each one produced.
    pub fn run(&mut self, steps: &[Step]) -> Result<usize, ScenarioError> {
        let mut total = 0;
        for (index, step) in steps.iter().enumerate() {
            let commands = self.run_step(step)?;
            for command in &commands {
                info!("[step {index}] {command:?}");
            }
            total += commands.len();
        }
        Ok(total)
    }

    /// Log the effect-relevant state of every player still connected.
    pub fn report(&self) {
        let world = self.coordinator.world();
        let mut ids: Vec<_> = self.players.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let Some((controller, pawn)) = self.players.get(&id).copied() else {
                continue;
            };
            let health = world.get::<Health>(pawn).map(|h| h.0);
            let speed = world.get::<VelocityModifier>(pawn).map(|v| v.0);
            let gravity = world.get::<GravityScale>(pawn).map(|g| g.actual);
            let flags = world.get::<PawnFlags>(pawn).map(|f| f.0);
            let view = world.get::<ViewEntity>(pawn).and_then(|v| v.0);
            let fov = world.get::<DesiredFov>(controller).map(|f| f.0);
            let connected = world.get::<PlayerController>(controller).is_some();
            info!(
                "player {id}: connected={connected} health={health:?} speed={speed:?} \
                 gravity={gravity:?} flags={flags:?} view={view:?} fov={fov:?}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_parse_from_json() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "players": [1],
                "entities": [{ "key": "grav", "designer": "trigger_gravity" }],
                "steps": [
                    { "Tick": {} },
                    { "AcceptInput": { "entity": "player:1", "input": "IgniteLifetime",
                      "activator": "player:1", "value": { "Float": 2.0 } } },
                    "RoundEnd"
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.tick_interval, DEFAULT_TICK_INTERVAL);
        assert_eq!(scenario.steps.len(), 3);
        assert!(matches!(scenario.steps[0], Step::Tick { count: 1 }));
        assert!(matches!(
            &scenario.steps[1],
            Step::AcceptInput { value: Variant::Float(v), .. } if *v == 2.0
        ));
        assert!(matches!(scenario.steps[2], Step::RoundEnd));
    }

    #[test]
    fn references_resolve_players_and_keys() {
        let dir = tempfile::tempdir().unwrap();
        let scenario: Scenario = serde_json::from_str(
            r#"{ "players": [4], "entities": [{ "key": "cam", "designer": "info_target" }] }"#,
        )
        .unwrap();
        let runner = ScenarioRunner::new(Coordinator::new(dir.path()), &scenario);

        let pawn = runner.resolve("player:4").unwrap();
        let controller = runner.resolve("controller:4").unwrap();
        assert_ne!(pawn, controller);
        assert!(runner.resolve("cam").is_ok());
        assert!(runner.resolve("player:5").is_err());
        assert!(runner.resolve("nothing").is_err());
    }
}
