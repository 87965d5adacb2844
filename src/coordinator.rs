//! The coordinator: one world, one tick schedule, one method per host hook.
//!
//! The host owns the simulation. It mirrors the entities this crate cares
//! about into [`Coordinator::world_mut`], forwards its notifications through
//! the methods below, calls [`Coordinator::tick`] once per simulation frame,
//! and after each call applies:
//!
//! - the [`HostCommand`]s returned by [`Coordinator::drain_commands`];
//! - the component changes made by the coordinator (health, velocity
//!   modifier, gravity scale, view entity, field of view, pawn flags, attack
//!   cooldowns), found with `Changed<T>` queries.
//!
//! Entities must be announced with [`Coordinator::entity_deleted`] before the
//! host despawns them, so effects keyed to them can be undone while their
//! components are still readable. [`Coordinator::despawn`] does both.
//!
//! Player input may be submitted from another thread through the
//! [`InputSender`] returned by [`Coordinator::input_sender`].

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;

use crate::components::gravity::GravityScale;
use crate::components::health::Health;
use crate::components::identity::{DESIGNER_PLAYER, DESIGNER_PLAYER_CONTROLLER, DesignerName};
use crate::components::player::{
    ActiveWeapon, DesiredFov, LifeState, PawnFlags, PlayerController, PlayerId, PlayerPawn,
    VelocityModifier, ViewEntity,
};
use crate::components::transform::AbsTransform;
use crate::events::acceptinput::AcceptInputHook;
use crate::events::hostcommand::HostCommand;
use crate::events::input::ButtonEdges;
use crate::events::lifecycle::{
    EntityCreated, EntityDeleted, MapLoad, PlayerDeath, PlayerDisconnect, ReloadConfig, RoundEnd,
    RoundStart,
};
use crate::events::touch::{EndTouch, StartTouch};
use crate::resources::config::{ConfigRoot, EntityFixConfig};
use crate::resources::gameui::GameUiRegistry;
use crate::resources::ignite::{IgniteRecord, IgniteRegistry};
use crate::resources::input::{InputBridge, InputSender};
use crate::resources::mapgravity::MapGravity;
use crate::resources::registry::SharedRegistry;
use crate::resources::viewcontrol::ViewControlRegistry;
use crate::resources::worldtime::WorldTime;
use crate::systems::dispatch::accept_input_observer;
use crate::systems::equip::equip_input_observer;
use crate::systems::gameui::{
    gameui_disconnect_observer, gameui_entity_deleted_observer, gameui_input_observer,
    gameui_map_load_observer, gameui_player_death_observer, gameui_relay_system,
    gameui_round_end_observer, gameui_sweep_system,
};
use crate::systems::gravity::{gravity_end_touch_observer, gravity_start_touch_observer};
use crate::systems::ignite::{
    ignite_disconnect_observer, ignite_entity_deleted_observer, ignite_map_load_observer,
    ignite_request_observer, ignite_round_end_observer, ignite_round_start_observer,
    ignite_tick_system,
};
use crate::systems::input::{
    input_disconnect_observer, input_map_load_observer, poll_input_edges, update_input_edges,
};
use crate::systems::lifecycle::{map_load_observer, reload_config_observer, round_start_observer};
use crate::systems::time::update_world_time;
use crate::systems::viewcontrol::{
    viewcontrol_disconnect_observer, viewcontrol_entity_created_observer,
    viewcontrol_entity_deleted_observer, viewcontrol_input_observer,
    viewcontrol_map_load_observer, viewcontrol_player_death_observer,
    viewcontrol_refresh_system, viewcontrol_round_end_observer,
};

/// Starting health of pawns spawned through [`Coordinator::spawn_player`].
pub const DEFAULT_PLAYER_HEALTH: i32 = 100;

pub struct Coordinator {
    world: World,
    tick: Schedule,
}

impl Coordinator {
    /// Build a coordinator reading its configuration below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = ConfigRoot(root.into());
        let mut world = World::new();

        world.insert_resource(EntityFixConfig::load_or_default(&root));
        world.insert_resource(root);
        world.insert_resource(WorldTime::default());
        world.insert_resource(MapGravity::default());
        world.insert_resource(IgniteRegistry::default());
        world.insert_resource(GameUiRegistry::default());
        world.insert_resource(ViewControlRegistry::default());
        world.insert_resource(InputBridge::default());
        world.init_resource::<Messages<HostCommand>>();
        world.init_resource::<Messages<ButtonEdges>>();

        // Routing
        world.spawn(Observer::new(accept_input_observer));
        world.spawn(Observer::new(ignite_request_observer));
        world.spawn(Observer::new(gameui_input_observer));
        world.spawn(Observer::new(viewcontrol_input_observer));
        world.spawn(Observer::new(equip_input_observer));
        world.spawn(Observer::new(gravity_start_touch_observer));
        world.spawn(Observer::new(gravity_end_touch_observer));
        // Ignite lifecycle
        world.spawn(Observer::new(ignite_disconnect_observer));
        world.spawn(Observer::new(ignite_round_start_observer));
        world.spawn(Observer::new(ignite_round_end_observer));
        world.spawn(Observer::new(ignite_map_load_observer));
        world.spawn(Observer::new(ignite_entity_deleted_observer));
        // Game UI lifecycle
        world.spawn(Observer::new(gameui_player_death_observer));
        world.spawn(Observer::new(gameui_disconnect_observer));
        world.spawn(Observer::new(gameui_round_end_observer));
        world.spawn(Observer::new(gameui_map_load_observer));
        world.spawn(Observer::new(gameui_entity_deleted_observer));
        // View control lifecycle
        world.spawn(Observer::new(viewcontrol_entity_created_observer));
        world.spawn(Observer::new(viewcontrol_entity_deleted_observer));
        world.spawn(Observer::new(viewcontrol_player_death_observer));
        world.spawn(Observer::new(viewcontrol_disconnect_observer));
        world.spawn(Observer::new(viewcontrol_round_end_observer));
        world.spawn(Observer::new(viewcontrol_map_load_observer));
        // Level
        world.spawn(Observer::new(input_disconnect_observer));
        world.spawn(Observer::new(input_map_load_observer));
        world.spawn(Observer::new(map_load_observer));
        world.spawn(Observer::new(round_start_observer));
        world.spawn(Observer::new(reload_config_observer));
        // Ensure the observers are registered before anything is triggered.
        world.flush();

        let mut tick = Schedule::default();
        tick.add_systems(
            (
                // Input must be drained before game UIs relay it
                update_input_edges,
                poll_input_edges,
                gameui_sweep_system,
                gameui_relay_system,
                ignite_tick_system,
                viewcontrol_refresh_system,
            )
                .chain(),
        );

        Coordinator { world, tick }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Advance time by `dt` seconds and run every periodic effect.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.tick.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Take every command written since the last drain, oldest first.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        self.world
            .resource_mut::<Messages<HostCommand>>()
            .drain()
            .collect()
    }

    /// Producer for player input, usable from any thread.
    pub fn input_sender(&self) -> InputSender {
        self.world.resource::<InputBridge>().sender()
    }

    /// Shared handle to the ignite records, usable from any thread.
    pub fn ignite_handle(&self) -> SharedRegistry<PlayerId, IgniteRecord> {
        self.world.resource::<IgniteRegistry>().handle()
    }

    /// Mirror a new host entity and announce it.
    pub fn spawn(&mut self, bundle: impl Bundle) -> Entity {
        let entity = self.world.spawn(bundle).id();
        self.entity_created(entity);
        entity
    }

    /// Announce the deletion of `entity`, then remove it from the world.
    pub fn despawn(&mut self, entity: Entity) {
        self.entity_deleted(entity);
        self.world.despawn(entity);
    }

    /// Mirror a connected player: a controller and an alive pawn at `origin`.
    ///
    /// Returns `(controller, pawn)`.
    pub fn spawn_player(&mut self, player: PlayerId, origin: Vec3) -> (Entity, Entity) {
        let controller = self.spawn((
            DesignerName::new(DESIGNER_PLAYER_CONTROLLER),
            PlayerController { player, pawn: None },
            DesiredFov::default(),
        ));
        let pawn = self.spawn((
            DesignerName::new(DESIGNER_PLAYER),
            PlayerPawn { player, controller },
            LifeState::Alive,
            Health(DEFAULT_PLAYER_HEALTH),
            PawnFlags::default(),
            VelocityModifier::default(),
            ViewEntity::default(),
            ActiveWeapon::default(),
            GravityScale::default(),
            AbsTransform::at(origin),
        ));
        if let Some(mut mirrored) = self.world.get_mut::<PlayerController>(controller) {
            mirrored.pawn = Some(pawn);
        }
        (controller, pawn)
    }

    pub fn accept_input(&mut self, hook: AcceptInputHook) {
        self.world.trigger(hook);
        self.world.flush();
    }

    pub fn entity_created(&mut self, entity: Entity) {
        self.world.trigger(EntityCreated { entity });
        self.world.flush();
    }

    pub fn entity_deleted(&mut self, entity: Entity) {
        self.world.trigger(EntityDeleted { entity });
        self.world.flush();
    }

    pub fn start_touch(&mut self, trigger: Entity, other: Entity) {
        self.world.trigger(StartTouch { trigger, other });
        self.world.flush();
    }

    pub fn end_touch(&mut self, trigger: Entity, other: Entity) {
        self.world.trigger(EndTouch { trigger, other });
        self.world.flush();
    }

    pub fn player_death(&mut self, player: PlayerId) {
        self.world.trigger(PlayerDeath { player });
        self.world.flush();
    }

    pub fn player_disconnect(&mut self, player: PlayerId) {
        self.world.trigger(PlayerDisconnect { player });
        self.world.flush();
    }

    pub fn round_start(&mut self) {
        self.world.trigger(RoundStart);
        self.world.flush();
    }

    pub fn round_end(&mut self) {
        self.world.trigger(RoundEnd);
        self.world.flush();
    }

    pub fn map_load(&mut self, map: &str) {
        info!("Starting map {map}");
        self.world.trigger(MapLoad {
            map: map.to_string(),
        });
        self.world.flush();
    }

    pub fn reload_config(&mut self) {
        self.world.trigger(ReloadConfig);
        self.world.flush();
    }
}
