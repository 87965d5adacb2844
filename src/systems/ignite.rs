//! Ignite: damage over time with a burning visual and compounding slowdown.
//!
//! - [`ignite_request_observer`] starts or extends an effect.
//! - [`ignite_tick_system`] applies damage on each due tick and expires
//!   records whose victim is gone or whose time ran out.
//! - The lifecycle observers extinguish records at round and player
//!   boundaries.
//!
//! Records are keyed by [`PlayerId`], so triggering an already burning player
//! extends the running effect instead of stacking a second one.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;

use crate::components::entityref::EntityRef;
use crate::components::health::Health;
use crate::components::identity::{DESIGNER_PARTICLE_SYSTEM, DesignerName};
use crate::components::particle::ParticleSystem;
use crate::components::player::{PlayerId, PlayerPawn, VelocityModifier};
use crate::components::transform::AbsTransform;
use crate::events::acceptinput::IgniteRequest;
use crate::events::hostcommand::HostCommand;
use crate::events::lifecycle::{EntityDeleted, MapLoad, PlayerDisconnect, RoundEnd, RoundStart};
use crate::resources::config::EntityFixConfig;
use crate::resources::ignite::{IgniteRecord, IgniteRegistry};
use crate::resources::worldtime::WorldTime;
use crate::systems::context::Players;

/// Everything needed to light and extinguish burning players.
#[derive(SystemParam)]
pub struct Burners<'w, 's> {
    registry: Res<'w, IgniteRegistry>,
    velocities: Query<'w, 's, &'static mut VelocityModifier>,
    particles:
        Query<'w, 's, &'static mut AbsTransform, (With<ParticleSystem>, Without<PlayerPawn>)>,
    commands: Commands<'w, 's>,
    host: MessageWriter<'w, HostCommand>,
}

impl Burners<'_, '_> {
    /// Start burning `pawn`, or extend its running effect to `end_time`.
    pub fn ignite(
        &mut self,
        player: PlayerId,
        pawn: Entity,
        origin: AbsTransform,
        end_time: f64,
        next_tick_time: f64,
        particle: &str,
    ) {
        let shared = self.registry.handle();
        let replaced = {
            let mut records = shared.write();
            match records.get(&player).map(|record| record.victim.entity()) {
                Some(victim) if victim == pawn => {
                    if let Some(record) = records.get_mut(&player) {
                        record.extend_to(end_time);
                        debug!("ignite: extended {player:?} until {:.2}", record.end_time);
                    }
                    return;
                }
                // Left over from a previous pawn of the same player.
                Some(_) => records.remove(&player),
                None => None,
            }
        };
        if let Some(stale) = replaced {
            self.extinguish(stale);
        }

        let effect = self
            .commands
            .spawn((
                DesignerName::new(DESIGNER_PARTICLE_SYSTEM),
                ParticleSystem::burning(particle),
                AbsTransform {
                    velocity: glam::Vec3::ZERO,
                    ..origin
                },
            ))
            .id();
        self.host.write(HostCommand::Spawn { entity: effect });

        shared.write().insert(
            player,
            IgniteRecord {
                victim: EntityRef::new(pawn),
                attached_effect: Some(EntityRef::new(effect)),
                end_time,
                next_tick_time,
            },
        );
        debug!("ignite: {player:?} burning until {end_time:.2}");
    }

    /// Undo a record's side effects: neutral speed, visual stopped and removed.
    pub fn extinguish(&mut self, record: IgniteRecord) {
        if let Ok(mut velocity) = self.velocities.get_mut(record.victim.entity()) {
            velocity.0 = 1.0;
        }
        if let Some(effect) = record.attached_effect {
            let effect = effect.entity();
            if self.particles.contains(effect) {
                self.host
                    .write(HostCommand::accept_input(effect, "Stop", None, None, None));
                self.host.write(HostCommand::Remove { entity: effect });
                self.commands.entity(effect).try_despawn();
            }
        }
    }

    pub fn extinguish_player(&mut self, player: PlayerId) {
        let removed = self.registry.0.remove(&player);
        if let Some(record) = removed {
            debug!("ignite: extinguished {player:?}");
            self.extinguish(record);
        }
    }

    pub fn extinguish_all(&mut self) {
        let records = self.registry.0.write().reset();
        for (_, record) in records {
            self.extinguish(record);
        }
    }
}

/// Start or extend an ignite on the activating player.
///
/// Ignored unless the activator resolves to a live, alive player pawn.
pub fn ignite_request_observer(
    trigger: On<IgniteRequest>,
    players: Players,
    time: Res<WorldTime>,
    config: Res<EntityFixConfig>,
    transforms: Query<&AbsTransform, With<PlayerPawn>>,
    mut burners: Burners,
) {
    let request = trigger.event();
    let Some((player, pawn)) = players.alive_player_of(request.activator) else {
        debug!("ignite: activator {:?} is not an alive player", request.activator);
        return;
    };
    let origin = transforms.get(pawn).copied().unwrap_or_default();
    burners.ignite(
        player,
        pawn,
        origin,
        time.after(request.duration),
        time.after(config.ignite_repeat),
        &config.ignite_particle,
    );
}

/// Advance every due ignite record by one damage step, or expire it.
pub fn ignite_tick_system(
    time: Res<WorldTime>,
    config: Res<EntityFixConfig>,
    players: Players,
    mut burners: Burners,
    mut healths: Query<&mut Health>,
    pawn_transforms: Query<&AbsTransform, With<PlayerPawn>>,
) {
    let now = time.elapsed;
    let shared = burners.registry.handle();
    let mut expired = Vec::new();
    {
        let mut records = shared.write();
        for player in records.find_keys(|_, record| now >= record.next_tick_time) {
            let Some(record) = records.get_mut(&player) else {
                continue;
            };
            let victim = record.victim.entity();
            if !players.is_alive(victim) || now >= record.end_time {
                if let Some(record) = records.remove(&player) {
                    expired.push((player, record));
                }
                continue;
            }

            if let (Some(effect), Ok(origin)) =
                (record.attached_effect, pawn_transforms.get(victim))
            {
                if let Ok(mut transform) = burners.particles.get_mut(effect.entity()) {
                    transform.origin = origin.origin;
                    transform.rotation = origin.rotation;
                    burners.host.write(HostCommand::Teleport {
                        entity: effect.entity(),
                        origin: origin.origin,
                        rotation: origin.rotation,
                    });
                }
            }
            if let Ok(mut velocity) = burners.velocities.get_mut(victim) {
                velocity.0 *= config.ignite_velocity;
            }
            if let Ok(mut health) = healths.get_mut(victim) {
                health.0 -= config.ignite_damage;
                if health.0 <= 0 {
                    debug!("ignite: {player:?} burned to death");
                    burners.host.write(HostCommand::CommitSuicide { pawn: victim });
                }
            }
            record.next_tick_time += f64::from(config.ignite_repeat);
        }
    }
    for (player, record) in expired {
        debug!("ignite: {player:?} expired");
        burners.extinguish(record);
    }
}

pub fn ignite_disconnect_observer(trigger: On<PlayerDisconnect>, mut burners: Burners) {
    burners.extinguish_player(trigger.event().player);
}

pub fn ignite_round_start_observer(_trigger: On<RoundStart>, mut burners: Burners) {
    burners.extinguish_all();
}

pub fn ignite_round_end_observer(_trigger: On<RoundEnd>, mut burners: Burners) {
    burners.extinguish_all();
}

/// A new map has no entities left to clean up; just forget every record.
pub fn ignite_map_load_observer(_trigger: On<MapLoad>, registry: Res<IgniteRegistry>) {
    registry.0.write().reset();
}

/// Forget the visual of a record when the host destroys it first.
pub fn ignite_entity_deleted_observer(
    trigger: On<EntityDeleted>,
    registry: Res<IgniteRegistry>,
) {
    let deleted = trigger.event().entity;
    let mut records = registry.0.write();
    for (_, record) in records.iter_mut() {
        if record
            .attached_effect
            .is_some_and(|effect| effect.entity() == deleted)
        {
            record.attached_effect = None;
        }
    }
}
