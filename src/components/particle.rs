//! Particle system entity spawned by the coordinator.

use bevy_ecs::prelude::Component;

/// Description of an `info_particle_system` the host should instantiate.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    /// Resource path of the effect.
    pub effect_name: String,
    /// Control point receiving the tint color.
    pub tint_cp: i32,
    /// RGBA tint.
    pub tint: [u8; 4],
    /// Start emitting as soon as it spawns.
    pub start_active: bool,
}

impl ParticleSystem {
    /// Red-tinted, self-starting effect used by ignite.
    pub fn burning(effect_name: impl Into<String>) -> Self {
        ParticleSystem {
            effect_name: effect_name.into(),
            tint_cp: 1,
            tint: [255, 0, 0, 255],
            start_active: true,
        }
    }
}
