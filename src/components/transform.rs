//! Absolute world-space placement of an entity.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Absolute origin, rotation (pitch/yaw/roll in degrees) and velocity.
///
/// The ignite visual copies this from its victim every time it is
/// repositioned, so the effect follows a moving player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct AbsTransform {
    pub origin: Vec3,
    pub rotation: Vec3,
    pub velocity: Vec3,
}

impl AbsTransform {
    pub fn at(origin: Vec3) -> Self {
        AbsTransform {
            origin,
            ..Default::default()
        }
    }
}
