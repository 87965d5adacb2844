//! Per-entity gravity multiplier.

use bevy_ecs::prelude::Component;

/// Neutral gravity scale.
pub const DEFAULT_GRAVITY_SCALE: f32 = 1.0;

/// Gravity scale as the simulation stores it.
///
/// `desired` is the networked value, `actual` the value the movement code
/// interpolates towards. Writing only `desired` lets the simulation smooth
/// the change over several frames, so overrides write both.
///
/// On `trigger_gravity` volumes `desired` holds the map-configured scale.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GravityScale {
    pub desired: f32,
    pub actual: f32,
}

impl Default for GravityScale {
    fn default() -> Self {
        GravityScale::new(DEFAULT_GRAVITY_SCALE)
    }
}

impl GravityScale {
    pub fn new(scale: f32) -> Self {
        GravityScale {
            desired: scale,
            actual: scale,
        }
    }

    /// Set both fields at once.
    pub fn set(&mut self, scale: f32) {
        self.desired = scale;
        self.actual = scale;
    }
}
