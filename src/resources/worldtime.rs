use bevy_ecs::prelude::Resource;

/// Simulation clock advanced once per host tick.
///
/// `elapsed` is the timestamp effect records compare against. It is kept in
/// `f64` because a server map can run for hours and `f32` seconds lose
/// sub-tick precision long before that.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Seconds since the coordinator started.
    pub elapsed: f64,
    /// Seconds covered by the current tick.
    pub delta: f32,
    /// Server tick counter, used for weapon attack timing.
    pub tick: u32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            tick: 0,
        }
    }
}

impl WorldTime {
    /// Timestamp `seconds` from now.
    pub fn after(&self, seconds: f32) -> f64 {
        self.elapsed + f64::from(seconds)
    }
}
