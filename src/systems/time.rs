//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per host tick.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed seconds, delta and tick counter on the `WorldTime` resource.
///
/// `dt` is the host's tick interval in seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += f64::from(dt);
    wt.delta = dt;
    wt.tick = wt.tick.wrapping_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_accumulates_and_tick_wraps() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            tick: u32::MAX,
            ..WorldTime::default()
        });

        update_world_time(&mut world, 0.25);
        update_world_time(&mut world, 0.5);

        let time = world.resource::<WorldTime>();
        assert_eq!(time.elapsed, 0.75);
        assert_eq!(time.delta, 0.5);
        assert_eq!(time.tick, 1);
    }
}
