//! Touch-scoped gravity override for `trigger_gravity` volumes.
//!
//! No state is kept between touches: start-touch writes the resolved scale on
//! the player's pawn, end-touch writes `1.0` back. Overlapping triggers are
//! not counted, so leaving the inner of two nested volumes restores normal
//! gravity while the player is still inside the outer one.
//!
//! Any live pawn qualifies whatever its life state, so a pawn that dies inside
//! a volume still gets `1.0` back when it leaves.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::gravity::{DEFAULT_GRAVITY_SCALE, GravityScale};
use crate::components::identity::{DESIGNER_TRIGGER_GRAVITY, DesignerName, HammerId};
use crate::components::player::PlayerPawn;
use crate::events::touch::{EndTouch, StartTouch};
use crate::resources::mapgravity::MapGravity;
use crate::systems::context::Players;

/// Scale used when neither the map table nor the trigger provides one.
pub const FALLBACK_TRIGGER_GRAVITY: f32 = 0.01;

/// Gravity scale a trigger imposes: the map table entry for its hammer id,
/// else its own configured scale when positive, else
/// [`FALLBACK_TRIGGER_GRAVITY`].
pub fn resolve_trigger_gravity(
    table: &MapGravity,
    hammer_id: Option<&HammerId>,
    own_scale: Option<&GravityScale>,
) -> f32 {
    hammer_id
        .and_then(|id| table.lookup(&id.0))
        .or_else(|| own_scale.map(|scale| scale.desired).filter(|s| *s > 0.0))
        .unwrap_or(FALLBACK_TRIGGER_GRAVITY)
}

fn is_gravity_trigger(names: &Query<&DesignerName>, entity: Entity) -> bool {
    names
        .get(entity)
        .is_ok_and(|name| name.is(DESIGNER_TRIGGER_GRAVITY))
}

pub fn gravity_start_touch_observer(
    trigger: On<StartTouch>,
    players: Players,
    table: Res<MapGravity>,
    triggers: Query<(Option<&HammerId>, Option<&GravityScale>), Without<PlayerPawn>>,
    mut scales: Query<&mut GravityScale, With<PlayerPawn>>,
) {
    let touch = trigger.event();
    if !is_gravity_trigger(&players.live, touch.trigger) || !players.is_live(touch.other) {
        return;
    }
    let Ok((hammer_id, own_scale)) = triggers.get(touch.trigger) else {
        return;
    };
    let scale = resolve_trigger_gravity(&table, hammer_id, own_scale);
    if let Ok(mut gravity) = scales.get_mut(touch.other) {
        gravity.set(scale);
        debug!("gravity: {:?} entered {:?}, scale {scale}", touch.other, touch.trigger);
    }
}

pub fn gravity_end_touch_observer(
    trigger: On<EndTouch>,
    players: Players,
    mut scales: Query<&mut GravityScale, With<PlayerPawn>>,
) {
    let touch = trigger.event();
    if !is_gravity_trigger(&players.live, touch.trigger) || !players.is_live(touch.other) {
        return;
    }
    if let Ok(mut gravity) = scales.get_mut(touch.other) {
        gravity.set(DEFAULT_GRAVITY_SCALE);
        debug!("gravity: {:?} left {:?}", touch.other, touch.trigger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_prefers_table_then_own_scale_then_fallback() {
        let table = MapGravity::with_table("ze_test", &[("42", 0.2)]);
        let own = GravityScale::new(0.5);

        let id = HammerId::new("42");
        assert_eq!(resolve_trigger_gravity(&table, Some(&id), Some(&own)), 0.2);

        let other = HammerId::new("43");
        assert_eq!(resolve_trigger_gravity(&table, Some(&other), Some(&own)), 0.5);

        let zero = GravityScale::new(0.0);
        assert_eq!(
            resolve_trigger_gravity(&table, Some(&other), Some(&zero)),
            FALLBACK_TRIGGER_GRAVITY
        );
        assert_eq!(
            resolve_trigger_gravity(&table, None, None),
            FALLBACK_TRIGGER_GRAVITY
        );
    }
}
