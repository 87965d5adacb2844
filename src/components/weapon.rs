//! Weapon attack timing.

use bevy_ecs::prelude::Component;

/// Server ticks before which a weapon may not fire again.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackCooldown {
    pub next_primary_tick: u32,
    pub next_secondary_tick: u32,
}

impl AttackCooldown {
    /// Push both attack ticks forward to at least `tick`. Never moves them back.
    pub fn floor_at(&mut self, tick: u32) {
        self.next_primary_tick = self.next_primary_tick.max(tick);
        self.next_secondary_tick = self.next_secondary_tick.max(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_at_only_moves_forward() {
        let mut cooldown = AttackCooldown {
            next_primary_tick: 100,
            next_secondary_tick: 10,
        };
        cooldown.floor_at(50);
        assert_eq!(cooldown.next_primary_tick, 100);
        assert_eq!(cooldown.next_secondary_tick, 50);
    }
}
