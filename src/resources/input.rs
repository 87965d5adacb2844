//! Player button state and the bridge that carries input edges into the tick.
//!
//! The host samples player input wherever its network layer runs, which is
//! not necessarily the thread driving the tick. An [`InputSender`] can be
//! cloned onto that thread: it diffs each sample against the last one seen
//! for the player, and ships the resulting press/release edges as
//! [`ButtonEdges`] over a crossbeam channel. The tick drains the channel into
//! the ECS message queue (see [`crate::systems::input`]).
//!
//! Two host flavours are supported:
//!
//! - full button masks per user command ([`InputSender::submit_buttons`]);
//! - discrete key transitions ([`InputSender::submit_key`]), mapped onto the
//!   same button bits through [`Key::button`].

use std::sync::Arc;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::components::player::PlayerId;
use crate::events::input::ButtonEdges;

pub const IN_ATTACK: u64 = 1 << 0;
pub const IN_JUMP: u64 = 1 << 1;
pub const IN_DUCK: u64 = 1 << 2;
pub const IN_FORWARD: u64 = 1 << 3;
pub const IN_BACK: u64 = 1 << 4;
pub const IN_USE: u64 = 1 << 5;
pub const IN_MOVELEFT: u64 = 1 << 9;
pub const IN_MOVERIGHT: u64 = 1 << 10;
pub const IN_ATTACK2: u64 = 1 << 11;
pub const IN_RELOAD: u64 = 1 << 13;
pub const IN_SPEED: u64 = 1 << 17;
pub const IN_LOOK: u64 = 1 << 28;

/// Buttons relayed to game UIs, in forwarding order, with the name used to
/// build the `Pressed<Name>` / `Unpressed<Name>` values.
pub const RELAYED_BUTTONS: [(u64, &str); 11] = [
    (IN_FORWARD, "Forward"),
    (IN_MOVELEFT, "MoveLeft"),
    (IN_BACK, "Back"),
    (IN_MOVERIGHT, "MoveRight"),
    (IN_ATTACK, "Attack"),
    (IN_ATTACK2, "Attack2"),
    (IN_SPEED, "Speed"),
    (IN_DUCK, "Duck"),
    (IN_USE, "Use"),
    (IN_RELOAD, "Reload"),
    (IN_LOOK, "Look"),
];

/// Keys reported by hosts that deliver discrete key transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Mouse1,
    Mouse2,
    Shift,
    Ctrl,
    E,
    R,
    Alt,
    Space,
}

impl Key {
    /// Button bit the key drives.
    pub fn button(self) -> u64 {
        match self {
            Key::W => IN_FORWARD,
            Key::A => IN_MOVELEFT,
            Key::S => IN_BACK,
            Key::D => IN_MOVERIGHT,
            Key::Mouse1 => IN_ATTACK,
            Key::Mouse2 => IN_ATTACK2,
            Key::Shift => IN_SPEED,
            Key::Ctrl => IN_DUCK,
            Key::E => IN_USE,
            Key::R => IN_RELOAD,
            Key::Alt => IN_LOOK,
            Key::Space => IN_JUMP,
        }
    }

    /// Parse a host key name. Unknown keys are not relayed.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" => Key::W,
            "a" | "a2" => Key::A,
            "s" => Key::S,
            "d" | "d2" => Key::D,
            "mouse1" => Key::Mouse1,
            "mouse2" => Key::Mouse2,
            "shift" | "shift2" => Key::Shift,
            "ctrl" => Key::Ctrl,
            "e" => Key::E,
            "r" => Key::R,
            "alt" | "alt2" => Key::Alt,
            "space" => Key::Space,
            _ => return None,
        };
        Some(key)
    }
}

type LastButtons = Arc<RwLock<FxHashMap<PlayerId, u64>>>;

/// Receiving end of the input bridge, owned by the world.
#[derive(Resource)]
pub struct InputBridge {
    tx: Sender<ButtonEdges>,
    /// Edges waiting to be drained by the tick.
    pub rx: Receiver<ButtonEdges>,
    last_buttons: LastButtons,
}

impl Default for InputBridge {
    fn default() -> Self {
        let (tx, rx) = unbounded::<ButtonEdges>();
        InputBridge {
            tx,
            rx,
            last_buttons: Arc::new(RwLock::new(FxHashMap::default())),
        }
    }
}

impl InputBridge {
    /// A sender that can be moved to another thread.
    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
            last_buttons: Arc::clone(&self.last_buttons),
        }
    }

    /// Forget the player's last sampled buttons.
    pub fn forget(&self, player: PlayerId) {
        self.last_buttons.write().remove(&player);
    }

    /// Forget every player's last sampled buttons.
    pub fn clear(&self) {
        self.last_buttons.write().clear();
    }

    pub fn last_buttons(&self, player: PlayerId) -> Option<u64> {
        self.last_buttons.read().get(&player).copied()
    }
}

/// Cloneable, thread-safe producer of [`ButtonEdges`].
#[derive(Clone)]
pub struct InputSender {
    tx: Sender<ButtonEdges>,
    last_buttons: LastButtons,
}

impl InputSender {
    /// Submit the player's full button mask for this sample.
    ///
    /// Returns the computed edges. Nothing is sent when no button changed.
    pub fn submit_buttons(&self, player: PlayerId, buttons: u64) -> ButtonEdges {
        let last = self
            .last_buttons
            .write()
            .insert(player, buttons)
            .unwrap_or(0);
        let edges = ButtonEdges {
            player,
            pressed: buttons & !last,
            released: last & !buttons,
        };
        self.send(edges);
        edges
    }

    /// Submit a single key transition.
    pub fn submit_key(&self, player: PlayerId, key: Key, pressed: bool) -> ButtonEdges {
        let bit = key.button();
        {
            let mut last = self.last_buttons.write();
            let buttons = last.entry(player).or_insert(0);
            if pressed {
                *buttons |= bit;
            } else {
                *buttons &= !bit;
            }
        }
        let edges = if pressed {
            ButtonEdges {
                player,
                pressed: bit,
                released: 0,
            }
        } else {
            ButtonEdges {
                player,
                pressed: 0,
                released: bit,
            }
        };
        self.send(edges);
        edges
    }

    /// Forget the player's last sampled buttons.
    pub fn forget(&self, player: PlayerId) {
        self.last_buttons.write().remove(&player);
    }

    fn send(&self, edges: ButtonEdges) {
        if edges.is_empty() {
            return;
        }
        // The receiver only goes away with the world; dropping input then is fine.
        let _ = self.tx.send(edges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_diffed_against_last_sample() {
        let bridge = InputBridge::default();
        let sender = bridge.sender();
        let player = PlayerId(3);

        let first = sender.submit_buttons(player, IN_FORWARD | IN_ATTACK);
        assert_eq!(first.pressed, IN_FORWARD | IN_ATTACK);
        assert_eq!(first.released, 0);

        let second = sender.submit_buttons(player, IN_ATTACK | IN_JUMP);
        assert_eq!(second.pressed, IN_JUMP);
        assert_eq!(second.released, IN_FORWARD);

        let drained: Vec<_> = bridge.rx.try_iter().collect();
        assert_eq!(drained, vec![first, second]);
    }

    #[test]
    fn unchanged_sample_sends_nothing() {
        let bridge = InputBridge::default();
        let sender = bridge.sender();
        sender.submit_buttons(PlayerId(1), IN_USE);
        sender.submit_buttons(PlayerId(1), IN_USE);
        assert_eq!(bridge.rx.try_iter().count(), 1);
    }

    #[test]
    fn forget_resets_the_baseline() {
        let bridge = InputBridge::default();
        let sender = bridge.sender();
        sender.submit_buttons(PlayerId(1), IN_USE);
        bridge.forget(PlayerId(1));
        assert_eq!(bridge.last_buttons(PlayerId(1)), None);
        let edges = sender.submit_buttons(PlayerId(1), IN_USE);
        assert_eq!(edges.pressed, IN_USE);
    }

    #[test]
    fn key_transitions_update_the_shared_mask() {
        let bridge = InputBridge::default();
        let sender = bridge.sender();
        let player = PlayerId(2);
        sender.submit_key(player, Key::W, true);
        sender.submit_key(player, Key::Space, true);
        assert_eq!(bridge.last_buttons(player), Some(IN_FORWARD | IN_JUMP));
        let edges = sender.submit_key(player, Key::W, false);
        assert_eq!(edges.released, IN_FORWARD);
        assert_eq!(bridge.last_buttons(player), Some(IN_JUMP));
    }

    #[test]
    fn key_names_map_alternates() {
        assert_eq!(Key::from_name("A2"), Some(Key::A));
        assert_eq!(Key::from_name("SPACE"), Some(Key::Space));
        assert_eq!(Key::from_name("F5"), None);
    }

    #[test]
    fn sender_works_from_another_thread() {
        let bridge = InputBridge::default();
        let sender = bridge.sender();
        std::thread::spawn(move || {
            sender.submit_buttons(PlayerId(9), IN_RELOAD);
        })
        .join()
        .unwrap();
        assert_eq!(bridge.rx.try_iter().count(), 1);
    }
}
