//! Systems bridging the input channel with the ECS message queue.
//!
//! - [`poll_input_edges`] drains the [`InputBridge`] receiver into
//!   `Messages<ButtonEdges>` without blocking.
//! - [`update_input_edges`] advances the message queue once per tick so
//!   edges older than one tick are dropped.
//!
//! Run [`update_input_edges`] before [`poll_input_edges`], and both before
//! any reader of [`ButtonEdges`].

use bevy_ecs::prelude::*;

use crate::events::input::ButtonEdges;
use crate::events::lifecycle::{MapLoad, PlayerDisconnect};
use crate::resources::input::InputBridge;

pub fn poll_input_edges(bridge: Res<InputBridge>, mut writer: MessageWriter<ButtonEdges>) {
    writer.write_batch(bridge.rx.try_iter());
}

pub fn update_input_edges(mut messages: ResMut<Messages<ButtonEdges>>) {
    messages.update();
}

/// A reconnecting player starts from an empty button state.
pub fn input_disconnect_observer(trigger: On<PlayerDisconnect>, bridge: Res<InputBridge>) {
    bridge.forget(trigger.event().player);
}

pub fn input_map_load_observer(_trigger: On<MapLoad>, bridge: Res<InputBridge>) {
    bridge.clear();
}
