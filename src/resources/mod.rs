//! ECS resources held by the coordinator world.
//!
//! This module groups the long-lived state injected into the world: effect
//! registries, configuration, the simulation clock and the input bridge.
//! Each submodule documents the semantics and intended usage of its
//! resource(s).
//!
//! Overview
//! - `config` – plugin parameters, config root and load errors
//! - `gameui` – game UI relay records
//! - `ignite` – shared damage-over-time records keyed by player
//! - `input` – button bits, key mapping and the cross-thread input bridge
//! - `mapgravity` – per-map gravity table keyed by hammer id
//! - `registry` – generic keyed record store and its shared variant
//! - `viewcontrol` – camera override records
//! - `worldtime` – simulation time, delta and tick counter
pub mod config;
pub mod gameui;
pub mod ignite;
pub mod input;
pub mod mapgravity;
pub mod registry;
pub mod viewcontrol;
pub mod worldtime;
