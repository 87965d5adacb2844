//! EntityFix library.
//!
//! Coordinates time-bounded effects on entities of a host simulation:
//! ignite (damage over time), game UI input relays, view-control camera
//! overrides, touch-scoped gravity and strip-first item equipping.
//!
//! The host mirrors its entities into a bevy_ecs world owned by
//! [`coordinator::Coordinator`], forwards notifications, ticks it once per
//! frame, and applies the resulting component changes and
//! [`events::hostcommand::HostCommand`]s.

pub mod components;
pub mod coordinator;
pub mod events;
pub mod resources;
pub mod scenario;
pub mod systems;
pub mod variant;
