//! ECS components mirrored from, or spawned into, the host simulation.
//!
//! The host inserts these on the entities it mirrors; the coordinator reads
//! identity and configuration components and writes state components, which
//! the host syncs back through change detection.
//!
//! Submodules overview:
//! - [`entityref`] – revalidatable handle stored in effect records
//! - [`gravity`] – desired/actual gravity scale pair
//! - [`health`] – hit points (also the FOV field of view-control relays)
//! - [`identity`] – designer name, entity name, target, script tag, hammer id
//! - [`particle`] – description of a spawned particle system
//! - [`player`] – controller/pawn pair, life state, pawn flags, camera, speed
//! - [`spawnflags`] – map-authored behavior bits and their meanings
//! - [`transform`] – absolute origin, rotation and velocity
//! - [`weapon`] – attack cooldown ticks

pub mod entityref;
pub mod gravity;
pub mod health;
pub mod identity;
pub mod particle;
pub mod player;
pub mod spawnflags;
pub mod transform;
pub mod weapon;
