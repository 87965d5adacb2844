//! Event and message types exchanged with the host and between subsystems.
//!
//! Inbound notifications are bevy observer events the host triggers on the
//! coordinator world. Outbound actions are [`hostcommand::HostCommand`]
//! messages the host drains.
//!
//! Submodules:
//! - [`acceptinput`] – accept-input hook and the effect requests routed from it
//! - [`hostcommand`] – actions the host must carry out
//! - [`input`] – per-player button edges
//! - [`lifecycle`] – entity, player, round and map boundaries
//! - [`touch`] – start/end touch between a volume and another entity
pub mod acceptinput;
pub mod hostcommand;
pub mod input;
pub mod lifecycle;
pub mod touch;
