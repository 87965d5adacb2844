//! Coordinator systems and observers.
//!
//! Each effect subsystem keeps its tick systems and its observers together.
//! Observers react to host notifications and to the effect requests routed by
//! [`dispatch`]; tick systems run in the schedule built by
//! [`crate::coordinator::Coordinator`].
//!
//! Submodules overview
//! - [`context`] – shared read-only player lookups
//! - [`dispatch`] – classify accept-input notifications into effect requests
//! - [`equip`] – strip-first item equipping
//! - [`gameui`] – relay button edges to game UI instances
//! - [`gravity`] – touch-scoped gravity override
//! - [`ignite`] – damage over time with burning visual
//! - [`input`] – drain the input bridge into the message queue
//! - [`lifecycle`] – map gravity table and configuration reload
//! - [`time`] – advance simulation time
//! - [`viewcontrol`] – camera override relays

pub mod context;
pub mod dispatch;
pub mod equip;
pub mod gameui;
pub mod gravity;
pub mod ignite;
pub mod input;
pub mod lifecycle;
pub mod time;
pub mod viewcontrol;
