//! Room lifecycle and game rules for roshambo.
//!
//! Each room runs as an isolated Tokio task (actor model) owning its own
//! [`Room`] state machine, so all access to a room's state is serialized
//! without shared locks. The [`RoomRegistry`] creates rooms, routes
//! events to them by connection identity, and tears them down when they
//! empty.
//!
//! # Key types
//!
//! - [`Room`] — the pure per-room state machine
//! - [`RoomRegistry`] — creates/destroys rooms, routes connections
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`resolve`] / [`Outcome`] — the dominance relation between choices
//! - [`RoomConfig`] — room settings (round limit)

mod actor;
mod config;
mod error;
mod outcome;
mod registry;
mod room;

pub use actor::{OutboundSender, RoomHandle};
pub use config::RoomConfig;
pub use error::RoomError;
pub use outcome::{Outcome, resolve};
pub use registry::RoomRegistry;
pub use room::{Room, RoomEvents};
