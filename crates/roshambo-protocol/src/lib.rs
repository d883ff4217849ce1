//! Wire protocol for roshambo.
//!
//! This crate defines the language the engine speaks with its clients:
//!
//! - **Types** ([`RoomId`], [`ConnectionId`], [`Choice`], [`RoomSnapshot`],
//!   etc.) — the structures clients ultimately see.
//! - **Events** ([`ClientEvent`], [`ServerEvent`]) — everything that flows
//!   in or out of the engine.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (frames, delivery) and the
//! room engine (game state). It doesn't know about connections being live
//! or rooms existing — it only knows shapes. Tags and field names match
//! the client protocol exactly and are locked down by the tests in each
//! module.

mod events;
mod types;

pub use events::{ClientEvent, ServerEvent};
pub use types::{
    Choice, ConnectionId, GameState, PlayerSnapshot, Recipient, RoomId, RoomSnapshot,
};
