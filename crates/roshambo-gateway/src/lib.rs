//! Session gateway for roshambo.
//!
//! The gateway is the boundary between transport and the engine: it
//! registers connections with their outbound channels, translates inbound
//! [`ClientEvent`]s into registry operations, and answers the requester
//! directly where the protocol calls for it (`error` replies). Room-wide
//! broadcasts come from the rooms themselves, through the senders
//! registered here — the gateway never sees them.
//!
//! [`ClientEvent`]: roshambo_protocol::ClientEvent

mod gateway;

pub use gateway::SessionGateway;
