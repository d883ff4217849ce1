//! Inbound and outbound event enums.
//!
//! [`ClientEvent`] is what the transport layer hands the gateway after
//! decoding an inbound frame; [`ServerEvent`] is what the engine emits
//! for delivery. Both use internally tagged JSON (`#[serde(tag = "type")]`),
//! so a create request looks like:
//!
//! ```json
//! { "type": "createRoom", "playerName": "Alice" }
//! ```
//!
//! and a snapshot broadcast carries the room fields next to the tag:
//!
//! ```json
//! { "type": "roomUpdate", "players": [...], "gameState": "waiting", ... }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Choice, ConnectionId, PlayerSnapshot, RoomId, RoomSnapshot};

// ---------------------------------------------------------------------------
// ClientEvent — everything a client can ask for
// ---------------------------------------------------------------------------

/// An inbound request from a client.
///
/// Disconnects are not an event here — they come from the connection
/// lifecycle itself and carry no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// "Open a new room for me." Replies with `roomCreated`.
    #[serde(rename_all = "camelCase")]
    CreateRoom { player_name: String },

    /// "Seat me in this room." Replies with `error` on a bad or full code.
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: RoomId, player_name: String },

    /// "This is my move for the current round."
    MakeChoice { choice: Choice },
}

// ---------------------------------------------------------------------------
// ServerEvent — everything the engine can announce
// ---------------------------------------------------------------------------

/// An outbound event for presentation to render.
///
/// Round-result and game-over events for the same resolution are always
/// delivered before the trailing `roomUpdate`, in that order, so a client
/// never sees a score move out of step with the round counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Reply to the creator: the join code of their new room.
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: RoomId },

    /// The canonical room snapshot, broadcast after every state change.
    RoomUpdate(RoomSnapshot),

    /// One round resolved. Captured before choices reset, so both moves
    /// are still visible; `winner` is `None` on a tie.
    RoundResult {
        winner: Option<ConnectionId>,
        player1: PlayerSnapshot,
        player2: PlayerSnapshot,
        round: u32,
    },

    /// The round limit was reached; final scores, choices cleared.
    GameOver {
        player1: PlayerSnapshot,
        player2: PlayerSnapshot,
    },

    /// A member left; the snapshot shows who remains.
    PlayerLeft(RoomSnapshot),

    /// A user-facing failure, reported to the requester only.
    Error { message: String },
}

// =========================================================================
// Tests
// =========================================================================
