//! Core protocol types: identities, choices, and room snapshots.
//!
//! Everything here is observable by clients, so the serde attributes are
//! load-bearing: field names and value spellings are part of the client
//! protocol and must not drift.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque identifier for a client's live transport session.
///
/// The transport layer mints these; the engine never interprets the value,
/// it only uses the token as the key linking a player to a room. A new
/// connection means a new identity — there is no resume.
///
/// `#[serde(transparent)]` serializes this as the bare number, so a
/// `ConnectionId(42)` is just `42` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A room's join code: six uppercase alphanumeric characters.
///
/// Short enough to read out loud to the person you want to play against.
/// The registry generates these and guarantees uniqueness among live
/// rooms; a destroyed room's code becomes reusable immediately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Wraps an existing code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Choice
// ---------------------------------------------------------------------------

/// A player's move for one round.
///
/// Serializes lowercase (`"rock"`, `"paper"`, `"scissors"`) to match what
/// clients send in `makeChoice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The lifecycle state of a room.
///
/// ```text
/// waiting → playing → finished
/// ```
///
/// - **Waiting**: the room has an open slot, or both players are seated
///   but no round has resolved yet.
/// - **Playing**: at least one round has resolved.
/// - **Finished**: the round limit was reached. Terminal — choice
///   submissions are ignored from here on; only disconnects still land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Waiting,
    Playing,
    Finished,
}

impl GameState {
    /// Returns `true` once the round limit has been reached.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// One player's observable state inside a room snapshot.
///
/// `is_ready` is redundant with `choice` being present — clients key off
/// the flag, so both travel. `#[serde(rename_all = "camelCase")]` gives
/// the client-protocol spelling (`isReady`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: ConnectionId,
    pub name: String,
    pub score: u32,
    pub choice: Option<Choice>,
    pub is_ready: bool,
}

/// A full point-in-time description of a room's observable state.
///
/// This is the canonical broadcast after every state-changing event.
/// Slot order is join order; slot 0 is the creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub game_state: GameState,
    pub round: u32,
    pub max_rounds: u32,
}

// ---------------------------------------------------------------------------
// Recipient — who should receive an event?
// ---------------------------------------------------------------------------

/// Specifies who should receive an outbound event.
///
/// The room state machine returns `(Recipient, ServerEvent)` pairs; this
/// enum tells the delivery layer where each one goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every member of the room.
    All,

    /// One specific connection (replies and error reports).
    Connection(ConnectionId),
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The client protocol defines exact JSON spellings. These tests pin
    //! the serde attributes to them — a mismatch here means clients stop
    //! understanding our broadcasts.

    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_connection_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ConnectionId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId(7).to_string(), "conn-7");
    }

    #[test]
    fn test_room_id_serializes_as_plain_string() {
        // `#[serde(transparent)]` means RoomId("A1B2C3") → `"A1B2C3"`,
        // not `{"0":"A1B2C3"}`.
        let json = serde_json::to_string(&RoomId::new("A1B2C3")).unwrap();
        assert_eq!(json, "\"A1B2C3\"");
    }

    #[test]
    fn test_room_id_display_is_bare_code() {
        assert_eq!(RoomId::new("XY99ZQ").to_string(), "XY99ZQ");
    }

    // =====================================================================
    // Choice
    // =====================================================================

    #[test]
    fn test_choice_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Choice::Rock).unwrap(), "\"rock\"");
        assert_eq!(serde_json::to_string(&Choice::Paper).unwrap(), "\"paper\"");
        assert_eq!(
            serde_json::to_string(&Choice::Scissors).unwrap(),
            "\"scissors\""
        );
    }

    #[test]
    fn test_choice_deserializes_from_lowercase() {
        let choice: Choice = serde_json::from_str("\"scissors\"").unwrap();
        assert_eq!(choice, Choice::Scissors);
    }

    #[test]
    fn test_choice_rejects_unknown_value() {
        let result: Result<Choice, _> = serde_json::from_str("\"lizard\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_choice_display() {
        assert_eq!(Choice::Rock.to_string(), "rock");
    }

    // =====================================================================
    // GameState
    // =====================================================================

    #[test]
    fn test_game_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&GameState::Waiting).unwrap(),
            "\"waiting\""
        );
        assert_eq!(
            serde_json::to_string(&GameState::Finished).unwrap(),
            "\"finished\""
        );
    }

    #[test]
    fn test_game_state_is_finished() {
        assert!(!GameState::Waiting.is_finished());
        assert!(!GameState::Playing.is_finished());
        assert!(GameState::Finished.is_finished());
    }

    // =====================================================================
    // Snapshots
    // =====================================================================

    fn sample_player() -> PlayerSnapshot {
        PlayerSnapshot {
            id: ConnectionId(1),
            name: "Alice".into(),
            score: 2,
            choice: Some(Choice::Rock),
            is_ready: true,
        }
    }

    #[test]
    fn test_player_snapshot_uses_camel_case_ready_flag() {
        let json: serde_json::Value = serde_json::to_value(sample_player()).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["score"], 2);
        assert_eq!(json["choice"], "rock");
        assert_eq!(json["isReady"], true);
    }

    #[test]
    fn test_player_snapshot_unset_choice_is_null() {
        let snapshot = PlayerSnapshot {
            choice: None,
            is_ready: false,
            ..sample_player()
        };
        let json: serde_json::Value = serde_json::to_value(snapshot).unwrap();

        assert!(json["choice"].is_null());
        assert_eq!(json["isReady"], false);
    }

    #[test]
    fn test_room_snapshot_uses_camel_case_field_names() {
        let snapshot = RoomSnapshot {
            players: vec![sample_player()],
            game_state: GameState::Playing,
            round: 3,
            max_rounds: 5,
        };
        let json: serde_json::Value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["gameState"], "playing");
        assert_eq!(json["round"], 3);
        assert_eq!(json["maxRounds"], 5);
        assert_eq!(json["players"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_room_snapshot_round_trip() {
        let snapshot = RoomSnapshot {
            players: vec![sample_player()],
            game_state: GameState::Waiting,
            round: 0,
            max_rounds: 5,
        };
        let bytes = serde_json::to_vec(&snapshot).unwrap();
        let decoded: RoomSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(snapshot, decoded);
    }

    // =====================================================================
    // Recipient
    // =====================================================================

    #[test]
    fn test_recipient_round_trip() {
        for recipient in [Recipient::All, Recipient::Connection(ConnectionId(9))] {
            let bytes = serde_json::to_vec(&recipient).unwrap();
            let decoded: Recipient = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(recipient, decoded);
        }
    }
}
