//! Error types for the room layer.

use roshambo_protocol::RoomId;

/// Errors that can occur during room operations.
///
/// `NotFound` and `RoomFull` are user-facing: the gateway reports them to
/// the requesting connection only, and they are never fatal. `Unavailable`
/// marks the benign race where a command reaches a room that is already
/// tearing down; callers treat it as silence.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No live room has this join code.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// Both player slots are taken.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The room's command channel is closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
