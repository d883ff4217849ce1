//! Room registry: creates, tracks, and tears down rooms.

use std::collections::HashMap;

use rand::Rng;
use roshambo_protocol::{Choice, ConnectionId, RoomId};

use crate::actor::spawn_room;
use crate::{OutboundSender, Room, RoomConfig, RoomError, RoomHandle};

/// Join codes are six characters from this alphabet (36^6 ≈ 2.2 billion
/// codes, so collisions with live rooms are regenerate-and-move-on rare).
const ROOM_ID_LEN: usize = 6;
const ROOM_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns every live room and the connection → room index.
///
/// This is the entry point for room operations from the gateway. Key
/// invariants: a connection maps to at most one room at a time, and a
/// room is reachable only through this registry by its join code. An
/// emptied room is destroyed before anyone can observe it.
pub struct RoomRegistry {
    /// Live rooms, keyed by join code.
    rooms: HashMap<RoomId, RoomHandle>,

    /// Which room each connection is seated in.
    connections: HashMap<ConnectionId, RoomId>,

    /// Settings handed to every room this registry spawns.
    config: RoomConfig,
}

impl RoomRegistry {
    /// Creates an empty registry; rooms it spawns use `config`.
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            connections: HashMap::new(),
            config,
        }
    }

    /// Creates a new room with the creator seated in slot 0 and returns
    /// its join code. Never fails — there is no cap on the number of
    /// rooms. The room itself announces the code and initial snapshot
    /// through `sender`.
    pub fn create_room(
        &mut self,
        player_name: impl Into<String>,
        connection: ConnectionId,
        sender: OutboundSender,
    ) -> RoomId {
        let room_id = self.fresh_room_id();
        let room = Room::new(room_id.clone(), &self.config, connection, player_name);
        let handle = spawn_room(room, connection, sender, DEFAULT_CHANNEL_SIZE);

        self.rooms.insert(room_id.clone(), handle);
        self.connections.insert(connection, room_id.clone());
        tracing::info!(%room_id, %connection, "room created");
        room_id
    }

    /// Seats a player in an existing room.
    ///
    /// Fails with [`RoomError::NotFound`] when no live room has this code
    /// and [`RoomError::RoomFull`] when both slots are taken — the seat
    /// decision is made inside the actor, which owns the player list.
    /// Status is not a gate: a mid-game room with a free slot accepts the
    /// join.
    pub async fn join_room(
        &mut self,
        room_id: &RoomId,
        player_name: impl Into<String>,
        connection: ConnectionId,
        sender: OutboundSender,
    ) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;

        handle.join(connection, player_name.into(), sender).await?;
        self.connections.insert(connection, room_id.clone());
        Ok(())
    }

    /// Forwards a choice to the submitter's room.
    ///
    /// A connection with no room, a room that no longer exists, and a
    /// room already tearing down are all benign races (the event raced a
    /// teardown or the client is stale): the choice is dropped without
    /// error or broadcast.
    pub async fn submit_choice(&mut self, connection: ConnectionId, choice: Choice) {
        let Some(room_id) = self.connections.get(&connection).cloned() else {
            tracing::debug!(%connection, "choice from connection without a room, ignoring");
            return;
        };
        let Some(handle) = self.rooms.get(&room_id) else {
            self.connections.remove(&connection);
            return;
        };
        if let Err(error) = handle.submit_choice(connection, choice).await {
            tracing::debug!(%connection, %error, "choice dropped");
        }
    }

    /// Removes a connection's player from its room, if any.
    ///
    /// An emptied room is destroyed and its join code becomes reusable
    /// immediately. A surviving room keeps its status unchanged; the room
    /// itself notifies the remaining member. The connection → room
    /// association is cleared on every path.
    pub async fn remove_connection(&mut self, connection: ConnectionId) {
        let Some(room_id) = self.connections.remove(&connection) else {
            return;
        };
        let Some(handle) = self.rooms.get(&room_id) else {
            return;
        };

        match handle.leave(connection).await {
            Ok(true) => {
                self.rooms.remove(&room_id);
                tracing::info!(%room_id, "room destroyed");
            }
            Ok(false) => {}
            Err(error) => {
                // Actor already gone; drop the stale handle.
                self.rooms.remove(&room_id);
                tracing::debug!(%room_id, %error, "room already unavailable");
            }
        }
    }

    /// The room a connection is currently seated in, if any.
    pub fn connection_room(&self, connection: &ConnectionId) -> Option<&RoomId> {
        self.connections.get(connection)
    }

    /// Returns `true` when a live room has this join code.
    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Generates a join code no live room is using.
    fn fresh_room_id(&self) -> RoomId {
        loop {
            let id = generate_room_id();
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

/// Generates a random six-character uppercase alphanumeric join code.
fn generate_room_id() -> RoomId {
    let mut rng = rand::rng();
    let code: String = (0..ROOM_ID_LEN)
        .map(|_| ROOM_ID_ALPHABET[rng.random_range(0..ROOM_ID_ALPHABET.len())] as char)
        .collect();
    RoomId(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_room_id_is_six_chars_from_alphabet() {
        for _ in 0..100 {
            let id = generate_room_id();
            assert_eq!(id.as_str().len(), ROOM_ID_LEN);
            assert!(
                id.as_str().bytes().all(|b| ROOM_ID_ALPHABET.contains(&b)),
                "unexpected character in {id}"
            );
        }
    }
}
