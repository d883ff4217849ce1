//! Inbound event dispatch and connection bookkeeping.

use std::collections::HashMap;

use roshambo_protocol::{ClientEvent, ConnectionId, RoomId, ServerEvent};
use roshambo_room::{OutboundSender, RoomConfig, RoomError, RoomRegistry};
use tokio::sync::Mutex;

/// Translates transport events into room operations.
///
/// One gateway serves the whole process. Each map sits behind its own
/// async mutex, held only for the duration of one event — room traffic
/// itself is serialized per-room by the actors, not here.
pub struct SessionGateway {
    /// All live rooms and the connection → room index.
    registry: Mutex<RoomRegistry>,

    /// Outbound channel for every registered connection.
    connections: Mutex<HashMap<ConnectionId, OutboundSender>>,
}

impl SessionGateway {
    /// Creates a gateway whose rooms use `config`.
    pub fn new(config: RoomConfig) -> Self {
        Self {
            registry: Mutex::new(RoomRegistry::new(config)),
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a connection and the channel its events are delivered on.
    pub async fn connect(&self, connection: ConnectionId, sender: OutboundSender) {
        tracing::info!(%connection, "client connected");
        self.connections.lock().await.insert(connection, sender);
    }

    /// Unregisters a connection and removes its player from any room.
    ///
    /// Immediate and unconditional: nothing waits for an in-flight round.
    pub async fn disconnect(&self, connection: ConnectionId) {
        tracing::info!(%connection, "client disconnected");
        self.connections.lock().await.remove(&connection);
        self.registry
            .lock()
            .await
            .remove_connection(connection)
            .await;
    }

    /// Dispatches one inbound event from a connection.
    ///
    /// Events from connections that never registered are dropped — a
    /// benign race with the connection lifecycle, not an error.
    pub async fn handle(&self, connection: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::CreateRoom { player_name } => {
                self.create_room(connection, player_name).await;
            }
            ClientEvent::JoinRoom {
                room_id,
                player_name,
            } => {
                self.join_room(connection, room_id, player_name).await;
            }
            ClientEvent::MakeChoice { choice } => {
                self.registry
                    .lock()
                    .await
                    .submit_choice(connection, choice)
                    .await;
            }
        }
    }

    async fn create_room(&self, connection: ConnectionId, player_name: String) {
        let Some(sender) = self.sender_for(connection).await else {
            return;
        };
        let mut registry = self.registry.lock().await;
        if is_seated(&registry, connection) {
            tracing::debug!(%connection, "create from a seated connection, ignoring");
            return;
        }
        let room_id = registry.create_room(player_name, connection, sender);
        tracing::debug!(%connection, %room_id, "connection seated in new room");
    }

    async fn join_room(&self, connection: ConnectionId, room_id: RoomId, player_name: String) {
        let Some(sender) = self.sender_for(connection).await else {
            return;
        };
        let result = {
            let mut registry = self.registry.lock().await;
            if is_seated(&registry, connection) {
                tracing::debug!(%connection, "join from a seated connection, ignoring");
                return;
            }
            registry
                .join_room(&room_id, player_name, connection, sender.clone())
                .await
        };
        if let Err(error) = result {
            // User-facing, reported to the requester only.
            let _ = sender.send(ServerEvent::Error {
                message: error_message(&error).into(),
            });
        }
    }

    async fn sender_for(&self, connection: ConnectionId) -> Option<OutboundSender> {
        let sender = self.connections.lock().await.get(&connection).cloned();
        if sender.is_none() {
            tracing::debug!(%connection, "event from unregistered connection, ignoring");
        }
        sender
    }
}

impl Default for SessionGateway {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

/// `true` when the connection is seated in a room that still exists.
///
/// A mapping to a vanished room counts as unseated — the registry cleans
/// the stale entry up on the next routed event.
fn is_seated(registry: &RoomRegistry, connection: ConnectionId) -> bool {
    registry
        .connection_room(&connection)
        .is_some_and(|room_id| registry.contains_room(room_id))
}

/// The message reported to a requester for a failed join.
fn error_message(error: &RoomError) -> &'static str {
    match error {
        RoomError::NotFound(_) | RoomError::Unavailable(_) => "Room does not exist",
        RoomError::RoomFull(_) => "Room is full",
    }
}
