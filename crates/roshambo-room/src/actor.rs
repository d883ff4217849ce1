//! Room actor: an isolated Tokio task that owns one [`Room`].
//!
//! Each room runs in its own task and is driven through an mpsc command
//! channel, so everything that touches a room's state happens one command
//! at a time — the "are both ready" check and the score/round mutations
//! behind it can never interleave with the partner's events. Different
//! rooms are independent tasks and run in parallel.

use std::collections::HashMap;

use roshambo_protocol::{Choice, ConnectionId, Recipient, RoomId, ServerEvent};
use tokio::sync::{mpsc, oneshot};

use crate::room::RoomEvents;
use crate::{Room, RoomError};

/// Channel sender delivering outbound events to one connection.
///
/// This is the engine's entire view of transport: whoever registers the
/// connection supplies a sender, and whatever drains the receiver owns
/// actual delivery.
pub type OutboundSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Seat a player.
    Join {
        connection: ConnectionId,
        name: String,
        sender: OutboundSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Record a choice (fire-and-forget).
    Choice {
        connection: ConnectionId,
        choice: Choice,
    },

    /// Unseat a player. The reply reports whether the room is now empty —
    /// the registry's cue to drop the handle.
    Leave {
        connection: ConnectionId,
        reply: oneshot::Sender<bool>,
    },
}

/// Handle to a running room actor.
///
/// Cheap to clone — it's an `mpsc::Sender` wrapper. The registry holds
/// one per live room.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// The join code of the room this handle drives.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Sends a join request and waits for the seat decision.
    pub async fn join(
        &self,
        connection: ConnectionId,
        name: String,
        sender: OutboundSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                connection,
                name,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    /// Delivers a choice (fire-and-forget).
    pub async fn submit_choice(
        &self,
        connection: ConnectionId,
        choice: Choice,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Choice { connection, choice })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Unseats a player; resolves to `true` when the room emptied out.
    pub async fn leave(&self, connection: ConnectionId) -> Result<bool, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                connection,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct RoomActor {
    room: Room,
    /// Per-connection outbound channels.
    senders: HashMap<ConnectionId, OutboundSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop until the room empties out or every handle is
    /// dropped.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room.id(), "room actor started");

        // The creator is already seated: announce the join code and the
        // initial snapshot before accepting commands.
        self.dispatch(self.room.created_events());

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    connection,
                    name,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(connection, name, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Choice { connection, choice } => {
                    self.handle_choice(connection, choice);
                }
                RoomCommand::Leave { connection, reply } => {
                    let empty = self.handle_leave(connection);
                    let _ = reply.send(empty);
                    if empty {
                        break;
                    }
                }
            }
        }

        tracing::info!(room_id = %self.room.id(), "room actor stopped");
    }

    fn handle_join(
        &mut self,
        connection: ConnectionId,
        name: String,
        sender: OutboundSender,
    ) -> Result<(), RoomError> {
        let events = self.room.join(connection, name)?;
        self.senders.insert(connection, sender);
        tracing::info!(
            room_id = %self.room.id(),
            %connection,
            players = self.room.player_count(),
            "player joined"
        );
        self.dispatch(events);
        Ok(())
    }

    fn handle_choice(&mut self, connection: ConnectionId, choice: Choice) {
        if !self.senders.contains_key(&connection) {
            tracing::warn!(
                room_id = %self.room.id(),
                %connection,
                "choice from non-member, ignoring"
            );
            return;
        }

        let events = self.room.submit_choice(connection, choice);
        if events.is_empty() {
            // Finished room; the submission changes nothing.
            tracing::debug!(
                room_id = %self.room.id(),
                %connection,
                "choice ignored, game finished"
            );
            return;
        }
        tracing::debug!(room_id = %self.room.id(), %connection, %choice, "choice recorded");
        self.dispatch(events);
    }

    fn handle_leave(&mut self, connection: ConnectionId) -> bool {
        self.senders.remove(&connection);
        let events = self.room.remove(connection);
        tracing::info!(
            room_id = %self.room.id(),
            %connection,
            players = self.room.player_count(),
            "player left"
        );
        self.dispatch(events);
        self.room.is_empty()
    }

    /// Delivers each event to its audience, in list order. Per-connection
    /// channels are FIFO, so the round-result → game-over → snapshot
    /// ordering survives all the way to the client.
    fn dispatch(&self, events: RoomEvents) {
        for (recipient, event) in events {
            match recipient {
                Recipient::All => {
                    for sender in self.senders.values() {
                        let _ = sender.send(event.clone());
                    }
                }
                Recipient::Connection(connection) => {
                    self.send_to(connection, event);
                }
            }
        }
    }

    /// Sends one event to one connection. Silently drops if the receiver
    /// is gone (client already disconnected).
    fn send_to(&self, connection: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&connection) {
            let _ = sender.send(event);
        }
    }
}

/// Spawns the actor task for a freshly created room and returns a handle
/// to communicate with it.
///
/// The creator is already seated in `room`; their `sender` is registered
/// here so the creation events reach them. `channel_size` bounds the
/// command queue — senders wait when it fills up.
pub(crate) fn spawn_room(
    room: Room,
    creator: ConnectionId,
    sender: OutboundSender,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let room_id = room.id().clone();
    let mut senders = HashMap::new();
    senders.insert(creator, sender);

    let actor = RoomActor {
        room,
        senders,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
