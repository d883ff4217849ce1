//! The per-room state machine.
//!
//! [`Room`] is pure: it holds two player slots, the round counter, and
//! the game status, and turns join/choice/leave events into ordered lists
//! of `(Recipient, ServerEvent)` pairs. It performs no I/O and knows
//! nothing about channels or tasks — delivery belongs to the actor in
//! `actor.rs`, which keeps every rule here testable synchronously.

use roshambo_protocol::{
    Choice, ConnectionId, GameState, PlayerSnapshot, Recipient, RoomId, RoomSnapshot, ServerEvent,
};

use crate::{Outcome, RoomConfig, RoomError, resolve};

/// Events a room wants delivered, in order, each paired with its audience.
pub type RoomEvents = Vec<(Recipient, ServerEvent)>;

/// One seated player.
///
/// Readiness is not stored separately: a player is ready exactly when a
/// choice is present, so the two can never drift apart. The snapshot
/// exposes both because clients key off the flag.
#[derive(Debug, Clone)]
struct Player {
    connection: ConnectionId,
    name: String,
    score: u32,
    choice: Option<Choice>,
}

impl Player {
    fn new(connection: ConnectionId, name: String) -> Self {
        Self {
            connection,
            name,
            score: 0,
            choice: None,
        }
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.connection,
            name: self.name.clone(),
            score: self.score,
            choice: self.choice,
            is_ready: self.choice.is_some(),
        }
    }
}

/// A single match session for up to two players.
///
/// Slot order is join order; slot 0 is the creator. The status moves
/// `waiting → playing → finished` and never leaves `finished`.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    players: Vec<Player>,
    state: GameState,
    round: u32,
    max_rounds: u32,
}

impl Room {
    /// Creates a room with the creator seated in slot 0.
    pub fn new(
        id: RoomId,
        config: &RoomConfig,
        creator: ConnectionId,
        creator_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            players: vec![Player::new(creator, creator_name.into())],
            state: GameState::Waiting,
            round: 0,
            max_rounds: config.max_rounds,
        }
    }

    /// The room's join code.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` once the last player has left.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The full observable state, as broadcast to clients.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            players: self.players.iter().map(Player::snapshot).collect(),
            game_state: self.state,
            round: self.round,
            max_rounds: self.max_rounds,
        }
    }

    /// The events announcing a freshly created room: the join code to the
    /// creator first, then the initial snapshot to everyone seated.
    pub fn created_events(&self) -> RoomEvents {
        let Some(creator) = self.players.first() else {
            return Vec::new();
        };
        vec![
            (
                Recipient::Connection(creator.connection),
                ServerEvent::RoomCreated {
                    room_id: self.id.clone(),
                },
            ),
            (
                Recipient::All,
                ServerEvent::RoomUpdate(self.snapshot()),
            ),
        ]
    }

    /// Seats a player in the free slot.
    ///
    /// Capacity is the only gate: a room that lost a player mid-game
    /// accepts a replacement into the free slot regardless of status.
    pub fn join(
        &mut self,
        connection: ConnectionId,
        name: impl Into<String>,
    ) -> Result<RoomEvents, RoomError> {
        if self.players.len() >= 2 {
            return Err(RoomError::RoomFull(self.id.clone()));
        }
        self.players.push(Player::new(connection, name.into()));
        Ok(vec![(
            Recipient::All,
            ServerEvent::RoomUpdate(self.snapshot()),
        )])
    }

    /// Records a choice for the submitting player.
    ///
    /// Re-submitting before the opponent responds overwrites the earlier
    /// choice. When both seats are ready the round resolves within this
    /// same call, so the "are both ready" check and the mutations it
    /// guards can never interleave with the partner's events. Submissions
    /// to a finished room, or from a connection that is not seated,
    /// produce nothing at all.
    pub fn submit_choice(&mut self, connection: ConnectionId, choice: Choice) -> RoomEvents {
        if self.state.is_finished() {
            return Vec::new();
        }
        let Some(player) = self
            .players
            .iter_mut()
            .find(|p| p.connection == connection)
        else {
            return Vec::new();
        };
        player.choice = Some(choice);

        let mut events = Vec::new();
        if self.players.len() == 2 && self.players.iter().all(|p| p.choice.is_some()) {
            self.resolve_round(&mut events);
        }
        events.push((
            Recipient::All,
            ServerEvent::RoomUpdate(self.snapshot()),
        ));
        events
    }

    /// Removes a player. Survivors get a player-left notice carrying the
    /// updated snapshot; status, round, and scores stay as they were.
    pub fn remove(&mut self, connection: ConnectionId) -> RoomEvents {
        self.players.retain(|p| p.connection != connection);
        if self.players.is_empty() {
            Vec::new()
        } else {
            vec![(
                Recipient::All,
                ServerEvent::PlayerLeft(self.snapshot()),
            )]
        }
    }

    /// Resolves one round: score, advance the counter, emit the result
    /// while both moves are still visible, then clear them for the next
    /// round. Reaching the round limit appends the game-over event and
    /// locks the room.
    fn resolve_round(&mut self, events: &mut RoomEvents) {
        self.state = GameState::Playing;

        let first = self.players[0].choice.expect("both players ready");
        let second = self.players[1].choice.expect("both players ready");

        let winner = match resolve(first, second) {
            Outcome::PlayerOne => {
                self.players[0].score += 1;
                Some(self.players[0].connection)
            }
            Outcome::PlayerTwo => {
                self.players[1].score += 1;
                Some(self.players[1].connection)
            }
            Outcome::Tie => None,
        };
        self.round += 1;

        // Snapshots taken before the reset below, so the result still
        // shows what each player threw.
        events.push((
            Recipient::All,
            ServerEvent::RoundResult {
                winner,
                player1: self.players[0].snapshot(),
                player2: self.players[1].snapshot(),
                round: self.round,
            },
        ));

        for player in &mut self.players {
            player.choice = None;
        }

        if self.round >= self.max_rounds {
            self.state = GameState::Finished;
            events.push((
                Recipient::All,
                ServerEvent::GameOver {
                    player1: self.players[0].snapshot(),
                    player2: self.players[1].snapshot(),
                },
            ));
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
