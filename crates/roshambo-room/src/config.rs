//! Room configuration.

use serde::{Deserialize, Serialize};

/// Settings for a room instance.
///
/// There is exactly one knob: how many rounds a game runs. Five is the
/// standard match length; tests shorten it to finish games quickly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Number of resolved rounds after which the game finishes.
    pub max_rounds: u32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { max_rounds: 5 }
    }
}
