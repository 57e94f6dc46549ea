//! Player and MatchSlot data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in slots and winner lookups).
pub type PlayerId = Uuid;

/// A player on the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Snapshot of a player occupying one side of a match.
///
/// Slots are copied out of the roster, so editing the roster afterwards never
/// touches an existing bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSlot {
    pub player_id: PlayerId,
    pub name: String,
}

impl From<&Player> for MatchSlot {
    fn from(p: &Player) -> Self {
        Self {
            player_id: p.id,
            name: p.name.clone(),
        }
    }
}
