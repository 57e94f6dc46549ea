//! Tournament, TournamentMeta, and TournamentError.

use crate::models::game::Match;
use crate::models::player::{MatchSlot, Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not enough players to build a bracket.
    NotEnoughPlayers { required: usize },
    /// Best-of must be odd and at least 1.
    InvalidBestOf(u32),
    /// Player name is blank after trimming.
    EmptyPlayerName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player not found on the roster.
    PlayerNotFound(PlayerId),
    /// The roster is frozen while a tournament exists.
    RosterLocked,
    /// No tournament has been generated yet.
    NoTournament,
    /// Roster import could not be read.
    Import(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players", required)
            }
            TournamentError::InvalidBestOf(n) => {
                write!(f, "Best-of must be odd and >= 1 (got {})", n)
            }
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::RosterLocked => {
                write!(f, "Player list is locked while a tournament exists")
            }
            TournamentError::NoTournament => write!(f, "No tournament has been generated"),
            TournamentError::Import(msg) => write!(f, "Could not import players: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Bracket shape, fixed at generation time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentMeta {
    /// Next power of two >= player count.
    pub bracket_size: usize,
    /// `bracket_size - player count`.
    pub byes: usize,
    /// One label per round ("Quarterfinal", "Semifinal", "Final", ...).
    pub round_labels: Vec<String>,
}

/// A generated knockout bracket.
///
/// The shape (round and match counts, slot wiring) never changes after generation;
/// only slots, legs and winners inside existing matches do.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    /// Default best-of for every match of this bracket.
    pub best_of: u32,
    /// Roster snapshot at generation time.
    pub players: Vec<Player>,
    /// Round 0 first, the final (a single match) last.
    pub rounds: Vec<Vec<Match>>,
    pub meta: TournamentMeta,
}

impl Tournament {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn match_at(&self, round_index: usize, match_index: usize) -> Option<&Match> {
        self.rounds.get(round_index)?.get(match_index)
    }

    pub fn match_at_mut(&mut self, round_index: usize, match_index: usize) -> Option<&mut Match> {
        self.rounds.get_mut(round_index)?.get_mut(match_index)
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last()?.first()
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<&MatchSlot> {
        self.final_match()?.winner_slot()
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }
}
