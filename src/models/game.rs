//! Match (one pairing in the bracket), Side, and MatchStatus.

use crate::models::player::{MatchSlot, PlayerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Side of the next-round match that the winner of match `match_index` lands in.
    pub fn for_match_index(match_index: usize) -> Self {
        if match_index % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Where a match stands, as shown on the scoreboard.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Single participant, advances automatically.
    Bye,
    /// At least one side has not been decided upstream yet.
    WaitingForPlayers,
    InProgress,
    Decided,
}

/// A single bracket match, identified by its position `(round_index, match_index)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 0 = first round.
    pub round_index: usize,
    /// Position within the round.
    pub match_index: usize,
    /// None while undetermined (or the empty side of a bye).
    pub a: Option<MatchSlot>,
    pub b: Option<MatchSlot>,
    pub best_of: u32,
    pub legs_a: u32,
    pub legs_b: u32,
    /// Who throws first in leg 1.
    #[serde(default)]
    pub start_player: Side,
    /// None if not yet decided.
    pub winner_id: Option<PlayerId>,
    #[serde(default)]
    pub is_bye: bool,
}

impl Match {
    /// Empty match with no participants and no legs played.
    pub fn new(round_index: usize, match_index: usize, best_of: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_index,
            match_index,
            a: None,
            b: None,
            best_of,
            legs_a: 0,
            legs_b: 0,
            start_player: Side::A,
            winner_id: None,
            is_bye: false,
        }
    }

    pub fn slot(&self, side: Side) -> Option<&MatchSlot> {
        match side {
            Side::A => self.a.as_ref(),
            Side::B => self.b.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Option<MatchSlot> {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    pub fn legs(&self, side: Side) -> u32 {
        match side {
            Side::A => self.legs_a,
            Side::B => self.legs_b,
        }
    }

    /// Both participants are known.
    pub fn is_ready(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    /// The slot whose player id equals `winner_id`, if any.
    pub fn winner_slot(&self) -> Option<&MatchSlot> {
        self.winner_side().and_then(|side| self.slot(side))
    }

    pub fn winner_side(&self) -> Option<Side> {
        let winner = self.winner_id?;
        if self.a.as_ref().is_some_and(|s| s.player_id == winner) {
            Some(Side::A)
        } else if self.b.as_ref().is_some_and(|s| s.player_id == winner) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn status(&self) -> MatchStatus {
        if self.is_bye {
            MatchStatus::Bye
        } else if self.winner_id.is_some() {
            MatchStatus::Decided
        } else if self.is_ready() {
            MatchStatus::InProgress
        } else {
            MatchStatus::WaitingForPlayers
        }
    }
}
