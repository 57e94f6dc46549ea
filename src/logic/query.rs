//! Read-only helpers: legs needed to win, leg starter rotation, round labels.

use crate::models::{Match, Side};

/// Legs needed to win a best-of-`best_of` match.
pub fn legs_to_win(best_of: u32) -> u32 {
    best_of / 2 + 1
}

/// Who throws first in the upcoming leg. Leg 1 is `start_player`, then it alternates.
pub fn next_leg_starter(m: &Match) -> Side {
    let upcoming_leg = m.legs_a + m.legs_b + 1;
    if upcoming_leg % 2 == 1 {
        m.start_player
    } else {
        m.start_player.other()
    }
}

/// Label for a round with `players_in_round` entrants.
pub fn round_label(players_in_round: usize) -> String {
    match players_in_round {
        2 => "Final".to_string(),
        4 => "Semifinal".to_string(),
        8 => "Quarterfinal".to_string(),
        n => format!("Round of {}", n),
    }
}
