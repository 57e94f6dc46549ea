//! Winner propagation: push decided winners into the next round and drop stale winners.
//!
//! Downstream state is always rebuilt from scratch: callers clear the rounds after the
//! edited one, then propagate from the edited round onward.

use crate::models::{MatchSlot, Side, Tournament};

/// Blank both slots of every match from `start_round_index` onward.
pub(crate) fn clear_participants_from_round(tournament: &mut Tournament, start_round_index: usize) {
    for round in tournament.rounds.iter_mut().skip(start_round_index) {
        for m in round.iter_mut() {
            m.a = None;
            m.b = None;
        }
    }
}

/// Clear every `winner_id` that no longer matches one of its match's occupants.
pub(crate) fn validate_winners(tournament: &mut Tournament) {
    for m in tournament.rounds.iter_mut().flatten() {
        if m.winner_id.is_some() && m.winner_slot().is_none() {
            log::debug!(
                "Clearing stale winner of match ({}, {})",
                m.round_index,
                m.match_index
            );
            m.winner_id = None;
        }
    }
}

/// Copy winners from round `start_round_index` forward, validating the whole tree after
/// each round.
pub(crate) fn propagate_winners_forward(tournament: &mut Tournament, start_round_index: usize) {
    let last_round = tournament.rounds.len().saturating_sub(1);
    for r in start_round_index..last_round {
        // Collect first so the next round can be borrowed mutably.
        let advancing: Vec<(usize, Side, MatchSlot)> = tournament.rounds[r]
            .iter()
            .filter_map(|m| {
                let winner = m.winner_slot()?.clone();
                Some((m.match_index / 2, Side::for_match_index(m.match_index), winner))
            })
            .collect();

        let next = &mut tournament.rounds[r + 1];
        for (next_match_index, side, slot) in advancing {
            if let Some(target) = next.get_mut(next_match_index) {
                *target.slot_mut(side) = Some(slot);
            }
        }

        validate_winners(tournament);
    }
}
