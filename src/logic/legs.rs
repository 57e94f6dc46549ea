//! Leg scores: set or bump a match's legs, declare a winner, reset the bracket.
//!
//! Every operation takes the current tree and returns a new one; the input is never
//! modified. Unknown `(round_index, match_index)` positions are silently ignored.

use crate::logic::propagation::{clear_participants_from_round, propagate_winners_forward};
use crate::logic::query::legs_to_win;
use crate::models::{Match, Side, Tournament};

/// Convert untrusted numeric input to a leg count: non-finite becomes 0, fractions are
/// floored, negatives become 0.
pub fn legs_from_f64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // `as` saturates for out-of-range floats.
    value.floor().max(0.0) as i64
}

fn clamp_legs(value: i64, best_of: u32) -> u32 {
    value.clamp(0, i64::from(best_of)) as u32
}

/// Derive the winner from the leg counts. Bye winners are permanent.
pub fn recompute_winner_from_legs(m: &mut Match) {
    if m.is_bye && m.winner_id.is_some() {
        return;
    }

    let (a, b) = match (&m.a, &m.b) {
        (Some(a), Some(b)) => (a.player_id, b.player_id),
        _ => {
            m.winner_id = None;
            return;
        }
    };

    let target = legs_to_win(m.best_of);
    m.winner_id = if m.legs_a >= target && m.legs_a > m.legs_b {
        Some(a)
    } else if m.legs_b >= target && m.legs_b > m.legs_a {
        Some(b)
    } else {
        None
    };
}

/// Set both leg counts of a match and rebuild every round after it.
///
/// Counts are clamped into `[0, best_of]`.
pub fn update_legs(
    tournament: &Tournament,
    round_index: usize,
    match_index: usize,
    legs_a: i64,
    legs_b: i64,
) -> Tournament {
    let mut t = tournament.clone();

    match t.match_at_mut(round_index, match_index) {
        Some(m) => {
            m.legs_a = clamp_legs(legs_a, m.best_of);
            m.legs_b = clamp_legs(legs_b, m.best_of);
            recompute_winner_from_legs(m);
            log::debug!(
                "Legs of match ({}, {}) set to {}-{}, winner {:?}",
                round_index,
                match_index,
                m.legs_a,
                m.legs_b,
                m.winner_id
            );
        }
        None => return t,
    }

    clear_participants_from_round(&mut t, round_index + 1);
    propagate_winners_forward(&mut t, round_index);
    t
}

/// Add `delta` (usually +1 or -1) to one side's legs.
pub fn increment_leg(
    tournament: &Tournament,
    round_index: usize,
    match_index: usize,
    side: Side,
    delta: i64,
) -> Tournament {
    let Some(m) = tournament.match_at(round_index, match_index) else {
        return tournament.clone();
    };
    let mut legs_a = i64::from(m.legs_a);
    let mut legs_b = i64::from(m.legs_b);
    match side {
        Side::A => legs_a += delta,
        Side::B => legs_b += delta,
    }
    update_legs(tournament, round_index, match_index, legs_a, legs_b)
}

/// Declare `winner` without tracking every leg: the winner gets exactly the legs needed,
/// the loser keeps their legs capped just below that.
///
/// Only applies when both participants are known.
pub fn quick_set_winner(
    tournament: &Tournament,
    round_index: usize,
    match_index: usize,
    winner: Side,
) -> Tournament {
    let m = match tournament.match_at(round_index, match_index) {
        Some(m) if m.is_ready() => m,
        _ => return tournament.clone(),
    };

    let target = legs_to_win(m.best_of);
    let legs_for = |side: Side| {
        if side == winner {
            target
        } else {
            m.legs(side).min(target - 1)
        }
    };
    let legs_a = legs_for(Side::A);
    let legs_b = legs_for(Side::B);
    update_legs(
        tournament,
        round_index,
        match_index,
        i64::from(legs_a),
        i64::from(legs_b),
    )
}

/// Rewind the bracket to its freshly generated state, keeping seeding and bye winners.
pub fn reset_tournament_winners(tournament: &Tournament) -> Tournament {
    let mut t = tournament.clone();

    for m in t.rounds.iter_mut().flatten() {
        if !(m.is_bye && m.winner_id.is_some()) {
            m.winner_id = None;
        }
        m.legs_a = 0;
        m.legs_b = 0;
    }

    clear_participants_from_round(&mut t, 1);
    propagate_winners_forward(&mut t, 0);
    log::debug!("Reset winners of bracket {}", t.id);
    t
}
