//! Bracket generation: random seeding, byes, empty later rounds, round labels.

use crate::config::validate_best_of;
use crate::logic::propagation::{clear_participants_from_round, propagate_winners_forward};
use crate::logic::query::round_label;
use crate::models::{Match, MatchSlot, Player, Tournament, TournamentError, TournamentMeta};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Minimum roster size for a bracket.
pub const MIN_PLAYERS: usize = 2;

/// Generate a randomly seeded knockout bracket.
pub fn generate_tournament(players: &[Player], best_of: u32) -> Result<Tournament, TournamentError> {
    generate_tournament_with_rng(players, best_of, &mut rand::thread_rng())
}

/// Generate a bracket using the given random source for seeding.
///
/// 1. Shuffle a copy of the roster.
/// 2. Pad to the next power of two with byes; each bye is paired with a player.
/// 3. Build round 0 from consecutive slot pairs; single-player matches are byes and
///    are decided immediately.
/// 4. Allocate empty matches for the later rounds and advance the byes.
pub fn generate_tournament_with_rng<R>(
    players: &[Player],
    best_of: u32,
    rng: &mut R,
) -> Result<Tournament, TournamentError>
where
    R: Rng + ?Sized,
{
    if players.len() < MIN_PLAYERS {
        return Err(TournamentError::NotEnoughPlayers {
            required: MIN_PLAYERS,
        });
    }
    validate_best_of(best_of)?;

    let mut shuffled: Vec<&Player> = players.iter().collect();
    shuffled.shuffle(rng);

    let bracket_size = shuffled.len().next_power_of_two();
    let byes = bracket_size - shuffled.len();
    let slots = seed_slots(&shuffled, bracket_size);

    let round_0: Vec<Match> = slots
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let mut m = Match::new(0, i, best_of);
            m.a = pair[0].clone();
            m.b = pair[1].clone();
            m.is_bye = m.a.is_some() != m.b.is_some();
            if m.is_bye {
                m.winner_id = m.a.as_ref().or(m.b.as_ref()).map(|s| s.player_id);
            }
            m
        })
        .collect();

    let rounds_count = bracket_size.trailing_zeros() as usize;
    let mut rounds = vec![round_0];
    for r in 1..rounds_count {
        let matches_in_round = bracket_size >> (r + 1);
        rounds.push((0..matches_in_round).map(|m| Match::new(r, m, best_of)).collect());
    }

    let round_labels = (0..rounds_count)
        .map(|r| round_label(bracket_size >> r))
        .collect();

    let mut tournament = Tournament {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        best_of,
        players: players.to_vec(),
        rounds,
        meta: TournamentMeta {
            bracket_size,
            byes,
            round_labels,
        },
    };

    // Advance byes.
    clear_participants_from_round(&mut tournament, 1);
    propagate_winners_forward(&mut tournament, 0);

    log::info!(
        "Generated bracket {} with {} players (size {}, {} byes, best of {})",
        tournament.id,
        players.len(),
        bracket_size,
        byes,
        best_of
    );
    Ok(tournament)
}

/// Lay out first-round slots: the first `bracket_size / 2 - byes` pairs hold two players,
/// every remaining pair holds one player and one empty slot.
fn seed_slots(shuffled: &[&Player], bracket_size: usize) -> Vec<Option<MatchSlot>> {
    let byes = bracket_size - shuffled.len();
    let full_pairs = bracket_size / 2 - byes;
    let (paired, with_bye) = shuffled.split_at(full_pairs * 2);

    let mut slots: Vec<Option<MatchSlot>> = paired.iter().map(|p| Some(MatchSlot::from(*p))).collect();
    for p in with_bye {
        slots.push(Some(MatchSlot::from(*p)));
        slots.push(None);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(format!("P{i}"))).collect()
    }

    #[test]
    fn single_bye_goes_last() {
        let players = roster(3);
        let refs: Vec<&Player> = players.iter().collect();
        let slots = seed_slots(&refs, 4);
        assert_eq!(slots.len(), 4);
        assert!(slots[..3].iter().all(|s| s.is_some()));
        assert!(slots[3].is_none());
    }

    #[test]
    fn every_bye_is_paired_with_a_player() {
        let players = roster(5);
        let refs: Vec<&Player> = players.iter().collect();
        let slots = seed_slots(&refs, 8);
        assert_eq!(slots.len(), 8);
        assert_eq!(slots.iter().filter(|s| s.is_none()).count(), 3);
        for pair in slots.chunks_exact(2) {
            assert!(pair[0].is_some());
        }
    }
}
