//! Integration tests for bracket generation: shape, byes, seeding, labels.

use dart_bracket_web::{
    generate_tournament, generate_tournament_with_rng, Player, Side, Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

fn seeded(players: &[Player], best_of: u32, seed: u64) -> Tournament {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_tournament_with_rng(players, best_of, &mut rng).unwrap()
}

#[test]
fn generate_requires_at_least_2_players() {
    assert_eq!(
        generate_tournament(&roster(1), 3),
        Err(TournamentError::NotEnoughPlayers { required: 2 })
    );
    assert!(matches!(
        generate_tournament(&[], 3),
        Err(TournamentError::NotEnoughPlayers { .. })
    ));
}

#[test]
fn generate_rejects_even_or_zero_best_of() {
    let players = roster(4);
    assert_eq!(generate_tournament(&players, 0), Err(TournamentError::InvalidBestOf(0)));
    assert_eq!(generate_tournament(&players, 4), Err(TournamentError::InvalidBestOf(4)));
    assert!(generate_tournament(&players, 1).is_ok());
}

#[test]
fn bracket_size_byes_and_round_count() {
    for n in 2..=33usize {
        let t = seeded(&roster(n), 3, n as u64);
        let expected_size = n.next_power_of_two();
        assert_eq!(t.meta.bracket_size, expected_size, "n = {n}");
        assert_eq!(t.meta.byes, expected_size - n, "n = {n}");
        assert_eq!(t.round_count(), expected_size.trailing_zeros() as usize, "n = {n}");
        assert_eq!(t.meta.round_labels.len(), t.round_count());
        assert_eq!(t.rounds.last().unwrap().len(), 1);

        for (r, round) in t.rounds.iter().enumerate() {
            assert_eq!(round.len(), expected_size >> (r + 1));
            for (i, m) in round.iter().enumerate() {
                assert_eq!(m.round_index, r);
                assert_eq!(m.match_index, i);
                assert_eq!(m.best_of, 3);
                assert_eq!((m.legs_a, m.legs_b), (0, 0));
                assert_eq!(m.start_player, Side::A);
            }
        }
    }
}

#[test]
fn every_player_is_seeded_exactly_once() {
    let players = roster(11);
    let t = seeded(&players, 3, 42);
    let seeded_ids: Vec<_> = t.rounds[0]
        .iter()
        .flat_map(|m| [m.a.as_ref(), m.b.as_ref()])
        .flatten()
        .map(|s| s.player_id)
        .collect();
    assert_eq!(seeded_ids.len(), players.len());
    let unique: HashSet<_> = seeded_ids.iter().copied().collect();
    let expected: HashSet<_> = players.iter().map(|p| p.id).collect();
    assert_eq!(unique, expected);
}

#[test]
fn byes_advance_immediately() {
    for n in [3usize, 5, 6, 7, 9, 13] {
        let t = seeded(&roster(n), 3, 9);
        let mut bye_count = 0;
        for m in &t.rounds[0] {
            assert!(m.a.is_some() || m.b.is_some(), "empty first-round match for n = {n}");
            let single = m.a.is_some() != m.b.is_some();
            assert_eq!(m.is_bye, single);
            if m.is_bye {
                bye_count += 1;
                let sole = m.a.as_ref().or(m.b.as_ref()).unwrap();
                assert_eq!(m.winner_id, Some(sole.player_id));
                let next = &t.rounds[1][m.match_index / 2];
                assert_eq!(next.slot(Side::for_match_index(m.match_index)), Some(sole));
            } else {
                assert_eq!(m.winner_id, None);
            }
        }
        assert_eq!(bye_count, t.meta.byes);
    }
}

#[test]
fn three_players_best_of_three() {
    let t = seeded(&roster(3), 3, 1);
    assert_eq!(t.meta.bracket_size, 4);
    assert_eq!(t.meta.byes, 1);
    assert_eq!(t.round_count(), 2);
    assert_eq!(t.meta.round_labels, vec!["Semifinal", "Final"]);
    assert_eq!(t.rounds[0].iter().filter(|m| m.is_bye).count(), 1);
    let bye = t.rounds[0].iter().find(|m| m.is_bye).unwrap();
    assert!(bye.winner_id.is_some());
}

#[test]
fn round_labels_by_players_in_round() {
    let t = seeded(&roster(40), 3, 3);
    assert_eq!(
        t.meta.round_labels,
        vec!["Round of 64", "Round of 32", "Round of 16", "Quarterfinal", "Semifinal", "Final"]
    );
    let t = seeded(&roster(2), 1, 3);
    assert_eq!(t.meta.round_labels, vec!["Final"]);
}

#[test]
fn generation_does_not_touch_input_roster() {
    let players = roster(6);
    let before = players.clone();
    let t = seeded(&players, 5, 11);
    assert_eq!(players, before);
    assert_eq!(t.players, before);
    assert_eq!(t.best_of, 5);
}

#[test]
fn same_seed_gives_same_pairings() {
    let players = roster(8);
    let pairings = |t: &Tournament| -> Vec<_> {
        t.rounds[0]
            .iter()
            .map(|m| (m.a.clone().map(|s| s.player_id), m.b.clone().map(|s| s.player_id)))
            .collect()
    };
    assert_eq!(pairings(&seeded(&players, 3, 5)), pairings(&seeded(&players, 3, 5)));
}

#[test]
fn shuffle_is_roughly_uniform() {
    let players = roster(3);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut first_slot_counts = [0usize; 3];
    for _ in 0..6000 {
        let t = generate_tournament_with_rng(&players, 1, &mut rng).unwrap();
        let first = t.rounds[0][0].a.as_ref().unwrap().player_id;
        let idx = players.iter().position(|p| p.id == first).unwrap();
        first_slot_counts[idx] += 1;
    }
    for count in first_slot_counts {
        assert!((1700..=2300).contains(&count), "counts: {first_slot_counts:?}");
    }
}

#[test]
fn tournament_round_trips_through_json() {
    let t = seeded(&roster(7), 3, 8);
    let json = serde_json::to_string(&t).unwrap();
    assert!(json.contains("\"start_player\":\"a\""));
    let back: Tournament = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
