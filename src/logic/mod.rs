//! Bracket business logic: generation, propagation, leg scoring, roster import.

mod bracket;
mod legs;
mod propagation;
mod query;
mod roster;

pub use bracket::{generate_tournament, generate_tournament_with_rng, MIN_PLAYERS};
pub use legs::{
    increment_leg, legs_from_f64, quick_set_winner, recompute_winner_from_legs,
    reset_tournament_winners, update_legs,
};
pub use query::{legs_to_win, next_leg_starter, round_label};
pub use roster::parse_player_names_csv;
