//! Dart knockout bracket: library with models, bracket logic, config and storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod storage;

pub use config::{ServerConfig, BEST_OF_OPTIONS, DEFAULT_BEST_OF};
pub use logic::{
    generate_tournament, generate_tournament_with_rng, increment_leg, legs_from_f64, legs_to_win,
    next_leg_starter, parse_player_names_csv, quick_set_winner, recompute_winner_from_legs,
    reset_tournament_winners, round_label, update_legs,
};
pub use models::{
    Match, MatchId, MatchSlot, MatchStatus, Player, PlayerId, Side, Tournament, TournamentError,
    TournamentId, TournamentMeta, Workspace, WorkspaceId,
};
