//! Data structures for the knockout bracket: players, matches, tournament, workspace.

mod game;
mod player;
mod tournament;
mod workspace;

pub use game::{Match, MatchId, MatchStatus, Side};
pub use player::{MatchSlot, Player, PlayerId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentMeta};
pub use workspace::{Workspace, WorkspaceId};
