//! Workspace: one organizer's roster, best-of setting and current tournament.

use crate::config::{validate_best_of, DEFAULT_BEST_OF};
use crate::logic::{generate_tournament, parse_player_names_csv};
use crate::models::player::{Player, PlayerId};
use crate::models::tournament::{Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::io::Read;
use uuid::Uuid;

/// Unique identifier for a workspace.
pub type WorkspaceId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    /// Editable roster; frozen while `tournament` is set.
    pub players: Vec<Player>,
    /// Best-of used for the next generated bracket.
    pub best_of: u32,
    pub tournament: Option<Tournament>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            best_of: DEFAULT_BEST_OF,
            tournament: None,
        }
    }
}

impl Workspace {
    /// Create an empty workspace with the given best-of.
    pub fn new(best_of: u32) -> Result<Self, TournamentError> {
        validate_best_of(best_of)?;
        Ok(Self {
            best_of,
            ..Self::default()
        })
    }

    fn ensure_roster_editable(&self) -> Result<(), TournamentError> {
        if self.tournament.is_some() {
            return Err(TournamentError::RosterLocked);
        }
        Ok(())
    }

    /// Add a player. Names are trimmed and must be unique (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        self.ensure_roster_editable()?;
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        self.ensure_roster_editable()?;
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Add every name from a CSV roster. Nothing is added if any name is rejected.
    pub fn import_players_csv<R: Read>(&mut self, reader: R) -> Result<usize, TournamentError> {
        self.ensure_roster_editable()?;
        let names = parse_player_names_csv(reader)?;
        let mut staged = self.clone();
        for name in &names {
            staged.add_player(name.as_str())?;
        }
        self.players = staged.players;
        log::info!("Imported {} player(s) into workspace {}", names.len(), self.id);
        Ok(names.len())
    }

    /// Change the best-of for the next generated bracket.
    pub fn set_best_of(&mut self, best_of: u32) -> Result<(), TournamentError> {
        validate_best_of(best_of)?;
        self.best_of = best_of;
        Ok(())
    }

    /// Build a fresh random bracket from the roster, replacing any existing one.
    pub fn generate(&mut self) -> Result<&Tournament, TournamentError> {
        let tournament = generate_tournament(&self.players, self.best_of)?;
        Ok(&*self.tournament.insert(tournament))
    }

    /// Replace the tournament with the result of a pure tree transformation.
    pub fn update_tournament<F>(&mut self, f: F) -> Result<&Tournament, TournamentError>
    where
        F: FnOnce(&Tournament) -> Tournament,
    {
        let current = self.tournament.as_ref().ok_or(TournamentError::NoTournament)?;
        let next = f(current);
        Ok(&*self.tournament.insert(next))
    }

    /// Drop the roster and tournament and restore the default best-of.
    pub fn clear(&mut self) {
        self.players.clear();
        self.tournament = None;
        self.best_of = DEFAULT_BEST_OF;
    }
}
