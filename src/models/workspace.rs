//! Workspace: one user's entrant registry plus the tournament generated from it.

use crate::logic::{generate_tournament, record_score, Score};
use crate::models::entrant::EntrantRegistry;
use crate::models::game::{GameMatch, MatchId};
use crate::models::tournament::{Tournament, TournamentConfig, TournamentError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a workspace.
pub type WorkspaceId = Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub registry: EntrantRegistry,
    /// None while in setup.
    pub tournament: Option<Tournament>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            registry: EntrantRegistry::new(),
            tournament: None,
        }
    }

    /// Generate a tournament from the registered entrants. Only valid in setup: a running
    /// tournament must be reset first.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        config: TournamentConfig,
        rng: &mut R,
    ) -> Result<&Tournament, TournamentError> {
        if self.tournament.is_some() {
            return Err(TournamentError::TournamentAlreadyGenerated);
        }
        let tournament = generate_tournament(self.registry.entrants(), config, rng)?;
        Ok(&*self.tournament.insert(tournament))
    }

    /// Enter a score for a match of the current tournament. `Ok(None)` when no such match exists.
    pub fn record_score(
        &mut self,
        match_id: MatchId,
        score: Score,
    ) -> Result<Option<GameMatch>, TournamentError> {
        let tournament = self
            .tournament
            .as_mut()
            .ok_or(TournamentError::NoTournament)?;
        record_score(tournament, match_id, score)
    }

    /// Discard the tournament and return to setup. Registered entrants are kept.
    pub fn reset(&mut self) {
        if let Some(t) = self.tournament.take() {
            log::info!("Workspace {}: discarded tournament {}", self.id, t.id);
        }
    }
}
