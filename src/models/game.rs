//! Match (game), its status, and which side won.

use crate::models::entrant::Entrant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of the match won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// Lifecycle of a match. Transitions only go forward: pending/bye -> completed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    /// Entrant advances without an opponent.
    Bye,
    Completed,
}

/// A single match between two entrants. Knockout placeholders start with empty slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub home: Option<Entrant>,
    pub away: Option<Entrant>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: MatchStatus,
    /// None while undecided, and on a completed draw.
    pub winner: Option<Side>,
    /// Round label ("Group A", "Round 1", "Final", ...).
    pub round: String,
    /// Knockout only: matches whose winners fill home (first) and away (second).
    #[serde(default)]
    pub source_matches: Vec<MatchId>,
    /// Third place only: matches whose losers fill home (first) and away (second).
    #[serde(default)]
    pub loser_sources: Vec<MatchId>,
    #[serde(default)]
    pub is_third_place: bool,
}

impl GameMatch {
    pub fn new(home: Option<Entrant>, away: Option<Entrant>, round: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            home,
            away,
            home_score: None,
            away_score: None,
            status: MatchStatus::Pending,
            winner: None,
            round: round.into(),
            source_matches: Vec::new(),
            loser_sources: Vec::new(),
            is_third_place: false,
        }
    }

    /// Entrant with no opponent; advances automatically.
    pub fn bye(entrant: Entrant, round: impl Into<String>) -> Self {
        Self {
            status: MatchStatus::Bye,
            winner: Some(Side::Home),
            ..Self::new(Some(entrant), None, round)
        }
    }

    /// Empty knockout slot fed by the winners of `sources`.
    pub fn placeholder(round: impl Into<String>, sources: Vec<MatchId>) -> Self {
        Self {
            source_matches: sources,
            ..Self::new(None, None, round)
        }
    }

    pub fn entrant(&self, side: Side) -> Option<&Entrant> {
        match side {
            Side::Home => self.home.as_ref(),
            Side::Away => self.away.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Option<Entrant> {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn winner_entrant(&self) -> Option<&Entrant> {
        self.winner.and_then(|side| self.entrant(side))
    }

    /// Loser of a decided match with both slots filled. Byes have no loser.
    pub fn loser_entrant(&self) -> Option<&Entrant> {
        match self.winner? {
            Side::Home => self.away.as_ref(),
            Side::Away => self.home.as_ref(),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.status == MatchStatus::Completed && self.winner.is_none()
    }

    /// Pending with both entrants known, so a score can be entered.
    pub fn is_ready(&self) -> bool {
        self.status == MatchStatus::Pending && self.home.is_some() && self.away.is_some()
    }

    pub fn involves(&self, name: &str) -> bool {
        [&self.home, &self.away]
            .into_iter()
            .flatten()
            .any(|e| e.name == name)
    }
}
