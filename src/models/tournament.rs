//! Tournament, its configuration, groups and knockout rounds.

use crate::models::entrant::Entrant;
use crate::models::game::{GameMatch, MatchId, MatchStatus};
use crate::models::standings::StandingRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Minimum number of entrants needed to generate any format.
pub const MIN_ENTRANTS: usize = 2;

/// Groups are labelled with single letters, so at most A..=Z.
pub const MAX_GROUPS: usize = 26;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Entrant name was blank after trimming.
    EmptyEntrantName,
    /// An entrant with this name already exists (names are unique, case-insensitive).
    DuplicateEntrantName(String),
    /// Tournament name was blank.
    MissingTournamentName,
    /// Not enough entrants registered to generate a tournament.
    NotEnoughEntrants { required: usize, found: usize },
    /// Group count is zero, above [`MAX_GROUPS`], or larger than the number of entrants.
    InvalidGroupCount { num_groups: usize, entrants: usize },
    /// A score was missing, non-numeric, or negative.
    InvalidScore,
    /// No tournament has been generated yet.
    NoTournament,
    /// A tournament is already running; reset before generating another.
    TournamentAlreadyGenerated,
    /// Match is still waiting for one or both entrants.
    MatchNotReady(MatchId),
    /// Match already has a result (or is a bye).
    MatchAlreadyCompleted(MatchId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyEntrantName => write!(f, "Please enter an entrant name"),
            TournamentError::DuplicateEntrantName(name) => {
                write!(f, "{} has already been added", name)
            }
            TournamentError::MissingTournamentName => write!(f, "Please enter a tournament name"),
            TournamentError::NotEnoughEntrants { required, found } => {
                write!(f, "Need at least {} entrants (have {})", required, found)
            }
            TournamentError::InvalidGroupCount { num_groups, entrants } => write!(
                f,
                "Cannot split {} entrants into {} groups (1 to {} groups allowed)",
                entrants,
                num_groups,
                (*entrants).min(MAX_GROUPS)
            ),
            TournamentError::InvalidScore => write!(f, "Please enter valid scores for both sides"),
            TournamentError::NoTournament => write!(f, "No tournament has been generated"),
            TournamentError::TournamentAlreadyGenerated => {
                write!(f, "A tournament is already in progress; reset it first")
            }
            TournamentError::MatchNotReady(_) => {
                write!(f, "Both entrants must be known before entering a score")
            }
            TournamentError::MatchAlreadyCompleted(_) => write!(f, "Match already has a result"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Tournament format chosen at setup.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentFormat {
    /// Groups feeding a knockout stage. Only the group stage is generated.
    Group,
    /// Round-robin groups and nothing else.
    GroupOnly,
    /// Single-elimination bracket.
    #[default]
    Knockout,
}

impl TournamentFormat {
    pub fn has_groups(self) -> bool {
        matches!(self, TournamentFormat::Group | TournamentFormat::GroupOnly)
    }
}

/// Points awarded for each group match outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointSystem {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for PointSystem {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// Settings captured by the setup form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub name: String,
    #[serde(default)]
    pub format: TournamentFormat,
    /// Ignored for knockout.
    #[serde(default = "default_num_groups")]
    pub num_groups: usize,
    /// Rows per group marked as qualifying in the standings. Zero means two.
    #[serde(default)]
    pub teams_per_group: usize,
    #[serde(default)]
    pub points: PointSystem,
    #[serde(default)]
    pub include_third_place: bool,
}

fn default_num_groups() -> usize {
    1
}

impl TournamentConfig {
    pub fn new(name: impl Into<String>, format: TournamentFormat) -> Self {
        Self {
            name: name.into(),
            format,
            num_groups: default_num_groups(),
            teams_per_group: 0,
            points: PointSystem::default(),
            include_third_place: false,
        }
    }

    pub fn qualifying_rows(&self) -> usize {
        if self.teams_per_group == 0 {
            2
        } else {
            self.teams_per_group
        }
    }
}

/// A round-robin group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Letter label: "A", "B", ...
    pub name: String,
    pub entrants: Vec<Entrant>,
    pub matches: Vec<GameMatch>,
}

/// One round of the knockout bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutRound {
    /// 1-based position in the bracket.
    pub number: u32,
    pub name: String,
    pub matches: Vec<GameMatch>,
}

/// State of the knockout part of the tournament.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum KnockoutStage {
    /// Format has no knockout (group-only).
    #[default]
    None,
    /// Groups feed a knockout whose bracket is not generated yet. Qualifier seeding is an
    /// unimplemented extension point.
    AwaitingQualifiers,
    Bracket { rounds: Vec<KnockoutRound> },
}

/// Generated tournament: groups, knockout bracket, and group standings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub config: TournamentConfig,
    /// Entrants in shuffled order.
    pub entrants: Vec<Entrant>,
    pub groups: Vec<Group>,
    pub knockout: KnockoutStage,
    /// Group name -> rows, ranked.
    pub standings: BTreeMap<String, Vec<StandingRow>>,
}

impl Tournament {
    /// Empty tournament for `config`; the generator fills groups and bracket.
    pub fn new(config: TournamentConfig, entrants: Vec<Entrant>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            entrants,
            groups: Vec::new(),
            knockout: KnockoutStage::None,
            standings: BTreeMap::new(),
        }
    }

    pub fn knockout_rounds(&self) -> &[KnockoutRound] {
        match &self.knockout {
            KnockoutStage::Bracket { rounds } => rounds,
            _ => &[],
        }
    }

    /// Every match: group matches first, then the bracket round by round.
    pub fn matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.groups
            .iter()
            .flat_map(|g| g.matches.iter())
            .chain(self.knockout_rounds().iter().flat_map(|r| r.matches.iter()))
    }

    pub fn find_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches().find(|m| m.id == id)
    }

    pub fn standings_for(&self, group: &str) -> Option<&[StandingRow]> {
        self.standings.get(group).map(Vec::as_slice)
    }

    /// Top rows of a group as currently ranked.
    pub fn qualifiers(&self, group: &str) -> &[StandingRow] {
        let rows = self.standings_for(group).unwrap_or(&[]);
        &rows[..self.config.qualifying_rows().min(rows.len())]
    }

    /// The final: the last non-third-place round, when it holds a single match.
    pub fn final_match(&self) -> Option<&GameMatch> {
        self.knockout_rounds()
            .iter()
            .rev()
            .flat_map(|r| r.matches.iter())
            .find(|m| !m.is_third_place)
    }

    /// Winner of the final once decided.
    pub fn champion(&self) -> Option<&Entrant> {
        self.final_match().and_then(GameMatch::winner_entrant)
    }

    /// Nothing left to play: all group matches completed and, with a bracket, the final decided
    /// and no further match ready for a score.
    pub fn is_finished(&self) -> bool {
        let groups_done = self
            .groups
            .iter()
            .flat_map(|g| g.matches.iter())
            .all(|m| m.status == MatchStatus::Completed);
        let knockout_done = match &self.knockout {
            KnockoutStage::None => true,
            KnockoutStage::AwaitingQualifiers => false,
            KnockoutStage::Bracket { .. } => {
                self.champion().is_some() && !self.matches().any(GameMatch::is_ready)
            }
        };
        groups_done && knockout_done
    }
}
