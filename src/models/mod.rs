//! Data structures for the tournament planner: entrants, matches, groups, brackets, standings.

mod entrant;
mod game;
mod standings;
mod tournament;
mod workspace;

pub use entrant::{Entrant, EntrantRegistry, DEFAULT_ENTRANT_COLOR};
pub use game::{GameMatch, MatchId, MatchStatus, Side};
pub use standings::StandingRow;
pub use tournament::{
    Group, KnockoutRound, KnockoutStage, PointSystem, Tournament, TournamentConfig,
    TournamentError, TournamentFormat, TournamentId, MAX_GROUPS, MIN_ENTRANTS,
};
pub use workspace::{Workspace, WorkspaceId};
