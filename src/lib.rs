//! Tournament planner web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_winner, bracket_size, generate_groups, generate_knockout_bracket, generate_tournament,
    initialize_standings, record_score, round_name, round_robin_matches, standings_csv,
    update_standings, validate_config, write_standings_csv, Score, ScoreField, MAX_SCORE,
};
pub use models::{
    Entrant, EntrantRegistry, GameMatch, Group, KnockoutRound, KnockoutStage, MatchId,
    MatchStatus, PointSystem, Side, StandingRow, Tournament, TournamentConfig, TournamentError,
    TournamentFormat, TournamentId, Workspace, WorkspaceId,
};
