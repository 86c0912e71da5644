//! Tournament business logic: setup, group play, knockout, score entry, export.

mod export;
mod group_play;
mod knockout;
mod scoring;
mod setup;

pub use export::{standings_csv, write_standings_csv, STANDINGS_HEADER};
pub use group_play::{
    generate_groups, group_name, initialize_standings, round_robin_matches, update_standings,
};
pub use knockout::{
    advance_winner, bracket_size, generate_knockout_bracket, round_name, THIRD_PLACE_ROUND,
};
pub use scoring::{record_score, Score, ScoreField, MAX_SCORE};
pub use setup::{generate_tournament, validate_config};
