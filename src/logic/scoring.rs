//! Score entry: validate raw input, complete the match, and feed standings or the bracket.

use crate::logic::group_play::update_standings;
use crate::logic::knockout::advance_winner;
use crate::models::{
    GameMatch, KnockoutStage, MatchId, MatchStatus, Side, Tournament, TournamentError,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Highest score accepted for one side of a match.
pub const MAX_SCORE: u32 = 9_999;

/// A score as typed by the user: a JSON number or a text field. Anything else (floats,
/// booleans, integers outside i64) lands in `Other` and is rejected by [`ScoreField::value`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreField {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl ScoreField {
    /// Integer value in `0..=MAX_SCORE`, or `InvalidScore`.
    pub fn value(&self) -> Result<u32, TournamentError> {
        let n = match self {
            ScoreField::Number(n) => *n,
            ScoreField::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| TournamentError::InvalidScore)?,
            ScoreField::Other(_) => return Err(TournamentError::InvalidScore),
        };
        u32::try_from(n)
            .ok()
            .filter(|v| *v <= MAX_SCORE)
            .ok_or(TournamentError::InvalidScore)
    }
}

/// Validated result of one match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Both fields must be present, numeric, non-negative and at most [`MAX_SCORE`].
    pub fn parse(
        home: Option<&ScoreField>,
        away: Option<&ScoreField>,
    ) -> Result<Self, TournamentError> {
        let (Some(home), Some(away)) = (home, away) else {
            return Err(TournamentError::InvalidScore);
        };
        Ok(Self::new(home.value()?, away.value()?))
    }

    pub fn is_valid(&self) -> bool {
        self.home <= MAX_SCORE && self.away <= MAX_SCORE
    }

    pub fn winner(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            Ordering::Greater => Some(Side::Home),
            Ordering::Less => Some(Side::Away),
            Ordering::Equal => None,
        }
    }
}

/// Complete a pending match with `score`. The transition happens once.
fn complete_match(game: &mut GameMatch, score: Score) -> Result<(), TournamentError> {
    if !score.is_valid() {
        return Err(TournamentError::InvalidScore);
    }
    match game.status {
        MatchStatus::Completed | MatchStatus::Bye => {
            return Err(TournamentError::MatchAlreadyCompleted(game.id))
        }
        MatchStatus::Pending if !game.is_ready() => {
            return Err(TournamentError::MatchNotReady(game.id))
        }
        MatchStatus::Pending => {}
    }
    game.home_score = Some(score.home);
    game.away_score = Some(score.away);
    game.status = MatchStatus::Completed;
    game.winner = score.winner();
    Ok(())
}

/// Enter the score of match `match_id`.
///
/// A group match updates its group's standings; a knockout match (other than the third place
/// match) advances its winner. Returns the completed match, or `Ok(None)` if no match has this
/// id.
pub fn record_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score: Score,
) -> Result<Option<GameMatch>, TournamentError> {
    for group in &mut tournament.groups {
        let Some(game) = group.matches.iter_mut().find(|m| m.id == match_id) else {
            continue;
        };
        complete_match(game, score)?;
        let game = game.clone();
        match tournament.standings.get_mut(&group.name) {
            Some(rows) => update_standings(rows, &tournament.config.points, &game),
            None => log::debug!("No standings for group {}", group.name),
        }
        log::info!(
            "Group {}: {} {}-{} {}",
            group.name,
            game.home.as_ref().map_or("?", |e| e.name.as_str()),
            score.home,
            score.away,
            game.away.as_ref().map_or("?", |e| e.name.as_str())
        );
        return Ok(Some(game));
    }

    if let KnockoutStage::Bracket { rounds } = &mut tournament.knockout {
        let found = rounds
            .iter_mut()
            .flat_map(|r| r.matches.iter_mut())
            .find(|m| m.id == match_id);
        if let Some(game) = found {
            complete_match(game, score)?;
            let game = game.clone();
            if !game.is_third_place {
                advance_winner(rounds, &game);
            }
            log::info!(
                "{}: {}-{}, winner {}",
                game.round,
                score.home,
                score.away,
                game.winner_entrant().map_or("none (draw)", |e| e.name.as_str())
            );
            return Ok(Some(game));
        }
    }

    log::debug!("Match {} not found; score ignored", match_id);
    Ok(None)
}
