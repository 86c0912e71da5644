//! StandingRow: one entrant's accumulated record within a group.

use crate::models::entrant::Entrant;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub entrant: Entrant,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Always `goals_for - goals_against`.
    pub goal_difference: i64,
    pub points: i64,
}

impl StandingRow {
    pub fn new(entrant: Entrant) -> Self {
        Self {
            entrant,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    /// Add one played match: goals scored/conceded and the points it earned.
    pub fn record(&mut self, scored: u32, conceded: u32, points: i32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        match scored.cmp(&conceded) {
            Ordering::Greater => self.won += 1,
            Ordering::Less => self.lost += 1,
            Ordering::Equal => self.drawn += 1,
        }
        self.points += i64::from(points);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
    }

    /// Ranking order: points, then goal difference, then goals scored (all descending).
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then(other.goal_difference.cmp(&self.goal_difference))
            .then(other.goals_for.cmp(&self.goals_for))
    }
}
