//! Group stage: round-robin match generation and standings updates.

use crate::models::{Entrant, GameMatch, Group, PointSystem, StandingRow};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Group label for the bucket at `index`: 0 -> "A", 1 -> "B", ...
pub fn group_name(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

/// Split entrants into `num_groups` groups, entrant `i` going to group `i % num_groups`,
/// and give each group its full round-robin schedule.
///
/// `num_groups` must be at least 1 (checked by the caller).
pub fn generate_groups(entrants: &[Entrant], num_groups: usize) -> Vec<Group> {
    let mut groups: Vec<Group> = (0..num_groups)
        .map(|i| Group {
            name: group_name(i),
            entrants: Vec::new(),
            matches: Vec::new(),
        })
        .collect();

    for (i, entrant) in entrants.iter().enumerate() {
        groups[i % num_groups].entrants.push(entrant.clone());
    }

    for group in &mut groups {
        group.matches = round_robin_matches(&group.entrants, &format!("Group {}", group.name));
    }
    groups
}

/// Every unordered pair exactly once, `i < j`, the earlier entrant at home.
pub fn round_robin_matches(entrants: &[Entrant], round: &str) -> Vec<GameMatch> {
    let mut matches = Vec::with_capacity(entrants.len() * entrants.len().saturating_sub(1) / 2);
    for (i, home) in entrants.iter().enumerate() {
        for away in &entrants[i + 1..] {
            matches.push(GameMatch::new(
                Some(home.clone()),
                Some(away.clone()),
                round,
            ));
        }
    }
    matches
}

/// One zeroed row per entrant, in group order.
pub fn initialize_standings(groups: &[Group]) -> BTreeMap<String, Vec<StandingRow>> {
    groups
        .iter()
        .map(|g| {
            let rows = g.entrants.iter().cloned().map(StandingRow::new).collect();
            (g.name.clone(), rows)
        })
        .collect()
}

/// Apply a completed match to a group's rows and re-rank them.
///
/// Silently does nothing if the match lacks an entrant or a score, or if either entrant has
/// no row in `rows`.
pub fn update_standings(rows: &mut [StandingRow], points: &PointSystem, game: &GameMatch) {
    let (Some(home), Some(away), Some(home_score), Some(away_score)) =
        (&game.home, &game.away, game.home_score, game.away_score)
    else {
        log::debug!("Match {} has no complete result; standings unchanged", game.id);
        return;
    };

    let home_idx = rows.iter().position(|r| r.entrant.name == home.name);
    let away_idx = rows.iter().position(|r| r.entrant.name == away.name);
    let (Some(home_idx), Some(away_idx)) = (home_idx, away_idx) else {
        log::debug!(
            "No standings row for {} or {}; standings unchanged",
            home.name,
            away.name
        );
        return;
    };

    let (home_points, away_points) = match home_score.cmp(&away_score) {
        Ordering::Greater => (points.win, points.loss),
        Ordering::Less => (points.loss, points.win),
        Ordering::Equal => (points.draw, points.draw),
    };
    rows[home_idx].record(home_score, away_score, home_points);
    rows[away_idx].record(away_score, home_score, away_points);

    // Stable: rows level on all three keys keep their previous order.
    rows.sort_by(StandingRow::ranking_cmp);
}
