//! Knockout stage: single-elimination bracket with byes, and winner progression.

use crate::models::{Entrant, GameMatch, KnockoutRound, MatchStatus, Side};

pub const THIRD_PLACE_ROUND: &str = "3rd Place Match";

/// Smallest power of two that holds every entrant.
pub fn bracket_size(entrants: usize) -> usize {
    entrants.max(1).next_power_of_two()
}

/// Name of the round built from a previous round of `previous_matches` matches.
pub fn round_name(previous_matches: usize, number: u32) -> String {
    match previous_matches {
        2 => "Final".to_string(),
        4 => "Semi-Finals".to_string(),
        8 => "Quarter-Finals".to_string(),
        _ => format!("Round {}", number),
    }
}

/// Build the whole bracket from entrants in seeding order.
///
/// Round 1 has `bracket_size / 2` slots: consecutive entrants are paired first, and the
/// `bracket_size - n` entrants left over get a bye each. Later rounds are empty placeholders
/// fed by pairs of matches from the round before. Bye winners are already advanced into
/// round 2. Fewer than two entrants produce no rounds.
pub fn generate_knockout_bracket(
    entrants: &[Entrant],
    include_third_place: bool,
) -> Vec<KnockoutRound> {
    if entrants.len() < 2 {
        return Vec::new();
    }

    let size = bracket_size(entrants.len());
    let byes = size - entrants.len();
    let paired = size / 2 - byes;
    let (pairs, leftovers) = entrants.split_at(paired * 2);

    let first_name = "Round 1";
    let first: Vec<GameMatch> = pairs
        .chunks_exact(2)
        .map(|pair| GameMatch::new(Some(pair[0].clone()), Some(pair[1].clone()), first_name))
        .chain(leftovers.iter().map(|e| GameMatch::bye(e.clone(), first_name)))
        .collect();

    let mut rounds = vec![KnockoutRound {
        number: 1,
        name: first_name.to_string(),
        matches: first,
    }];

    while let Some(previous) = rounds.last().filter(|r| r.matches.len() > 1) {
        let number = previous.number + 1;
        let name = round_name(previous.matches.len(), number);
        let matches = previous
            .matches
            .chunks_exact(2)
            .map(|pair| GameMatch::placeholder(name.clone(), vec![pair[0].id, pair[1].id]))
            .collect();
        rounds.push(KnockoutRound {
            number,
            name,
            matches,
        });
    }

    if include_third_place && rounds.len() > 1 {
        let semis = &rounds[rounds.len() - 2];
        if semis.matches.len() == 2 {
            let third_place = GameMatch {
                loser_sources: semis.matches.iter().map(|m| m.id).collect(),
                is_third_place: true,
                ..GameMatch::placeholder(THIRD_PLACE_ROUND, Vec::new())
            };
            rounds.push(KnockoutRound {
                number: rounds.len() as u32 + 1,
                name: THIRD_PLACE_ROUND.to_string(),
                matches: vec![third_place],
            });
        }
    }

    let byes: Vec<GameMatch> = rounds[0]
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Bye)
        .cloned()
        .collect();
    for bye in &byes {
        advance_winner(&mut rounds, bye);
    }

    rounds
}

fn side_for_source(position: usize) -> Side {
    if position == 0 {
        Side::Home
    } else {
        Side::Away
    }
}

/// Put the winner of `decided` into every match that lists it as a source (home when it is
/// the first source, away otherwise), and its loser into matches that list it as a loser
/// source. Draws and undecided matches advance nobody.
pub fn advance_winner(rounds: &mut [KnockoutRound], decided: &GameMatch) {
    let Some(winner) = decided.winner_entrant() else {
        return;
    };
    let loser = decided.loser_entrant();

    for next in rounds.iter_mut().flat_map(|r| r.matches.iter_mut()) {
        if let Some(pos) = next.source_matches.iter().position(|id| *id == decided.id) {
            *next.slot_mut(side_for_source(pos)) = Some(winner.clone());
        }
        if let (Some(loser), Some(pos)) = (
            loser,
            next.loser_sources.iter().position(|id| *id == decided.id),
        ) {
            *next.slot_mut(side_for_source(pos)) = Some(loser.clone());
        }
    }
}
