//! Integration tests for bracket generation and winner progression.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tournament_planner::{
    advance_winner, bracket_size, generate_knockout_bracket, generate_tournament, record_score,
    Entrant, GameMatch, KnockoutRound, MatchStatus, Score, Side, TournamentConfig,
    TournamentFormat,
};

fn numbered(n: usize) -> Vec<Entrant> {
    (0..n).map(|i| Entrant::new(format!("T{i}"), "#000000")).collect()
}

fn names(rounds: &[KnockoutRound]) -> Vec<&str> {
    rounds.iter().map(|r| r.name.as_str()).collect()
}

fn decide(m: &GameMatch, home: u32, away: u32) -> GameMatch {
    let mut m = m.clone();
    m.home_score = Some(home);
    m.away_score = Some(away);
    m.status = MatchStatus::Completed;
    m.winner = match home.cmp(&away) {
        std::cmp::Ordering::Greater => Some(Side::Home),
        std::cmp::Ordering::Less => Some(Side::Away),
        std::cmp::Ordering::Equal => None,
    };
    m
}

#[test]
fn first_round_slots_cover_every_entrant_once() {
    for n in 2..=40 {
        let size = bracket_size(n);
        assert!(size.is_power_of_two());
        assert!(size >= n && size / 2 < n, "n={n} size={size}");

        let rounds = generate_knockout_bracket(&numbered(n), false);
        let first = &rounds[0].matches;
        let byes = first.iter().filter(|m| m.status == MatchStatus::Bye).count();
        let played = first.iter().filter(|m| m.status == MatchStatus::Pending).count();
        assert_eq!(byes, size - n);
        assert_eq!(played + byes, size / 2);

        let mut seen = HashSet::new();
        for m in first {
            for e in [&m.home, &m.away].into_iter().flatten() {
                assert!(seen.insert(e.name.clone()), "{} placed twice", e.name);
            }
        }
        assert_eq!(seen.len(), n);

        let last = rounds.last().unwrap();
        assert_eq!(last.matches.len(), 1);
        for pair in rounds.windows(2) {
            assert_eq!(pair[1].matches.len() * 2, pair[0].matches.len());
        }
    }
}

#[test]
fn three_entrants_get_one_bye() {
    let teams = numbered(3);
    let rounds = generate_knockout_bracket(&teams, false);
    assert_eq!(bracket_size(3), 4);
    assert_eq!(names(&rounds), vec!["Round 1", "Final"]);

    let first = &rounds[0].matches;
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].status, MatchStatus::Pending);
    assert_eq!(first[0].home.as_ref().unwrap().name, "T0");
    assert_eq!(first[0].away.as_ref().unwrap().name, "T1");

    let bye = &first[1];
    assert_eq!(bye.status, MatchStatus::Bye);
    assert_eq!(bye.winner, Some(Side::Home));
    assert_eq!(bye.winner_entrant().unwrap().name, "T2");
    assert!(bye.away.is_none());
    assert!(bye.home_score.is_none() && bye.away_score.is_none());

    let fin = &rounds[1].matches;
    assert_eq!(fin.len(), 1);
    assert_eq!(fin[0].source_matches, vec![first[0].id, bye.id]);
    // The bye has already advanced; the other slot waits for T0 v T1.
    assert!(fin[0].home.is_none());
    assert_eq!(fin[0].away.as_ref().unwrap().name, "T2");
}

#[test]
fn two_byes_meet_in_round_two() {
    let rounds = generate_knockout_bracket(&numbered(6), false);
    assert_eq!(names(&rounds), vec!["Round 1", "Semi-Finals", "Final"]);
    let semis = &rounds[1].matches;
    assert!(!semis[0].is_ready());
    assert!(semis[1].is_ready());
    assert_eq!(semis[1].home.as_ref().unwrap().name, "T4");
    assert_eq!(semis[1].away.as_ref().unwrap().name, "T5");
}

#[test]
fn rounds_are_named_by_size() {
    let rounds = generate_knockout_bracket(&numbered(2), false);
    assert_eq!(names(&rounds), vec!["Round 1"]);

    let rounds = generate_knockout_bracket(&numbered(16), false);
    assert_eq!(
        names(&rounds),
        vec!["Round 1", "Quarter-Finals", "Semi-Finals", "Final"]
    );

    let rounds = generate_knockout_bracket(&numbered(32), false);
    assert_eq!(
        names(&rounds),
        vec!["Round 1", "Round 2", "Quarter-Finals", "Semi-Finals", "Final"]
    );
    let numbers: Vec<u32> = rounds.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn third_place_match_follows_the_final() {
    let rounds = generate_knockout_bracket(&numbered(8), true);
    assert_eq!(
        names(&rounds),
        vec!["Round 1", "Semi-Finals", "Final", "3rd Place Match"]
    );
    let third = &rounds[3].matches[0];
    assert!(third.is_third_place);
    assert!(third.source_matches.is_empty());
    let semi_ids: Vec<_> = rounds[1].matches.iter().map(|m| m.id).collect();
    assert_eq!(third.loser_sources, semi_ids);
    assert_eq!(rounds[3].number, 4);
}

#[test]
fn no_third_place_without_two_semifinals() {
    let rounds = generate_knockout_bracket(&numbered(2), true);
    assert_eq!(names(&rounds), vec!["Round 1"]);
    assert!(rounds.iter().flat_map(|r| &r.matches).all(|m| !m.is_third_place));
}

#[test]
fn fewer_than_two_entrants_build_nothing() {
    assert!(generate_knockout_bracket(&numbered(0), true).is_empty());
    assert!(generate_knockout_bracket(&numbered(1), true).is_empty());
}

#[test]
fn winners_fill_home_then_away() {
    let mut rounds = generate_knockout_bracket(&numbered(4), false);
    let m0 = decide(&rounds[0].matches[0], 3, 1);
    let m1 = decide(&rounds[0].matches[1], 0, 2);

    advance_winner(&mut rounds, &m1);
    let fin = &rounds[1].matches[0];
    assert!(fin.home.is_none());
    assert_eq!(fin.away.as_ref().unwrap().name, "T3");

    advance_winner(&mut rounds, &m0);
    let fin = &rounds[1].matches[0];
    assert_eq!(fin.home.as_ref().unwrap().name, "T0");
    assert!(fin.is_ready());
}

#[test]
fn draws_advance_nobody() {
    let mut rounds = generate_knockout_bracket(&numbered(4), true);
    let drawn = decide(&rounds[0].matches[0], 1, 1);
    assert!(drawn.is_draw());
    advance_winner(&mut rounds, &drawn);
    assert!(rounds[1].matches[0].home.is_none());
    assert!(rounds[2].matches[0].home.is_none());
}

#[test]
fn losers_fill_the_third_place_match() {
    let mut rounds = generate_knockout_bracket(&numbered(4), true);
    let m0 = decide(&rounds[0].matches[0], 2, 0);
    let m1 = decide(&rounds[0].matches[1], 0, 1);
    advance_winner(&mut rounds, &m0);
    advance_winner(&mut rounds, &m1);

    let third = &rounds[2].matches[0];
    assert_eq!(third.home.as_ref().unwrap().name, "T1");
    assert_eq!(third.away.as_ref().unwrap().name, "T2");
    assert!(third.is_ready());
}

#[test]
fn third_place_beside_a_bye_is_never_played() {
    let mut config = TournamentConfig::new("Cup", TournamentFormat::Knockout);
    config.include_third_place = true;
    let mut t = generate_tournament(&numbered(3), config, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(names(t.knockout_rounds()), vec!["Round 1", "Final", "3rd Place Match"]);

    let first = t.knockout_rounds()[0].matches.clone();
    let (played, bye) = (&first[0], &first[1]);
    assert_eq!(bye.status, MatchStatus::Bye);
    let third_id = t.knockout_rounds()[2].matches[0].id;
    assert_eq!(t.find_match(third_id).unwrap().loser_sources, vec![played.id, bye.id]);

    record_score(&mut t, played.id, Score::new(3, 0)).unwrap();
    let third = t.find_match(third_id).unwrap();
    assert_eq!(third.home, played.away);
    // A bye has no loser, so the away slot stays empty for good.
    assert!(third.away.is_none());
    assert!(!third.is_ready());

    let final_id = t.knockout_rounds()[1].matches[0].id;
    record_score(&mut t, final_id, Score::new(1, 2)).unwrap();
    assert_eq!(t.champion(), bye.home.as_ref());
    assert_eq!(t.find_match(third_id).unwrap().status, MatchStatus::Pending);
    assert!(t.is_finished());
}
