use super::*;
use crate::config::RoundConfig;
use crate::types::{GroupId, MatchId, MatchOutcome};
use chrono::{DateTime, TimeZone, Utc};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, d, 9, 0, 0).unwrap()
}

fn round(id: u64, created: DateTime<Utc>) -> Round {
    let config = RoundConfig::default().validate().unwrap();
    Round::draft(RoundId(id), GroupId(1), &config, created)
}

fn game(round_id: u64, first: u64, second: Option<u64>) -> Match {
    Match {
        id: MatchId(round_id * 100 + first),
        round_id: RoundId(round_id),
        first: PlayerId(first),
        second: second.map(PlayerId),
        first_rating: "0.000".to_string(),
        second_rating: None,
        result: MatchOutcome::Unset,
        first_notation_completed: false,
        second_notation_completed: false,
        notes: String::new(),
        updated_at: day(1),
        homework: None,
    }
}

#[test]
fn test_round_distance_newest_first() {
    let rounds = vec![round(1, day(1)), round(2, day(8)), round(3, day(15))];
    let distances = round_distances(&rounds);
    assert_eq!(distances[&RoundId(3)], 1);
    assert_eq!(distances[&RoundId(2)], 2);
    assert_eq!(distances[&RoundId(1)], 3);
}

#[test]
fn test_round_distance_ties_broken_by_id() {
    let rounds = vec![round(4, day(8)), round(7, day(8))];
    let distances = round_distances(&rounds);
    assert_eq!(distances[&RoundId(7)], 1);
    assert_eq!(distances[&RoundId(4)], 2);
}

#[test]
fn test_pair_keeps_smallest_distance() {
    let rounds = vec![round(1, day(1)), round(2, day(8)), round(3, day(15))];
    let matches = vec![
        game(1, 1, Some(2)),
        game(2, 2, Some(1)),
        game(3, 1, Some(3)),
    ];
    let index = HistoryIndex::build(&rounds, &matches);
    assert_eq!(index.last_met(PlayerId(1), PlayerId(2)), Some(2));
    assert_eq!(index.last_met(PlayerId(2), PlayerId(1)), Some(2));
    assert_eq!(index.last_met(PlayerId(3), PlayerId(1)), Some(1));
    assert_eq!(index.last_met(PlayerId(2), PlayerId(3)), None);
}

#[test]
fn test_bye_counts() {
    let rounds = vec![round(1, day(1)), round(2, day(8))];
    let matches = vec![game(1, 5, None), game(2, 5, None), game(2, 6, None)];
    let index = HistoryIndex::build(&rounds, &matches);
    assert_eq!(index.byes(PlayerId(5)), 2);
    assert_eq!(index.byes(PlayerId(6)), 1);
    assert_eq!(index.byes(PlayerId(7)), 0);
}

#[test]
fn test_unknown_round_is_far_away() {
    let index = HistoryIndex::build(&[], &[game(42, 1, Some(2))]);
    assert_eq!(
        index.last_met(PlayerId(1), PlayerId(2)),
        Some(UNKNOWN_ROUND_DISTANCE)
    );
}
