use super::*;
use crate::config::RoundConfig;
use crate::homework::{HomeworkEntry, SideHomework};
use crate::types::{GroupId, MatchId, PlayerId, RoundId};
use chrono::{TimeZone, Utc};

fn round(notation_required: bool, policy: MissingPolicy) -> Round {
    let config = RoundConfig {
        notation_required,
        homework_missing_policy: policy,
        ..Default::default()
    }
    .validate()
    .unwrap();
    Round::draft(
        RoundId(1),
        GroupId(1),
        &config,
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    )
}

fn game(id: u64, first: u64, second: Option<u64>, result: MatchOutcome) -> Match {
    Match {
        id: MatchId(id),
        round_id: RoundId(1),
        first: PlayerId(first),
        second: second.map(PlayerId),
        first_rating: "0.000".to_string(),
        second_rating: second.map(|_| "0.000".to_string()),
        result,
        first_notation_completed: false,
        second_notation_completed: false,
        notes: String::new(),
        updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        homework: None,
    }
}

fn sample() -> Vec<Match> {
    let mut decided = game(1, 1, Some(2), MatchOutcome::Tie);
    decided.first_notation_completed = true;
    decided.homework = Some(HomeworkEntry {
        first: SideHomework::recorded(true, 7, 10),
        second: SideHomework::default(),
    });
    vec![
        decided,
        game(2, 3, Some(4), MatchOutcome::Unset),
        game(3, 5, None, MatchOutcome::Bye),
    ]
}

#[test]
fn test_progress_counts() {
    let progress = RoundProgress::measure(&round(true, MissingPolicy::Zero), &sample());
    assert_eq!(progress.total_matches, 3);
    assert_eq!(progress.completed_results, 2);
    assert_eq!(progress.homework_total, 5);
    assert_eq!(progress.homework_done, 1);
    assert_eq!(progress.notation_total, 5);
    assert_eq!(progress.notation_done, 1);
    assert!(!progress.results_complete());
}

#[test]
fn test_progress_without_notation() {
    let progress = RoundProgress::measure(&round(false, MissingPolicy::Zero), &sample());
    assert_eq!(progress.notation_total, 0);
    assert_eq!(progress.notation_done, 0);
}

#[test]
fn test_exceptions_under_exclude_policy() {
    let exceptions = round_exceptions(&round(true, MissingPolicy::Exclude), &sample());
    assert_eq!(
        exceptions,
        vec![
            "1 match results missing".to_string(),
            "4 homework submissions missing".to_string(),
            "4 notation checks missing".to_string(),
        ]
    );
}

#[test]
fn test_missing_homework_hidden_when_scored_automatically() {
    let exceptions = round_exceptions(&round(false, MissingPolicy::Penalty), &sample());
    assert_eq!(exceptions, vec!["1 match results missing".to_string()]);
}

#[test]
fn test_complete_round_has_no_exceptions() {
    let mut done = game(1, 1, Some(2), MatchOutcome::First);
    done.homework = Some(HomeworkEntry {
        first: SideHomework::recorded(true, 10, 10),
        second: SideHomework::recorded(true, 4, 10),
    });
    let exceptions = round_exceptions(&round(false, MissingPolicy::Exclude), &[done]);
    assert!(exceptions.is_empty());
}
