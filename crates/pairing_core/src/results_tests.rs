use super::*;
use crate::config::RoundConfig;
use crate::lifecycle::RoundStatus;
use crate::types::{GroupId, RoundId};
use chrono::TimeZone;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap()
}

fn round() -> Round {
    let config = RoundConfig::default().validate().unwrap();
    Round::draft(RoundId(1), GroupId(1), &config, now())
}

fn pairing(id: u64, first: u64, second: Option<u64>) -> Match {
    Match {
        id: MatchId(id),
        round_id: RoundId(1),
        first: PlayerId(first),
        second: second.map(PlayerId),
        first_rating: "0.500".to_string(),
        second_rating: second.map(|_| "0.500".to_string()),
        result: if second.is_some() {
            MatchOutcome::Unset
        } else {
            MatchOutcome::Bye
        },
        first_notation_completed: false,
        second_notation_completed: false,
        notes: String::new(),
        updated_at: now(),
        homework: None,
    }
}

fn submitted(correct: u32) -> SideUpdate {
    SideUpdate {
        submitted: true,
        correct,
        notation_completed: true,
    }
}

#[test]
fn test_sheet_applies_results_and_homework() {
    let mut round = round();
    let mut matches = vec![pairing(10, 1, Some(2)), pairing(11, 3, None)];
    let mut attendance = Vec::new();

    let mut update = MatchUpdate::new(MatchId(10), "second");
    update.first = submitted(7);
    update.notes = "  good game ".to_string();
    let sheet = ResultSheet::for_round(&round)
        .with_match(update)
        .with_attendance(PlayerId(4), AttendanceStatus::Excused);

    apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now()).unwrap();

    let m = &matches[0];
    assert_eq!(m.result, MatchOutcome::Second);
    assert_eq!(m.notes, "good game");
    assert!(m.first_notation_completed);
    assert!(!m.second_notation_completed);
    let entry = m.homework.unwrap();
    assert_eq!(entry.first, SideHomework { submitted: true, correct: 7, incorrect: 3 });
    assert_eq!(entry.second, SideHomework::default());
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0].status, AttendanceStatus::Excused);
    assert_eq!(round.status, RoundStatus::Draft);
}

#[test]
fn test_bye_match_forced_to_bye() {
    let mut round = round();
    let mut matches = vec![pairing(11, 3, None)];
    let mut attendance = Vec::new();
    let sheet = ResultSheet::for_round(&round).with_match(MatchUpdate::new(MatchId(11), "nonsense"));

    apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now()).unwrap();
    assert_eq!(matches[0].result, MatchOutcome::Bye);
}

#[test]
fn test_bye_ignores_empty_seat_homework() {
    let mut round = round();
    let mut matches = vec![pairing(11, 3, None)];
    let mut attendance = Vec::new();
    let mut update = MatchUpdate::new(MatchId(11), "bye");
    update.first = submitted(6);
    update.second = submitted(50);
    let sheet = ResultSheet::for_round(&round).with_match(update);

    apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now()).unwrap();
    let entry = matches[0].homework.unwrap();
    assert_eq!(entry.first, SideHomework { submitted: true, correct: 6, incorrect: 4 });
    assert_eq!(entry.second, SideHomework::default());
    assert!(matches[0].first_notation_completed);
    assert!(!matches[0].second_notation_completed);
}

#[test]
fn test_invalid_token_rejects_whole_sheet() {
    let mut round = round();
    let mut matches = vec![pairing(10, 1, Some(2)), pairing(12, 5, Some(6))];
    let mut attendance = Vec::new();
    let before = matches.clone();

    let sheet = ResultSheet::for_round(&round)
        .with_match(MatchUpdate::new(MatchId(10), "first"))
        .with_match(MatchUpdate::new(MatchId(12), "1-0"));

    let err = apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now())
        .unwrap_err();
    assert!(matches!(err, PairingError::InvalidResult(_)));
    assert_eq!(matches, before);
}

#[test]
fn test_correct_above_total_rejected() {
    let mut round = round();
    let mut matches = vec![pairing(10, 1, Some(2))];
    let mut attendance = Vec::new();
    let mut update = MatchUpdate::new(MatchId(10), "tie");
    update.second = submitted(11);
    let sheet = ResultSheet::for_round(&round).with_match(update);

    let err = apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now())
        .unwrap_err();
    assert!(matches!(err, PairingError::InvalidResult(_)));
    assert_eq!(matches[0].result, MatchOutcome::Unset);
}

#[test]
fn test_penalty_above_hundred_rejected() {
    let mut round = round();
    let mut matches = vec![pairing(10, 1, Some(2))];
    let mut attendance = Vec::new();
    let mut sheet = ResultSheet::for_round(&round).with_match(MatchUpdate::new(MatchId(10), "first"));
    sheet.homework_missing_penalty_wrong_pct = 101;

    let err = apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now())
        .unwrap_err();
    assert!(matches!(err, PairingError::InvalidConfiguration(_)));
    assert_eq!(round.homework_missing_penalty_wrong_pct, 100);
    assert_eq!(matches[0].result, MatchOutcome::Unset);
}

#[test]
fn test_zero_total_questions_rejected() {
    let mut round = round();
    let mut matches = vec![pairing(10, 1, Some(2))];
    let mut attendance = Vec::new();
    let mut sheet = ResultSheet::for_round(&round);
    sheet.homework_total_questions = 0;

    let err = apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now())
        .unwrap_err();
    assert!(matches!(err, PairingError::InvalidConfiguration(_)));
    assert_eq!(round.homework_total_questions, 10);
}

#[test]
fn test_unknown_match_rejected() {
    let mut round = round();
    let mut matches = vec![pairing(10, 1, Some(2))];
    let mut attendance = Vec::new();
    let sheet = ResultSheet::for_round(&round).with_match(MatchUpdate::new(MatchId(99), "first"));

    assert!(apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now()).is_err());
}

#[test]
fn test_finalized_round_is_locked() {
    let mut round = round();
    round.status = RoundStatus::Finalized;
    let mut matches = vec![pairing(10, 1, Some(2))];
    let mut attendance = Vec::new();
    let sheet = ResultSheet::for_round(&round).with_match(MatchUpdate::new(MatchId(10), "first"));

    let err = apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now())
        .unwrap_err();
    assert_eq!(err, PairingError::RoundLocked { round_id: RoundId(1) });
}

#[test]
fn test_existing_attendance_updated_in_place() {
    let mut round = round();
    let mut matches: Vec<Match> = Vec::new();
    let mut attendance = vec![AttendanceRecord {
        round_id: RoundId(1),
        player_id: PlayerId(2),
        status: AttendanceStatus::Present,
    }];
    let sheet = ResultSheet::for_round(&round).with_attendance(PlayerId(2), AttendanceStatus::Late);

    apply_result_sheet(&mut round, &mut matches, &mut attendance, &sheet, now()).unwrap();
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0].status, AttendanceStatus::Late);
}
