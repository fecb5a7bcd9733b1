//! Result entry for a round
//!
//! A [`ResultSheet`] carries everything an organiser submits for a round at
//! once: the homework rules, attendance, and per-match results. The sheet is
//! validated completely before anything is written, so a rejected sheet
//! leaves the round, its matches and its attendance untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::attendance::{AttendanceRecord, AttendanceStatus};
use crate::error::{PairingError, Result};
use crate::homework::{MissingPolicy, SideHomework};
use crate::lifecycle::Round;
use crate::types::{Match, MatchId, MatchOutcome, PlayerId, Seat};

/// Entry for one seat of a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideUpdate {
    pub submitted: bool,
    pub correct: u32,
    pub notation_completed: bool,
}

/// Entry for one match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchUpdate {
    pub match_id: MatchId,
    /// Result token: first, second, tie, bye, or blank for not yet entered
    pub result: String,
    pub first: SideUpdate,
    pub second: SideUpdate,
    pub notes: String,
}

impl MatchUpdate {
    pub fn new(match_id: MatchId, result: &str) -> Self {
        Self {
            match_id,
            result: result.to_string(),
            ..Default::default()
        }
    }

    pub fn side(&self, seat: Seat) -> &SideUpdate {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    pub fn side_mut(&mut self, seat: Seat) -> &mut SideUpdate {
        match seat {
            Seat::First => &mut self.first,
            Seat::Second => &mut self.second,
        }
    }
}

/// Everything submitted for a round in one save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSheet {
    pub homework_total_questions: u32,
    pub homework_missing_policy: MissingPolicy,
    pub homework_missing_penalty_wrong_pct: u32,
    pub notation_required: bool,
    #[serde(default)]
    pub attendance: BTreeMap<PlayerId, AttendanceStatus>,
    /// Matches without an entry keep their current values
    #[serde(default)]
    pub matches: Vec<MatchUpdate>,
}

impl ResultSheet {
    /// An empty sheet that keeps the round's current homework rules
    pub fn for_round(round: &Round) -> Self {
        Self {
            homework_total_questions: round.homework_total_questions,
            homework_missing_policy: round.homework_missing_policy,
            homework_missing_penalty_wrong_pct: round.homework_missing_penalty_wrong_pct,
            notation_required: round.notation_required,
            attendance: BTreeMap::new(),
            matches: Vec::new(),
        }
    }

    pub fn with_match(mut self, update: MatchUpdate) -> Self {
        self.matches.push(update);
        self
    }

    pub fn with_attendance(mut self, player: PlayerId, status: AttendanceStatus) -> Self {
        self.attendance.insert(player, status);
        self
    }
}

/// A match update that passed validation
struct CheckedUpdate<'s> {
    index: usize,
    outcome: MatchOutcome,
    update: &'s MatchUpdate,
}

/// Validate `sheet` against the round and apply it.
///
/// Fails with `RoundLocked` on a finalized round, `InvalidConfiguration` for
/// bad homework rules and `InvalidResult` for bad match entries. Nothing is
/// modified unless the whole sheet is valid.
pub fn apply_result_sheet(
    round: &mut Round,
    matches: &mut [Match],
    attendance: &mut Vec<AttendanceRecord>,
    sheet: &ResultSheet,
    now: DateTime<Utc>,
) -> Result<()> {
    round.ensure_editable()?;
    let checked = validate_sheet(round, matches, sheet)?;

    let total = sheet.homework_total_questions;
    round.homework_total_questions = total;
    round.homework_missing_policy = sheet.homework_missing_policy;
    round.homework_missing_penalty_wrong_pct = sheet.homework_missing_penalty_wrong_pct;
    round.notation_required = sheet.notation_required;

    for (&player_id, &status) in &sheet.attendance {
        match attendance
            .iter_mut()
            .find(|r| r.round_id == round.id && r.player_id == player_id)
        {
            Some(record) => record.status = status,
            None => attendance.push(AttendanceRecord {
                round_id: round.id,
                player_id,
                status,
            }),
        }
    }

    for CheckedUpdate {
        index,
        outcome,
        update,
    } in checked
    {
        let m = &mut matches[index];
        let seats: Vec<Seat> = m.seats().map(|(seat, _)| seat).collect();
        let entry = m.homework.get_or_insert_with(Default::default);
        for seat in seats {
            let side = update.side(seat);
            *entry.side_mut(seat) = SideHomework::recorded(side.submitted, side.correct, total);
        }
        m.result = outcome;
        m.notes = update.notes.trim().to_string();
        m.first_notation_completed = update.first.notation_completed;
        m.second_notation_completed = m.second.is_some() && update.second.notation_completed;
        m.updated_at = now;
    }

    debug!(
        round_id = %round.id,
        updated_matches = sheet.matches.len(),
        attendance_rows = sheet.attendance.len(),
        "applied result sheet"
    );
    Ok(())
}

fn validate_sheet<'s>(
    round: &Round,
    matches: &[Match],
    sheet: &'s ResultSheet,
) -> Result<Vec<CheckedUpdate<'s>>> {
    let total = sheet.homework_total_questions;
    if total == 0 {
        return Err(PairingError::invalid_config(
            "homework total questions must be at least 1",
        ));
    }
    if sheet.homework_missing_penalty_wrong_pct > 100 {
        return Err(PairingError::invalid_config(
            "missing homework penalty must be between 0 and 100",
        ));
    }

    let mut seen = HashSet::new();
    let mut checked = Vec::with_capacity(sheet.matches.len());
    for update in &sheet.matches {
        if !seen.insert(update.match_id) {
            return Err(PairingError::invalid_result(format!(
                "match {} appears more than once",
                update.match_id
            )));
        }
        let index = matches
            .iter()
            .position(|m| m.id == update.match_id && m.round_id == round.id)
            .ok_or_else(|| {
                PairingError::invalid_result(format!(
                    "match {} is not part of round {}",
                    update.match_id, round.id
                ))
            })?;
        let m = &matches[index];

        let outcome = if m.is_bye() {
            MatchOutcome::Bye
        } else {
            update.result.parse()?
        };

        for (seat, _) in m.seats() {
            if update.side(seat).correct > total {
                return Err(PairingError::invalid_result(
                    "homework correct cannot exceed total homework questions",
                ));
            }
        }

        checked.push(CheckedUpdate {
            index,
            outcome,
            update,
        });
    }
    Ok(checked)
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
