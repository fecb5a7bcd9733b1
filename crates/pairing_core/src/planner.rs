//! Round creation
//!
//! Ties the pieces together for a new round: validate the configuration,
//! filter the roster by attendance, index the group's history, pair, and turn
//! the pairing into draft match records ready to be stored.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::attendance::{eligible_players, AttendanceRecord, AttendanceStatus};
use crate::config::RoundConfig;
use crate::error::{PairingError, Result};
use crate::history::HistoryIndex;
use crate::lifecycle::{AuditEvent, Round};
use crate::pairing::{Candidate, PairingEngine};
use crate::types::{format_rating, GroupId, Match, MatchId, MatchOutcome, Player, PlayerId, RoundId};

/// Everything needed to plan one round of a group
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    pub round_id: RoundId,
    pub group_id: GroupId,
    pub config: &'a RoundConfig,
    pub players: &'a [Player],
    /// Players without an entry count as present
    pub attendance: &'a HashMap<PlayerId, AttendanceStatus>,
    /// The group's earlier rounds and their matches
    pub rounds: &'a [Round],
    pub matches: &'a [Match],
    /// Ids for the new matches are allocated upwards from here
    pub first_match_id: MatchId,
    /// Recorded on the creation audit event
    pub actor: &'a str,
    pub now: DateTime<Utc>,
}

/// A draft round with its matches and attendance, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRound {
    pub round: Round,
    pub matches: Vec<Match>,
    pub attendance: Vec<AttendanceRecord>,
    pub audit: AuditEvent,
}

pub fn plan_round<R: Rng>(request: &PlanRequest<'_>, rng: &mut R) -> Result<PlannedRound> {
    let config = request.config.validate()?;
    let eligible = eligible_players(request.players, request.attendance);
    if eligible.len() < 2 {
        return Err(PairingError::invalid_config(format!(
            "at least two eligible players are required to create matches, found {}",
            eligible.len()
        )));
    }

    let history = HistoryIndex::build(request.rounds, request.matches);
    let engine = PairingEngine::from_config(&config);
    let pairing = engine.pair(eligible.iter().copied(), &history, rng)?;

    let round = Round::draft(request.round_id, request.group_id, &config, request.now);
    let mut next_id = request.first_match_id.0;
    let mut allocate = || {
        let id = MatchId(next_id);
        next_id += 1;
        id
    };

    let mut matches = Vec::with_capacity(pairing.matches.len() + pairing.byes.len());
    for paired in &pairing.matches {
        matches.push(new_match(
            allocate(),
            &round,
            &paired.first,
            Some(&paired.second),
            request.now,
        ));
    }
    for bye in &pairing.byes {
        matches.push(new_match(allocate(), &round, bye, None, request.now));
    }

    let attendance = request
        .players
        .iter()
        .filter(|p| p.active)
        .map(|p| AttendanceRecord {
            round_id: round.id,
            player_id: p.id,
            status: request.attendance.get(&p.id).copied().unwrap_or_default(),
        })
        .collect();

    info!(
        round = %round.id,
        group = %round.group_id,
        eligible = eligible.len(),
        matches = pairing.matches.len(),
        byes = pairing.byes.len(),
        "planned round"
    );
    let audit = round.creation_audit(request.actor);
    Ok(PlannedRound {
        round,
        matches,
        attendance,
        audit,
    })
}

fn new_match(
    id: MatchId,
    round: &Round,
    first: &Candidate,
    second: Option<&Candidate>,
    now: DateTime<Utc>,
) -> Match {
    Match {
        id,
        round_id: round.id,
        first: first.player_id,
        second: second.map(|c| c.player_id),
        first_rating: format_rating(first.rating),
        second_rating: second.map(|c| format_rating(c.rating)),
        result: if second.is_some() {
            MatchOutcome::Unset
        } else {
            MatchOutcome::Bye
        },
        first_notation_completed: false,
        second_notation_completed: false,
        notes: String::new(),
        updated_at: now,
        homework: None,
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod planner_tests;
