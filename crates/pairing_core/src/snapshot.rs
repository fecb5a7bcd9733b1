//! Serializable state of one group

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::attendance::{AttendanceRecord, AttendanceStatus};
use crate::config::GroupDefaults;
use crate::error::{PairingError, Result};
use crate::lifecycle::{AuditEvent, Round};
use crate::planner::PlannedRound;
use crate::totals::recompute_totals;
use crate::types::{GroupId, Match, MatchId, Player, PlayerId, RoundId};

/// A group's roster, history and defaults as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSnapshot {
    pub group_id: GroupId,
    pub defaults: GroupDefaults,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub matches: Vec<Match>,
    pub attendance: Vec<AttendanceRecord>,
    pub audit_log: Vec<AuditEvent>,
}

impl GroupSnapshot {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| PairingError::invalid_config(format!("failed to parse group snapshot: {e}")))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PairingError::invalid_config(format!("failed to serialize group snapshot: {e}")))
    }

    pub fn next_round_id(&self) -> RoundId {
        RoundId(self.rounds.iter().map(|r| r.id.0).max().unwrap_or(0) + 1)
    }

    pub fn next_match_id(&self) -> MatchId {
        MatchId(self.matches.iter().map(|m| m.id.0).max().unwrap_or(0) + 1)
    }

    /// Attendance recorded for `round_id`
    pub fn attendance_for(&self, round_id: RoundId) -> HashMap<PlayerId, AttendanceStatus> {
        self.attendance
            .iter()
            .filter(|r| r.round_id == round_id)
            .map(|r| (r.player_id, r.status))
            .collect()
    }

    pub fn round(&self, round_id: RoundId) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == round_id)
    }

    pub fn round_matches(&self, round_id: RoundId) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.round_id == round_id).collect()
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Store a planned round alongside the existing history. Attendance
    /// already recorded for the round is replaced, one row per player.
    pub fn add_round(&mut self, planned: PlannedRound) {
        self.rounds.push(planned.round);
        self.matches.extend(planned.matches);
        self.audit_log.push(planned.audit);
        for record in planned.attendance {
            self.set_attendance(record);
        }
    }

    /// Insert or replace the row for `record`'s round and player
    pub fn set_attendance(&mut self, record: AttendanceRecord) {
        match self
            .attendance
            .iter_mut()
            .find(|r| r.round_id == record.round_id && r.player_id == record.player_id)
        {
            Some(existing) => existing.status = record.status,
            None => self.attendance.push(record),
        }
    }

    pub fn recompute_totals(&mut self) {
        recompute_totals(&mut self.players, &self.rounds, &self.matches);
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
