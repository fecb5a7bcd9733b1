//! Attendance and pairing eligibility

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::types::{Player, PlayerId, RoundId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Excused,
    Late,
}

impl AttendanceStatus {
    /// Present and late players take part in the round's pairings
    pub fn is_pairable(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    /// Unknown or blank tokens count as present
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "absent" => AttendanceStatus::Absent,
            "excused" => AttendanceStatus::Excused,
            "late" => AttendanceStatus::Late,
            _ => AttendanceStatus::Present,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Excused => "excused",
            AttendanceStatus::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's attendance in one round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub round_id: RoundId,
    pub player_id: PlayerId,
    pub status: AttendanceStatus,
}

/// Active players whose status allows pairing. Players without an entry in
/// `statuses` count as present. Roster order is preserved.
pub fn eligible_players<'a>(
    players: &'a [Player],
    statuses: &HashMap<PlayerId, AttendanceStatus>,
) -> Vec<&'a Player> {
    players
        .iter()
        .filter(|p| p.active)
        .filter(|p| statuses.get(&p.id).copied().unwrap_or_default().is_pairable())
        .collect()
}

/// Per-status counts for a set of attendance records
pub fn status_counts<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
) -> HashMap<AttendanceStatus, u32> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.status).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
#[path = "attendance_tests.rs"]
mod attendance_tests;
