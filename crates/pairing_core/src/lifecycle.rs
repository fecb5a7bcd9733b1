//! Round lifecycle
//!
//! A round is created as a draft, may be saved any number of times, and is
//! locked by finalizing it. Unlocking reopens a finalized round and needs a
//! written reason. Every transition produces an [`AuditEvent`] for the caller
//! to persist.
//!
//! ```text
//!   create      save / finalize(sheet)            unlock(reason)
//!   -----> draft ---------------------------> finalized ---------> draft
//!            ^  \__ save(sheet) __/
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::attendance::AttendanceRecord;
use crate::config::ValidatedRoundConfig;
use crate::error::{PairingError, Result};
use crate::homework::{HomeworkScoringPolicy, MissingPolicy};
use crate::results::{apply_result_sheet, ResultSheet};
use crate::types::{GroupId, Match, RoundId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    #[default]
    Draft,
    Finalized,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundStatus::Draft => f.write_str("draft"),
            RoundStatus::Finalized => f.write_str("finalized"),
        }
    }
}

/// A round of matches with the scoring rules it was created under
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub group_id: GroupId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: RoundStatus,
    /// Normalized; sums to 1 with `homework_weight`
    pub win_weight: f64,
    pub homework_weight: f64,
    pub homework_total_questions: u32,
    #[serde(default)]
    pub homework_missing_policy: MissingPolicy,
    pub homework_missing_penalty_wrong_pct: u32,
    #[serde(default)]
    pub notation_required: bool,
    #[serde(default)]
    pub finalized_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finalized_by: Option<String>,
}

impl Round {
    /// A fresh draft round carrying a validated configuration
    pub fn draft(
        id: RoundId,
        group_id: GroupId,
        config: &ValidatedRoundConfig,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            group_id,
            created_at,
            status: RoundStatus::Draft,
            win_weight: config.weights.win,
            homework_weight: config.weights.homework,
            homework_total_questions: config.homework.total_questions,
            homework_missing_policy: config.homework.missing_policy,
            homework_missing_penalty_wrong_pct: config.homework.penalty_wrong_pct,
            notation_required: config.notation_required,
            finalized_at: None,
            finalized_by: None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status == RoundStatus::Finalized
    }

    /// Homework rules for scoring this round's matches
    pub fn homework_policy(&self) -> HomeworkScoringPolicy {
        HomeworkScoringPolicy::new(
            self.homework_total_questions,
            self.homework_missing_policy,
            self.homework_missing_penalty_wrong_pct,
        )
    }

    /// Audit record for the round's creation, listing the rules it starts
    /// with
    pub fn creation_audit(&self, actor: &str) -> AuditEvent {
        AuditEvent {
            round_id: self.id,
            action: AuditAction::RoundCreated,
            actor: actor.to_string(),
            detail: format!(
                "weights={}/{}; homework_total={}; policy={}",
                self.win_weight,
                self.homework_weight,
                self.homework_total_questions,
                self.homework_missing_policy
            ),
            at: self.created_at,
        }
    }

    /// Fails with `RoundLocked` while the round is finalized
    pub fn ensure_editable(&self) -> Result<()> {
        if self.is_finalized() {
            return Err(PairingError::RoundLocked { round_id: self.id });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    RoundCreated,
    RoundSaved,
    RoundFinalized,
    RoundUnlocked,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::RoundCreated => "round_created",
            AuditAction::RoundSaved => "round_saved",
            AuditAction::RoundFinalized => "round_finalized",
            AuditAction::RoundUnlocked => "round_unlocked",
        }
    }
}

/// Record of one lifecycle transition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub round_id: RoundId,
    pub action: AuditAction,
    pub actor: String,
    pub detail: String,
    pub at: DateTime<Utc>,
}

/// What the caller asked to do with a round
#[derive(Clone, Debug, PartialEq)]
pub enum RoundAction {
    /// Apply results and keep the round open
    Save(ResultSheet),
    /// Apply results and lock the round
    Finalize(ResultSheet),
    /// Reopen a finalized round
    Unlock { reason: String },
}

/// Result of a successful transition
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionOutcome {
    pub status: RoundStatus,
    pub audit: AuditEvent,
}

/// Mutable view of a round and everything its result entry touches
pub struct RoundLifecycle<'a> {
    pub round: &'a mut Round,
    pub matches: &'a mut [Match],
    pub attendance: &'a mut Vec<AttendanceRecord>,
}

impl<'a> RoundLifecycle<'a> {
    pub fn new(
        round: &'a mut Round,
        matches: &'a mut [Match],
        attendance: &'a mut Vec<AttendanceRecord>,
    ) -> Self {
        Self {
            round,
            matches,
            attendance,
        }
    }

    /// Run one action. On error nothing has been modified.
    pub fn submit(
        &mut self,
        action: RoundAction,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        match action {
            RoundAction::Save(sheet) => self.save(&sheet, actor, now),
            RoundAction::Finalize(sheet) => self.finalize(&sheet, actor, now),
            RoundAction::Unlock { reason } => self.unlock(&reason, actor, now),
        }
    }

    pub fn save(
        &mut self,
        sheet: &ResultSheet,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        apply_result_sheet(self.round, self.matches, self.attendance, sheet, now)?;
        self.round.status = RoundStatus::Draft;
        Ok(self.record(
            AuditAction::RoundSaved,
            actor,
            "Manual save from results entry.".to_string(),
            now,
        ))
    }

    /// Apply the sheet and lock the round. The round stays a draft if the
    /// sheet is rejected.
    pub fn finalize(
        &mut self,
        sheet: &ResultSheet,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        apply_result_sheet(self.round, self.matches, self.attendance, sheet, now)?;
        self.round.status = RoundStatus::Finalized;
        self.round.finalized_at = Some(now);
        self.round.finalized_by = Some(actor.to_string());
        Ok(self.record(
            AuditAction::RoundFinalized,
            actor,
            "Round finalized from results entry.".to_string(),
            now,
        ))
    }

    pub fn unlock(
        &mut self,
        reason: &str,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(PairingError::UnlockRejected);
        }
        self.round.status = RoundStatus::Draft;
        self.round.finalized_at = None;
        self.round.finalized_by = None;
        Ok(self.record(AuditAction::RoundUnlocked, actor, reason.to_string(), now))
    }

    fn record(
        &self,
        action: AuditAction,
        actor: &str,
        detail: String,
        now: DateTime<Utc>,
    ) -> TransitionOutcome {
        info!(
            round_id = %self.round.id,
            action = action.as_str(),
            actor,
            status = %self.round.status,
            "round transition"
        );
        TransitionOutcome {
            status: self.round.status,
            audit: AuditEvent {
                round_id: self.round.id,
                action,
                actor: actor.to_string(),
                detail,
                at: now,
            },
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod lifecycle_tests;
