//! Homework submissions and the per-round missing-submission policy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PairingError;
use crate::types::Seat;

pub const DEFAULT_HOMEWORK_TOTAL_QUESTIONS: u32 = 10;
pub const DEFAULT_MISSING_PENALTY_WRONG_PCT: u32 = 100;

/// How a side that did not hand in homework is scored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Counts as a round scored 0
    #[default]
    Zero,
    /// The round is left out of the player's homework average
    Exclude,
    /// Counts as a round with `penalty_wrong_pct` percent of answers wrong
    Penalty,
}

impl MissingPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MissingPolicy::Zero => "zero",
            MissingPolicy::Exclude => "exclude",
            MissingPolicy::Penalty => "penalty",
        }
    }

    /// Parses a submitted policy, falling back to the default for anything
    /// unrecognised
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingPolicy {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" => Ok(MissingPolicy::Zero),
            "exclude" => Ok(MissingPolicy::Exclude),
            "penalty" => Ok(MissingPolicy::Penalty),
            other => Err(PairingError::invalid_config(format!(
                "unknown homework missing policy {other:?}"
            ))),
        }
    }
}

/// One side's homework for a match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideHomework {
    pub submitted: bool,
    pub correct: u32,
    pub incorrect: u32,
}

impl SideHomework {
    /// The entry stored after result entry: a missing submission keeps no
    /// counts, a submission is completed to `total_questions`.
    pub fn recorded(submitted: bool, correct: u32, total_questions: u32) -> Self {
        if !submitted {
            return Self::default();
        }
        Self {
            submitted,
            correct,
            incorrect: total_questions.saturating_sub(correct),
        }
    }

    /// Incorrect count as shown to a reviewer for a round with
    /// `total_questions`
    pub fn display_incorrect(&self, total_questions: u32) -> u32 {
        if total_questions > 0 {
            total_questions.saturating_sub(self.correct)
        } else {
            self.incorrect
        }
    }
}

/// Homework attached to a match, one entry per seat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeworkEntry {
    pub first: SideHomework,
    pub second: SideHomework,
}

impl HomeworkEntry {
    pub fn side(&self, seat: Seat) -> &SideHomework {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    pub fn side_mut(&mut self, seat: Seat) -> &mut SideHomework {
        match seat {
            Seat::First => &mut self.first,
            Seat::Second => &mut self.second,
        }
    }
}

/// What one side of one match adds to a player's homework counters
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HomeworkContribution {
    pub correct: u32,
    pub incorrect: u32,
    /// Score in `[0, 1]`; `None` means the round does not count toward the
    /// average
    pub score: Option<f64>,
}

/// A round's homework scoring rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkScoringPolicy {
    pub total_questions: u32,
    pub missing_policy: MissingPolicy,
    pub penalty_wrong_pct: u32,
}

impl Default for HomeworkScoringPolicy {
    /// Rules applied to matches whose round is unknown
    fn default() -> Self {
        Self {
            total_questions: 0,
            missing_policy: MissingPolicy::Zero,
            penalty_wrong_pct: DEFAULT_MISSING_PENALTY_WRONG_PCT,
        }
    }
}

impl HomeworkScoringPolicy {
    pub fn new(total_questions: u32, missing_policy: MissingPolicy, penalty_wrong_pct: u32) -> Self {
        Self {
            total_questions,
            missing_policy,
            penalty_wrong_pct,
        }
    }

    /// Score one side's homework
    pub fn score(&self, side: &SideHomework) -> HomeworkContribution {
        let mut contribution = HomeworkContribution {
            correct: side.correct,
            incorrect: side.incorrect,
            score: None,
        };

        if side.submitted {
            let denominator = if self.total_questions > 0 {
                self.total_questions
            } else {
                side.correct.saturating_add(side.incorrect)
            };
            if denominator > 0 {
                let score = f64::from(side.correct) / f64::from(denominator);
                contribution.score = Some(score.clamp(0.0, 1.0));
            }
            return contribution;
        }

        contribution.score = match self.missing_policy {
            MissingPolicy::Exclude => None,
            MissingPolicy::Penalty => {
                let pct = f64::from(self.penalty_wrong_pct.min(100));
                Some((1.0 - pct / 100.0).clamp(0.0, 1.0))
            }
            MissingPolicy::Zero => Some(0.0),
        };
        contribution
    }
}

#[cfg(test)]
#[path = "homework_tests.rs"]
mod homework_tests;
