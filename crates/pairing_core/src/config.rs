//! Group defaults and per-round configuration
//!
//! A group carries fairness and scoring defaults. Creating a round starts from
//! those defaults, applies whatever the organiser overrode, and validates the
//! result into a [`ValidatedRoundConfig`] that the rest of the engine trusts.
//!
//! Round configuration files are TOML; every field is optional and falls back
//! to the group default:
//!
//! ```toml
//! win_weight = 0.6
//! homework_weight = 0.4
//! homework_missing_policy = "penalty"
//! homework_missing_penalty_wrong_pct = 50
//! fair_recent_rematch_window = 3
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PairingError, Result};
use crate::homework::{
    HomeworkScoringPolicy, MissingPolicy, DEFAULT_HOMEWORK_TOTAL_QUESTIONS,
    DEFAULT_MISSING_PENALTY_WRONG_PCT,
};
use crate::rating::Weights;

pub const DEFAULT_WIN_WEIGHT_PCT: u32 = 70;
pub const DEFAULT_HOMEWORK_WEIGHT_PCT: u32 = 30;
pub const DEFAULT_REMATCH_WINDOW: u32 = 2;

/// Defaults stored on a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDefaults {
    /// Win weight in percent
    pub default_win_weight: u32,
    /// Homework weight in percent
    pub default_homework_weight: u32,
    pub default_homework_total_questions: u32,
    pub default_homework_missing_policy: MissingPolicy,
    pub default_homework_missing_penalty_wrong_pct: u32,
    pub default_notation_required: bool,
    pub fair_no_recent_rematch: bool,
    pub fair_recent_rematch_window: u32,
    pub fair_rotate_byes: bool,
}

impl Default for GroupDefaults {
    fn default() -> Self {
        Self {
            default_win_weight: DEFAULT_WIN_WEIGHT_PCT,
            default_homework_weight: DEFAULT_HOMEWORK_WEIGHT_PCT,
            default_homework_total_questions: DEFAULT_HOMEWORK_TOTAL_QUESTIONS,
            default_homework_missing_policy: MissingPolicy::Zero,
            default_homework_missing_penalty_wrong_pct: DEFAULT_MISSING_PENALTY_WRONG_PCT,
            default_notation_required: true,
            fair_no_recent_rematch: true,
            fair_recent_rematch_window: DEFAULT_REMATCH_WINDOW,
            fair_rotate_byes: true,
        }
    }
}

impl GroupDefaults {
    /// The round configuration used when nothing is overridden
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            win_weight: f64::from(self.default_win_weight) / 100.0,
            homework_weight: f64::from(self.default_homework_weight) / 100.0,
            homework_total_questions: self.default_homework_total_questions,
            homework_missing_policy: self.default_homework_missing_policy,
            homework_missing_penalty_wrong_pct: self.default_homework_missing_penalty_wrong_pct,
            notation_required: self.default_notation_required,
            fair_no_recent_rematch: self.fair_no_recent_rematch,
            fair_recent_rematch_window: self.fair_recent_rematch_window,
            fair_rotate_byes: self.fair_rotate_byes,
        }
    }
}

/// Every setting recognised when creating a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub win_weight: f64,
    pub homework_weight: f64,
    pub homework_total_questions: u32,
    pub homework_missing_policy: MissingPolicy,
    pub homework_missing_penalty_wrong_pct: u32,
    pub notation_required: bool,
    pub fair_no_recent_rematch: bool,
    pub fair_recent_rematch_window: u32,
    pub fair_rotate_byes: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        GroupDefaults::default().round_config()
    }
}

/// Round settings as submitted; `None` keeps the group default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundOverrides {
    pub win_weight: Option<f64>,
    pub homework_weight: Option<f64>,
    pub homework_total_questions: Option<u32>,
    pub homework_missing_policy: Option<MissingPolicy>,
    pub homework_missing_penalty_wrong_pct: Option<u32>,
    pub notation_required: Option<bool>,
    pub fair_no_recent_rematch: Option<bool>,
    pub fair_recent_rematch_window: Option<u32>,
    pub fair_rotate_byes: Option<bool>,
}

impl RoundOverrides {
    pub fn apply(&self, defaults: &GroupDefaults) -> RoundConfig {
        let base = defaults.round_config();
        RoundConfig {
            win_weight: self.win_weight.unwrap_or(base.win_weight),
            homework_weight: self.homework_weight.unwrap_or(base.homework_weight),
            homework_total_questions: self
                .homework_total_questions
                .unwrap_or(base.homework_total_questions),
            homework_missing_policy: self
                .homework_missing_policy
                .unwrap_or(base.homework_missing_policy),
            homework_missing_penalty_wrong_pct: self
                .homework_missing_penalty_wrong_pct
                .unwrap_or(base.homework_missing_penalty_wrong_pct),
            notation_required: self.notation_required.unwrap_or(base.notation_required),
            fair_no_recent_rematch: self
                .fair_no_recent_rematch
                .unwrap_or(base.fair_no_recent_rematch),
            fair_recent_rematch_window: self
                .fair_recent_rematch_window
                .unwrap_or(base.fair_recent_rematch_window),
            fair_rotate_byes: self.fair_rotate_byes.unwrap_or(base.fair_rotate_byes),
        }
    }
}

impl RoundConfig {
    /// Parse a TOML round file on top of the group defaults
    pub fn from_toml_str(text: &str, defaults: &GroupDefaults) -> Result<Self> {
        let overrides: RoundOverrides = toml::from_str(text)
            .map_err(|e| PairingError::invalid_config(format!("failed to parse round config: {e}")))?;
        Ok(overrides.apply(defaults))
    }

    /// Check ranges and normalize the weights
    pub fn validate(&self) -> Result<ValidatedRoundConfig> {
        let weights = Weights::normalize(self.win_weight, self.homework_weight)?;
        if self.homework_total_questions == 0 {
            return Err(PairingError::invalid_config(
                "homework total questions must be at least 1",
            ));
        }
        if self.homework_missing_penalty_wrong_pct > 100 {
            return Err(PairingError::invalid_config(
                "missing homework penalty must be between 0 and 100",
            ));
        }
        Ok(ValidatedRoundConfig {
            weights,
            homework: HomeworkScoringPolicy::new(
                self.homework_total_questions,
                self.homework_missing_policy,
                self.homework_missing_penalty_wrong_pct,
            ),
            notation_required: self.notation_required,
            fairness: FairnessOptions {
                avoid_recent_rematches: self.fair_no_recent_rematch,
                rematch_window: self.fair_recent_rematch_window,
                rotate_byes: self.fair_rotate_byes,
            },
        })
    }
}

/// Fairness switches consumed by the pairing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessOptions {
    pub avoid_recent_rematches: bool,
    /// Rounds, counted back from the most recent, in which a rematch is
    /// penalised. 0 disables the penalty.
    pub rematch_window: u32,
    pub rotate_byes: bool,
}

impl Default for FairnessOptions {
    fn default() -> Self {
        Self {
            avoid_recent_rematches: true,
            rematch_window: DEFAULT_REMATCH_WINDOW,
            rotate_byes: true,
        }
    }
}

/// A round configuration that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedRoundConfig {
    pub weights: Weights,
    pub homework: HomeworkScoringPolicy,
    pub notation_required: bool,
    pub fairness: FairnessOptions,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
