//! Blended strength rating
//!
//! A player's rating mixes their win rate with their homework accuracy:
//!
//! ```text
//! rating = round(win_weight * win_rate + homework_weight * homework_score, 3)
//! ```
//!
//! Weights are normalized to sum to 1 before use, so the rating always lies
//! in `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::error::{PairingError, Result};
use crate::types::PlayerTotals;

/// Normalized rating weights. Construct through [`Weights::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub win: f64,
    pub homework: f64,
}

impl Weights {
    /// Scale raw weights so they sum to 1.
    ///
    /// Fails when either weight is negative or not finite, or when they sum
    /// to zero or less.
    pub fn normalize(win_weight: f64, homework_weight: f64) -> Result<Self> {
        if !win_weight.is_finite() || !homework_weight.is_finite() {
            return Err(PairingError::invalid_config("weights must be finite numbers"));
        }
        if win_weight < 0.0 || homework_weight < 0.0 {
            return Err(PairingError::invalid_config("weights must be zero or greater"));
        }
        let total = win_weight + homework_weight;
        if total <= 0.0 {
            return Err(PairingError::invalid_config(
                "win and homework weights must sum to a positive value",
            ));
        }
        Ok(Self {
            win: win_weight / total,
            homework: homework_weight / total,
        })
    }
}

/// Share of games won; 0 for a player with no games
pub fn win_rate(totals: &PlayerTotals) -> f64 {
    let games = totals.games();
    if games == 0 {
        return 0.0;
    }
    f64::from(totals.wins) / f64::from(games)
}

/// Homework accuracy.
///
/// Prefers the per-round score average; falls back to raw correct/incorrect
/// counts for players whose history predates per-round scoring.
pub fn homework_score(totals: &PlayerTotals) -> f64 {
    if totals.homework_score_count > 0 {
        return totals.homework_score_sum / f64::from(totals.homework_score_count);
    }
    let answered = totals.homework_correct + totals.homework_incorrect;
    if answered == 0 {
        return 0.0;
    }
    f64::from(totals.homework_correct) / f64::from(answered)
}

/// Blended rating rounded to three decimals
pub fn rating(totals: &PlayerTotals, weights: Weights) -> f64 {
    let raw = weights.win * win_rate(totals) + weights.homework * homework_score(totals);
    round3(raw)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
#[path = "rating_tests.rs"]
mod rating_tests;
