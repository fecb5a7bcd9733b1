//! Greedy constrained pairing
//!
//! Players are ranked by blended rating, then paired top-down: the strongest
//! unpaired player takes the cheapest opponent among the next few in rank
//! order. An opponent's cost is
//!
//! ```text
//! penalty = 2 * |rating gap| + color penalty + rematch penalty
//! ```
//!
//! where the color penalty measures how far both players drift from an even
//! first/second seat split, and the rematch penalty makes recent opponents
//! effectively unpickable whenever another candidate exists.
//!
//! The only randomness is tie-breaking. It comes from the caller's RNG, so a
//! seeded RNG reproduces a pairing exactly.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::{FairnessOptions, ValidatedRoundConfig};
use crate::error::{PairingError, Result};
use crate::history::HistoryIndex;
use crate::rating::{rating, Weights};
use crate::types::{Player, PlayerId, Seat};

/// How many of the next-ranked players are considered as opponents
pub const CANDIDATE_POOL_SIZE: usize = 5;

/// Multiplier on the rating gap between two players
pub const RATING_GAP_FACTOR: f64 = 2.0;

/// Penalty for meeting again one round after the last meeting; divided by the
/// round distance for older meetings
pub const REMATCH_PENALTY: f64 = 1000.0;

/// A player as seen by one pairing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub player_id: PlayerId,
    pub rating: f64,
    /// times first minus times second
    pub color_diff: i64,
}

/// One pairing produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairedMatch {
    pub first: Candidate,
    pub second: Candidate,
    pub penalty: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    /// In the order they were formed, strongest first
    pub matches: Vec<PairedMatch>,
    pub byes: Vec<Candidate>,
}

impl PairingResult {
    /// Every player placed by this run, matches first
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.matches
            .iter()
            .flat_map(|m| [m.first.player_id, m.second.player_id])
            .chain(self.byes.iter().map(|c| c.player_id))
            .collect()
    }
}

/// Cost of pairing the current player with one opponent
#[derive(Debug, Clone, Copy)]
struct CandidateCost {
    opponent: PlayerId,
    current_seat: Seat,
    penalty: f64,
}

/// Pairs players for a single round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairingEngine {
    weights: Weights,
    fairness: FairnessOptions,
}

impl PairingEngine {
    /// Fails with `InvalidConfiguration` when the weights cannot be
    /// normalized
    pub fn new(win_weight: f64, homework_weight: f64, fairness: FairnessOptions) -> Result<Self> {
        Ok(Self {
            weights: Weights::normalize(win_weight, homework_weight)?,
            fairness,
        })
    }

    pub fn from_config(config: &ValidatedRoundConfig) -> Self {
        Self {
            weights: config.weights,
            fairness: config.fairness,
        }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Rate players and sort them strongest first. Equal ratings put the
    /// player owing a first seat (lower color diff) ahead; full ties keep
    /// input order.
    pub fn rank<'a>(&self, players: impl IntoIterator<Item = &'a Player>) -> Vec<Candidate> {
        let mut ranked: Vec<Candidate> = players
            .into_iter()
            .map(|p| Candidate {
                player_id: p.id,
                rating: rating(&p.totals, self.weights),
                color_diff: p.totals.color_diff(),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then(a.color_diff.cmp(&b.color_diff))
        });
        ranked
    }

    /// Pair `players`, all of whom are expected to be eligible.
    ///
    /// Returns `⌊n/2⌋` matches and `n mod 2` byes, with every player placed
    /// exactly once.
    pub fn pair<'a, R: Rng>(
        &self,
        players: impl IntoIterator<Item = &'a Player>,
        history: &HistoryIndex,
        rng: &mut R,
    ) -> Result<PairingResult> {
        let ranked = self.rank(players);
        if ranked.len() < 2 {
            return Err(PairingError::invalid_config(
                "at least two eligible players are required to create matches",
            ));
        }

        let by_id: HashMap<PlayerId, Candidate> =
            ranked.iter().map(|c| (c.player_id, *c)).collect();
        if by_id.len() != ranked.len() {
            return Err(PairingError::invalid_config("a player is listed more than once"));
        }

        let mut remaining: Vec<PlayerId> = ranked.iter().map(|c| c.player_id).collect();
        let mut result = PairingResult::default();

        if remaining.len() % 2 == 1 {
            let bye = self.select_bye(&ranked, history);
            remaining.retain(|id| *id != bye.player_id);
            debug!(player = %bye.player_id, prior_byes = history.byes(bye.player_id), "bye assigned");
            result.byes.push(bye);
        }

        while !remaining.is_empty() {
            let current = by_id[&remaining.remove(0)];
            if remaining.is_empty() {
                result.byes.push(current);
                break;
            }

            let options: Vec<CandidateCost> = remaining
                .iter()
                .take(CANDIDATE_POOL_SIZE)
                .map(|id| self.evaluate(&current, &by_id[id], history, rng))
                .collect();

            let lowest = options
                .iter()
                .map(|o| o.penalty)
                .fold(f64::INFINITY, f64::min);
            let best: Vec<&CandidateCost> = options.iter().filter(|o| o.penalty == lowest).collect();
            let Some(chosen) = best.choose(rng).copied() else {
                result.byes.push(current);
                continue;
            };

            let opponent = by_id[&chosen.opponent];
            remaining.retain(|id| *id != chosen.opponent);
            let (first, second) = match chosen.current_seat {
                Seat::First => (current, opponent),
                Seat::Second => (opponent, current),
            };
            debug!(
                first = %first.player_id,
                second = %second.player_id,
                penalty = chosen.penalty,
                tied_options = best.len(),
                "paired"
            );
            result.matches.push(PairedMatch {
                first,
                second,
                penalty: chosen.penalty,
            });
        }

        info!(
            players = ranked.len(),
            matches = result.matches.len(),
            byes = result.byes.len(),
            "pairing complete"
        );
        Ok(result)
    }

    /// With rotation the player with the fewest byes sits out, lowest rating
    /// first; otherwise the lowest-ranked player does.
    fn select_bye(&self, ranked: &[Candidate], history: &HistoryIndex) -> Candidate {
        let last = ranked[ranked.len() - 1];
        if !self.fairness.rotate_byes {
            return last;
        }
        let mut best = ranked[0];
        for candidate in &ranked[1..] {
            let by_byes = history
                .byes(candidate.player_id)
                .cmp(&history.byes(best.player_id));
            let by_rating = candidate
                .rating
                .partial_cmp(&best.rating)
                .unwrap_or(Ordering::Equal);
            if by_byes.then(by_rating) == Ordering::Less {
                best = *candidate;
            }
        }
        best
    }

    fn evaluate<R: Rng>(
        &self,
        current: &Candidate,
        opponent: &Candidate,
        history: &HistoryIndex,
        rng: &mut R,
    ) -> CandidateCost {
        let rating_gap = (current.rating - opponent.rating).abs();
        let (current_seat, color_penalty) =
            color_assignment(current.color_diff, opponent.color_diff, rng);
        let rematch_penalty = self.rematch_penalty(current.player_id, opponent.player_id, history);

        CandidateCost {
            opponent: opponent.player_id,
            current_seat,
            penalty: rating_gap * RATING_GAP_FACTOR + color_penalty + rematch_penalty,
        }
    }

    fn rematch_penalty(&self, a: PlayerId, b: PlayerId, history: &HistoryIndex) -> f64 {
        if !self.fairness.avoid_recent_rematches || self.fairness.rematch_window == 0 {
            return 0.0;
        }
        match history.last_met(a, b) {
            Some(distance) if distance <= self.fairness.rematch_window => {
                REMATCH_PENALTY / f64::from(distance.max(1))
            }
            _ => 0.0,
        }
    }
}

/// Imbalance both players end up with if the current player takes `seat`
pub fn color_penalty(current_diff: i64, opponent_diff: i64, seat: Seat) -> f64 {
    let (current_after, opponent_after) = match seat {
        Seat::First => (current_diff + 1, opponent_diff - 1),
        Seat::Second => (current_diff - 1, opponent_diff + 1),
    };
    (current_after.abs() + opponent_after.abs()) as f64
}

/// Seat for the current player and the resulting color penalty. Equal
/// penalties are settled by a coin flip.
fn color_assignment<R: Rng>(current_diff: i64, opponent_diff: i64, rng: &mut R) -> (Seat, f64) {
    let as_first = color_penalty(current_diff, opponent_diff, Seat::First);
    let as_second = color_penalty(current_diff, opponent_diff, Seat::Second);
    match as_first.partial_cmp(&as_second) {
        Some(Ordering::Less) => (Seat::First, as_first),
        Some(Ordering::Greater) => (Seat::Second, as_second),
        _ => {
            let seat = if rng.gen_bool(0.5) {
                Seat::First
            } else {
                Seat::Second
            };
            (seat, as_first)
        }
    }
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;
