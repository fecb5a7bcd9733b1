//! Pairing history indices
//!
//! Before pairing a new round the engine needs two facts about the past:
//! how recently any two players met, and how many byes each player has had.
//! Round distance counts back from the newest round, which has distance 1.

use std::collections::HashMap;

use crate::lifecycle::Round;
use crate::types::{Match, PlayerId, RoundId};

/// Distance given to matches whose round is missing from the history
pub const UNKNOWN_ROUND_DISTANCE: u32 = 9999;

/// Unordered pair of players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(PlayerId, PlayerId);

impl PairKey {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            PairKey(a, b)
        } else {
            PairKey(b, a)
        }
    }

    pub fn players(&self) -> (PlayerId, PlayerId) {
        (self.0, self.1)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryIndex {
    /// Smallest round distance at which each pair has met
    pub pair_distance: HashMap<PairKey, u32>,
    pub bye_counts: HashMap<PlayerId, u32>,
}

impl HistoryIndex {
    /// Index a group's history. `rounds` may be in any order.
    pub fn build(rounds: &[Round], matches: &[Match]) -> Self {
        let distances = round_distances(rounds);
        let mut index = HistoryIndex::default();

        for m in matches {
            let distance = distances
                .get(&m.round_id)
                .copied()
                .unwrap_or(UNKNOWN_ROUND_DISTANCE);
            match m.second {
                Some(second) => index.record_meeting(m.first, second, distance),
                None => *index.bye_counts.entry(m.first).or_insert(0) += 1,
            }
        }
        index
    }

    fn record_meeting(&mut self, a: PlayerId, b: PlayerId, distance: u32) {
        self.pair_distance
            .entry(PairKey::new(a, b))
            .and_modify(|best| *best = (*best).min(distance))
            .or_insert(distance);
    }

    /// Most recent distance at which `a` and `b` met, if ever
    pub fn last_met(&self, a: PlayerId, b: PlayerId) -> Option<u32> {
        self.pair_distance.get(&PairKey::new(a, b)).copied()
    }

    pub fn byes(&self, player: PlayerId) -> u32 {
        self.bye_counts.get(&player).copied().unwrap_or(0)
    }
}

/// Newest round first by creation time, higher id first on ties
pub fn round_distances(rounds: &[Round]) -> HashMap<RoundId, u32> {
    let mut ordered: Vec<&Round> = rounds.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, round)| (round.id, i as u32 + 1))
        .collect()
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
