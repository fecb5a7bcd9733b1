//! Cumulative player statistics
//!
//! Totals are never updated incrementally. After any change to a group's
//! results, every player's counters are rebuilt from the complete match list,
//! so saving the same round twice cannot double count anything.

use std::collections::HashMap;
use tracing::debug;

use crate::homework::{HomeworkScoringPolicy, SideHomework};
use crate::lifecycle::Round;
use crate::types::{Match, MatchOutcome, Player, PlayerId, PlayerTotals, RoundId};

/// Rebuild the counters of every player in `players` from `matches`.
///
/// `rounds` supplies each match's homework rules; a match whose round is not
/// listed is scored with [`HomeworkScoringPolicy::default`]. Seats held by
/// players outside `players` are skipped.
pub fn recompute_totals(players: &mut [Player], rounds: &[Round], matches: &[Match]) {
    let policies: HashMap<RoundId, HomeworkScoringPolicy> = rounds
        .iter()
        .map(|round| (round.id, round.homework_policy()))
        .collect();
    let totals = aggregate(players.iter().map(|p| p.id), &policies, matches);

    for player in players.iter_mut() {
        player.totals = totals.get(&player.id).cloned().unwrap_or_default();
    }
    debug!(
        players = players.len(),
        matches = matches.len(),
        "recomputed player totals"
    );
}

/// Counters for `player_ids` built from scratch
pub fn aggregate(
    player_ids: impl IntoIterator<Item = PlayerId>,
    policies: &HashMap<RoundId, HomeworkScoringPolicy>,
    matches: &[Match],
) -> HashMap<PlayerId, PlayerTotals> {
    let mut totals: HashMap<PlayerId, PlayerTotals> = player_ids
        .into_iter()
        .map(|id| (id, PlayerTotals::default()))
        .collect();

    for m in matches {
        let policy = policies.get(&m.round_id).copied().unwrap_or_default();
        let homework = m.homework.unwrap_or_default();

        for (seat, player_id) in m.seats() {
            let Some(entry) = totals.get_mut(&player_id) else {
                continue;
            };
            *entry.seat_count_mut(seat) += 1;
            add_homework(entry, &policy, homework.side(seat));
        }

        if let Some(second) = m.second {
            apply_outcome(&mut totals, m.first, second, m.result);
        }
    }
    totals
}

fn apply_outcome(
    totals: &mut HashMap<PlayerId, PlayerTotals>,
    first: PlayerId,
    second: PlayerId,
    outcome: MatchOutcome,
) {
    let mut bump = |id: PlayerId, update: fn(&mut PlayerTotals)| {
        if let Some(entry) = totals.get_mut(&id) {
            update(entry);
        }
    };
    match outcome {
        MatchOutcome::First => {
            bump(first, |t| t.wins += 1);
            bump(second, |t| t.losses += 1);
        }
        MatchOutcome::Second => {
            bump(second, |t| t.wins += 1);
            bump(first, |t| t.losses += 1);
        }
        MatchOutcome::Tie => {
            bump(first, |t| t.ties += 1);
            bump(second, |t| t.ties += 1);
        }
        MatchOutcome::Bye | MatchOutcome::Unset => {}
    }
}

fn add_homework(entry: &mut PlayerTotals, policy: &HomeworkScoringPolicy, side: &SideHomework) {
    let contribution = policy.score(side);
    entry.homework_correct = entry.homework_correct.saturating_add(contribution.correct);
    entry.homework_incorrect = entry.homework_incorrect.saturating_add(contribution.incorrect);
    if let Some(score) = contribution.score {
        entry.homework_score_sum += score;
        entry.homework_score_count += 1;
    }
}

#[cfg(test)]
#[path = "totals_tests.rs"]
mod totals_tests;
