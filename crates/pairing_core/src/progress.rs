//! Round completion tracking

use serde::{Deserialize, Serialize};

use crate::homework::MissingPolicy;
use crate::lifecycle::Round;
use crate::types::{Match, MatchOutcome};

/// How far result entry for a round has progressed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundProgress {
    pub total_matches: u32,
    /// Byes plus matches with a decided result
    pub completed_results: u32,
    pub notation_done: u32,
    /// Zero when the round does not require notation
    pub notation_total: u32,
    pub homework_done: u32,
    pub homework_total: u32,
}

impl RoundProgress {
    pub fn measure(round: &Round, matches: &[Match]) -> Self {
        let mut progress = RoundProgress::default();
        for m in matches {
            progress.total_matches += 1;
            if m.is_bye() || m.result != MatchOutcome::Unset {
                progress.completed_results += 1;
            }

            let homework = m.homework.unwrap_or_default();
            for (seat, _) in m.seats() {
                progress.homework_total += 1;
                if homework.side(seat).submitted {
                    progress.homework_done += 1;
                }
                if round.notation_required {
                    progress.notation_total += 1;
                    if m.notation_completed(seat) {
                        progress.notation_done += 1;
                    }
                }
            }
        }
        progress
    }

    pub fn results_complete(&self) -> bool {
        self.completed_results == self.total_matches
    }
}

/// Readable list of what is still missing before a round can be closed.
///
/// Missing homework is only reported when the round excludes missing
/// submissions, since the other policies score them automatically.
pub fn round_exceptions(round: &Round, matches: &[Match]) -> Vec<String> {
    let mut missing_results = 0;
    let mut missing_homework = 0;
    let mut missing_notation = 0;

    for m in matches {
        if !m.is_bye() && m.result == MatchOutcome::Unset {
            missing_results += 1;
        }
        let homework = m.homework.unwrap_or_default();
        for (seat, _) in m.seats() {
            if !homework.side(seat).submitted {
                missing_homework += 1;
            }
            if round.notation_required && !m.notation_completed(seat) {
                missing_notation += 1;
            }
        }
    }

    let mut exceptions = Vec::new();
    if missing_results > 0 {
        exceptions.push(format!("{missing_results} match results missing"));
    }
    if missing_homework > 0 && round.homework_missing_policy == MissingPolicy::Exclude {
        exceptions.push(format!("{missing_homework} homework submissions missing"));
    }
    if missing_notation > 0 {
        exceptions.push(format!("{missing_notation} notation checks missing"));
    }
    exceptions
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod progress_tests;
