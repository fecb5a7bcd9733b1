//! Core roster and match types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PairingError;
use crate::homework::HomeworkEntry;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifies a player on a group roster
    PlayerId
);
id_type!(
    /// Identifies a round within a group
    RoundId
);
id_type!(
    /// Identifies a single pairing inside a round
    MatchId
);
id_type!(
    /// Identifies the group (class) that owns players and rounds
    GroupId
);

/// Seat a player occupies in a match. `First` moves first (white).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// Recorded result of a match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    /// First seat won
    First,
    /// Second seat won
    Second,
    Tie,
    /// Only a first seat exists; nobody played
    Bye,
    #[default]
    Unset,
}

impl MatchOutcome {
    /// True when the outcome decides the game between two named players
    pub fn is_decided(self) -> bool {
        matches!(self, MatchOutcome::First | MatchOutcome::Second | MatchOutcome::Tie)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchOutcome::First => "first",
            MatchOutcome::Second => "second",
            MatchOutcome::Tie => "tie",
            MatchOutcome::Bye => "bye",
            MatchOutcome::Unset => "unset",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchOutcome {
    type Err = PairingError;

    /// Parses a submitted result token. Blank input means "not entered yet";
    /// the white/black aliases are accepted for the first/second seats.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "white" => Ok(MatchOutcome::First),
            "second" | "black" => Ok(MatchOutcome::Second),
            "tie" | "draw" => Ok(MatchOutcome::Tie),
            "bye" => Ok(MatchOutcome::Bye),
            "" | "unset" => Ok(MatchOutcome::Unset),
            other => Err(PairingError::invalid_result(format!(
                "result must be first, second, tie or bye, got {other:?}"
            ))),
        }
    }
}

/// Cumulative counters stored on a player.
///
/// These are always derived from the match history by
/// [`recompute_totals`](crate::totals::recompute_totals); nothing edits them
/// incrementally.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTotals {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub times_first: u32,
    pub times_second: u32,
    pub homework_correct: u32,
    pub homework_incorrect: u32,
    pub homework_score_sum: f64,
    pub homework_score_count: u32,
}

impl PlayerTotals {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Positive when the player has sat first more often than second
    pub fn color_diff(&self) -> i64 {
        i64::from(self.times_first) - i64::from(self.times_second)
    }

    pub fn seat_count_mut(&mut self, seat: Seat) -> &mut u32 {
        match seat {
            Seat::First => &mut self.times_first,
            Seat::Second => &mut self.times_second,
        }
    }
}

/// A roster member
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub totals: PlayerTotals,
    #[serde(default)]
    pub notes: String,
}

fn default_active() -> bool {
    true
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            active: true,
            totals: PlayerTotals::default(),
            notes: String::new(),
        }
    }

    pub fn with_totals(mut self, totals: PlayerTotals) -> Self {
        self.totals = totals;
        self
    }
}

/// A pairing inside a round, together with its entered results
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round_id: RoundId,
    pub first: PlayerId,
    /// `None` marks a bye
    pub second: Option<PlayerId>,
    /// Rating of the first seat when the pairing was made, three decimals
    pub first_rating: String,
    pub second_rating: Option<String>,
    #[serde(default)]
    pub result: MatchOutcome,
    #[serde(default)]
    pub first_notation_completed: bool,
    #[serde(default)]
    pub second_notation_completed: bool,
    #[serde(default)]
    pub notes: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub homework: Option<HomeworkEntry>,
}

impl Match {
    pub fn is_bye(&self) -> bool {
        self.second.is_none()
    }

    /// Player sitting in `seat`, if any
    pub fn player(&self, seat: Seat) -> Option<PlayerId> {
        match seat {
            Seat::First => Some(self.first),
            Seat::Second => self.second,
        }
    }

    pub fn notation_completed(&self, seat: Seat) -> bool {
        match seat {
            Seat::First => self.first_notation_completed,
            Seat::Second => self.second_notation_completed,
        }
    }

    /// Both seats paired with the player occupying each
    pub fn seats(&self) -> impl Iterator<Item = (Seat, PlayerId)> + '_ {
        [Seat::First, Seat::Second]
            .into_iter()
            .filter_map(move |seat| self.player(seat).map(|id| (seat, id)))
    }
}

/// Formats a rating the way it is snapshotted onto a match
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.3}")
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
