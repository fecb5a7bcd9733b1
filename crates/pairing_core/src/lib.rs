//! Round pairing and scoring for classroom chess groups
//!
//! This crate provides:
//! - Blended ratings from win rate and homework scores
//! - Greedy pairing with color balance, rematch avoidance and bye rotation
//! - Result entry, round finalization and unlocking with audit events
//! - Full recomputation of every player's counters from match history
//!
//! # Usage
//!
//! ```bash
//! # Pair the next round of a group, reproducibly
//! cargo run -p pairing_cli -- pair --group group.json --seed 7
//!
//! # Rebuild and print the standings
//! cargo run -p pairing_cli -- totals --group group.json
//! ```
//!
//! Nothing here performs I/O or reads the clock; timestamps and the random
//! source are supplied by the caller.

mod attendance;
mod config;
mod error;
mod history;
mod homework;
mod lifecycle;
mod pairing;
mod planner;
mod progress;
mod rating;
mod results;
mod snapshot;
mod totals;
mod types;

pub use attendance::*;
pub use config::*;
pub use error::*;
pub use history::*;
pub use homework::*;
pub use lifecycle::*;
pub use pairing::*;
pub use planner::*;
pub use progress::*;
pub use rating::*;
pub use results::*;
pub use snapshot::*;
pub use totals::*;
pub use types::*;
