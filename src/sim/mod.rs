//! Simulation Core
//!
//! Runner energy model, single-race execution, and multi-round competition
//! scoring. Everything here is deterministic and single-threaded; races
//! mutate shared runner energy strictly in roster order.

pub mod competition;
pub mod race;
pub mod runner;

pub use competition::{Competition, Leaderboard, MAX_ROUNDS};
pub use race::{Outcome, Race, RaceKind, RaceResult};
pub use runner::Runner;
