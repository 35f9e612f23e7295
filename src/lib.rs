//! Track Meet - sprint and marathon competition simulator
//!
//! Simulates a multi-round athletic competition over a fixed roster: each
//! round runs one short race and one marathon, marathon legs drain runner
//! energy (running dry means DNF), and per-race placements accumulate into an
//! ordinal leaderboard.

pub mod countries;
pub mod error;
mod sim;

pub use countries::CountrySet;
pub use error::{Error, Result};
pub use sim::{Competition, Leaderboard, Outcome, Race, RaceKind, RaceResult, Runner, MAX_ROUNDS};
