//! Error types shared across the simulation core and the terminal front end.
//!
//! All validation is fail-fast: a call either completes fully or leaves the
//! receiver untouched.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An input could not be interpreted as the expected type.
    #[error("invalid input type: {0}")]
    InvalidType(String),

    /// An input had the right type but fell outside its valid domain.
    #[error("invalid input value: {0}")]
    InvalidValue(String),

    /// The race roster already holds its maximum number of entrants.
    #[error("race is already full ({capacity} entrants)")]
    RaceFull { capacity: usize },

    /// The runner is already entered in the race.
    #[error("runner {0:?} is already entered in the race")]
    RunnerAlreadyEntered(String),

    /// The runner is not entered in the race.
    #[error("runner {0:?} is not entered in the race")]
    RunnerNotEntered(String),

    /// Reading the country reference file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
