//! Runner - identity, capability, and energy state
//!
//! A runner is created once with validated immutable identity and speed
//! fields; energy is the only mutable field, drained by marathon legs and
//! restored during round cleanup.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::countries::CountrySet;
use crate::error::{Error, Result};
use crate::sim::race::RaceKind;

/// A competitor with fixed identity and speeds and a mutable energy level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    name: String,
    age: u32,
    country: String,
    /// Sprint speed in metres per second.
    sprint_speed: f64,
    /// Endurance speed in metres per second.
    endurance_speed: f64,
    energy: u32,
}

impl Runner {
    /// Energy every runner starts with and can never exceed.
    pub const MAX_ENERGY: u32 = 1000;

    const AGE_RANGE: RangeInclusive<u32> = 5..=100;
    const SPRINT_RANGE: RangeInclusive<f64> = 2.2..=6.8;
    const ENDURANCE_RANGE: RangeInclusive<f64> = 1.8..=5.4;

    /// Creates a runner, validating every field. `countries` is the external
    /// reference set of accepted country names.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        country: impl Into<String>,
        sprint_speed: f64,
        endurance_speed: f64,
        countries: &CountrySet,
    ) -> Result<Self> {
        let name = name.into();
        let country = country.into();

        // Spaces are ignored for the alphanumeric check, but something must
        // remain besides them.
        let stripped: String = name.chars().filter(|c| *c != ' ').collect();
        if stripped.is_empty() || !stripped.chars().all(char::is_alphanumeric) {
            return Err(Error::InvalidValue(format!(
                "runner name {name:?} must be alphanumeric"
            )));
        }
        if !Self::AGE_RANGE.contains(&age) {
            return Err(Error::InvalidValue(format!(
                "age {age} must be within {}..={}",
                Self::AGE_RANGE.start(),
                Self::AGE_RANGE.end()
            )));
        }
        if !countries.contains(&country) {
            return Err(Error::InvalidValue(format!(
                "unknown country {country:?}"
            )));
        }
        if !Self::SPRINT_RANGE.contains(&sprint_speed) {
            return Err(Error::InvalidValue(format!(
                "sprint speed {sprint_speed} must be within {}..={} m/s",
                Self::SPRINT_RANGE.start(),
                Self::SPRINT_RANGE.end()
            )));
        }
        if !Self::ENDURANCE_RANGE.contains(&endurance_speed) {
            return Err(Error::InvalidValue(format!(
                "endurance speed {endurance_speed} must be within {}..={} m/s",
                Self::ENDURANCE_RANGE.start(),
                Self::ENDURANCE_RANGE.end()
            )));
        }

        Ok(Self {
            name,
            age,
            country,
            sprint_speed,
            endurance_speed,
            energy: Self::MAX_ENERGY,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn sprint_speed(&self) -> f64 {
        self.sprint_speed
    }

    pub fn endurance_speed(&self) -> f64 {
        self.endurance_speed
    }

    /// Current energy, always within `0..=MAX_ENERGY`.
    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// Drains `points` energy, clamping at 0. `points` must be within
    /// `1..=MAX_ENERGY`.
    pub fn drain_energy(&mut self, points: u32) -> Result<()> {
        Self::check_amount(points, "drain")?;
        self.energy = self.energy.saturating_sub(points);
        Ok(())
    }

    /// Recovers `amount` energy, clamping at `MAX_ENERGY`. `amount` must be
    /// within `1..=MAX_ENERGY`.
    pub fn recover_energy(&mut self, amount: u32) -> Result<()> {
        Self::check_amount(amount, "recovery")?;
        self.energy = (self.energy + amount).min(Self::MAX_ENERGY);
        Ok(())
    }

    fn check_amount(amount: u32, what: &str) -> Result<()> {
        if !(1..=Self::MAX_ENERGY).contains(&amount) {
            return Err(Error::InvalidValue(format!(
                "{what} amount {amount} must be within 1..={}",
                Self::MAX_ENERGY
            )));
        }
        Ok(())
    }

    /// Time in seconds to cover `distance_km` at the speed matching `kind`,
    /// rounded to two decimal places. Does not touch energy.
    pub fn run_race(&self, kind: RaceKind, distance_km: f64) -> Result<f64> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(Error::InvalidValue(format!(
                "race distance {distance_km} km must be positive"
            )));
        }
        let speed = match kind {
            RaceKind::Short => self.sprint_speed,
            RaceKind::Long => self.endurance_speed,
        };
        Ok(round_centis(distance_km * 1000.0 / speed))
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} Age: {} Country: {}",
            self.name, self.age, self.country
        )
    }
}

/// Rounds to two decimal places.
fn round_centis(t: f64) -> f64 {
    (t * 100.0).round() / 100.0
}
