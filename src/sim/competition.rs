//! Competition - round orchestration and leaderboard scoring
//!
//! Runs a fixed number of rounds, each one short race plus one marathon over
//! the full roster, and folds every race's results into a cumulative
//! leaderboard of ordinal slots.

use std::fmt;
use std::mem;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::sim::race::{Race, RaceKind, RaceResult};
use crate::sim::runner::Runner;

/// Upper bound on competition rounds.
pub const MAX_ROUNDS: u32 = 3;

/// Cumulative standings: one slot per roster member, best first. Slots are
/// empty until the first race's results are folded in, then every slot is
/// rebuilt on each update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Leaderboard {
    slots: Vec<Option<(String, u32)>>,
}

impl Leaderboard {
    fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Number of ranking slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in rank order, best first, paired with their ordinal label.
    pub fn iter(&self) -> impl Iterator<Item = (String, Option<&(String, u32)>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (ordinal(i + 1), slot.as_ref()))
    }

    /// Looks up a slot by ordinal label, e.g. `"1st"`.
    pub fn get(&self, rank: &str) -> Option<&(String, u32)> {
        self.iter()
            .find(|(label, _)| label.as_str() == rank)
            .and_then(|(_, slot)| slot)
    }
}

impl fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Leaderboard")?;
        writeln!(f)?;
        for (rank, slot) in self.iter() {
            match slot {
                Some((name, score)) => writeln!(f, "{rank} - {name} ({score})")?,
                None => writeln!(f, "{rank} -")?,
            }
        }
        Ok(())
    }
}

/// Ordinal label for a rank, with the 11th/12th/13th exception.
fn ordinal(n: usize) -> String {
    let suffix = match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{n}{suffix}")
}

/// A multi-round competition over a fixed roster.
#[derive(Debug)]
pub struct Competition {
    runners: Vec<Runner>,
    rounds: u32,
    distances_short: Vec<f64>,
    distances_marathon: Vec<f64>,
    leaderboard: Leaderboard,
}

impl Competition {
    /// Creates a competition. Both distance lists must hold one positive
    /// distance per round, and the roster must fit the short-race field
    /// (every round races the full roster in both categories).
    pub fn new(
        runners: Vec<Runner>,
        rounds: u32,
        distances_short: Vec<f64>,
        distances_marathon: Vec<f64>,
    ) -> Result<Self> {
        if !(1..=MAX_ROUNDS).contains(&rounds) {
            return Err(Error::InvalidValue(format!(
                "round count {rounds} must be within 1..={MAX_ROUNDS}"
            )));
        }
        if distances_short.len() != rounds as usize
            || distances_marathon.len() != rounds as usize
        {
            return Err(Error::InvalidValue(format!(
                "expected {rounds} short and {rounds} marathon distances, \
                 got {} and {}",
                distances_short.len(),
                distances_marathon.len()
            )));
        }
        for &distance in distances_short.iter().chain(&distances_marathon) {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(Error::InvalidValue(format!(
                    "race distance {distance} km must be positive"
                )));
            }
        }
        let short_capacity = RaceKind::Short.max_entrants();
        if runners.len() > short_capacity {
            return Err(Error::InvalidValue(format!(
                "roster of {} exceeds the short race field of {short_capacity}",
                runners.len()
            )));
        }
        for (i, runner) in runners.iter().enumerate() {
            if runners[..i].iter().any(|r| r.name() == runner.name()) {
                return Err(Error::RunnerAlreadyEntered(runner.name().to_owned()));
            }
        }

        let leaderboard = Leaderboard::with_slots(runners.len());
        Ok(Self {
            runners,
            rounds,
            distances_short,
            distances_marathon,
            leaderboard,
        })
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn runners(&self) -> &[Runner] {
        &self.runners
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Runs every round in order: short race, marathon, energy recovery for
    /// marathon DNFs, then leaderboard updates (short results first).
    ///
    /// Marathon finishers keep whatever energy the race left them with, so
    /// fatigue compounds across rounds; DNF runners start the next round on a
    /// full tank.
    pub fn conduct_competition(&mut self) -> Result<&Leaderboard> {
        for round in 1..=self.rounds {
            let idx = (round - 1) as usize;
            log::debug!(
                "round {round}: short {} km, marathon {} km",
                self.distances_short[idx],
                self.distances_marathon[idx]
            );

            let short_results = self.run_round_race(RaceKind::Short, self.distances_short[idx])?;
            let marathon_results =
                self.run_round_race(RaceKind::Long, self.distances_marathon[idx])?;

            for result in &marathon_results {
                if result.outcome.is_dnf() {
                    if let Some(runner) =
                        self.runners.iter_mut().find(|r| r.name() == result.name)
                    {
                        runner.recover_energy(Runner::MAX_ENERGY)?;
                        log::debug!("round {round}: {} DNF, energy restored", result.name);
                    }
                }
            }

            self.update_leaderboard(&short_results);
            self.update_leaderboard(&marathon_results);
        }
        Ok(&self.leaderboard)
    }

    /// Moves the roster into a fresh race, conducts it, and takes the roster
    /// back with its mutated energy state.
    fn run_round_race(&mut self, kind: RaceKind, distance_km: f64) -> Result<Vec<RaceResult>> {
        let mut race = Race::new(kind, distance_km, mem::take(&mut self.runners))?;
        let results = race.conduct_race();
        self.runners = race.into_runners();
        results
    }

    /// Folds one race's results into the leaderboard.
    ///
    /// Finishers are ranked by time (DNF after every finisher); the fastest
    /// of an N-entry field scores N-1 down the ranking, every DNF scores 0.
    /// Scores add onto prior cumulative totals and the whole board is rebuilt
    /// best-first; the stable sort keeps this race's finish order on ties.
    pub fn update_leaderboard(&mut self, results: &[RaceResult]) {
        let field = results.len();

        let mut by_time: Vec<&RaceResult> = results.iter().collect();
        by_time.sort_by(|a, b| a.outcome.cmp(&b.outcome));

        let mut scores: Vec<(String, u32)> = by_time
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let points = if result.outcome.is_dnf() {
                    0
                } else {
                    (field - i - 1) as u32
                };
                (result.name.clone(), points)
            })
            .collect();

        for (name, prior) in self.leaderboard.slots.iter().flatten() {
            if let Some(entry) = scores.iter_mut().find(|(n, _)| n == name) {
                entry.1 += prior;
            }
        }

        scores.sort_by_key(|(_, score)| std::cmp::Reverse(*score));
        for (slot, entry) in self.leaderboard.slots.iter_mut().zip(scores) {
            *slot = Some(entry);
        }
    }
}
