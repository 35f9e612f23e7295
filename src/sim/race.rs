//! Race - roster management and single-race execution
//!
//! A race is built per round, populated with the competition roster, conducted
//! exactly once, then handed back. The two categories share one type and
//! differ only in a handful of derived rules.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::runner::Runner;

/// Multiplier applied to every short race time.
const SHORT_TIME_MULTIPLIER: f64 = 1.2;
/// Energy drained per simulated marathon kilometre.
const ENERGY_PER_KM: u32 = 100;

/// Race category. Determines roster capacity, timing rules, and whether
/// energy is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceKind {
    /// Sprint over the full distance; timed with a 1.2 multiplier, no
    /// energy use.
    Short,
    /// Marathon simulated kilometre by kilometre; drains energy and can end
    /// in a DNF.
    Long,
}

impl RaceKind {
    /// Maximum roster size for this category.
    pub fn max_entrants(self) -> usize {
        match self {
            RaceKind::Short => 8,
            RaceKind::Long => 16,
        }
    }
}

/// Result of a single runner's race: a finishing time in seconds, or DNF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Finished(f64),
    Dnf,
}

impl Outcome {
    pub fn is_dnf(self) -> bool {
        matches!(self, Outcome::Dnf)
    }

    /// The finishing time, if the runner finished.
    pub fn time(self) -> Option<f64> {
        match self {
            Outcome::Finished(t) => Some(t),
            Outcome::Dnf => None,
        }
    }
}

// DNF orders strictly after every finishing time, so a field with any mix of
// finishers and DNFs (or only DNFs) sorts without surprises.
impl Ord for Outcome {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Outcome::Finished(a), Outcome::Finished(b)) => a.total_cmp(b),
            (Outcome::Finished(_), Outcome::Dnf) => Ordering::Less,
            (Outcome::Dnf, Outcome::Finished(_)) => Ordering::Greater,
            (Outcome::Dnf, Outcome::Dnf) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Outcome {}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Finished(t) => write!(f, "{t:.2}"),
            Outcome::Dnf => write!(f, "DNF"),
        }
    }
}

/// Per-runner entry in a conducted race's result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResult {
    pub name: String,
    pub outcome: Outcome,
}

/// A single race over a fixed distance with an ordered roster.
#[derive(Debug)]
pub struct Race {
    kind: RaceKind,
    distance_km: f64,
    runners: Vec<Runner>,
}

impl Race {
    /// Creates a race and enters `runners` one by one, so roster capacity and
    /// duplicate checks apply to the initial roster too.
    pub fn new(kind: RaceKind, distance_km: f64, runners: Vec<Runner>) -> Result<Self> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(Error::InvalidValue(format!(
                "race distance {distance_km} km must be positive"
            )));
        }
        let mut race = Self {
            kind,
            distance_km,
            runners: Vec::with_capacity(runners.len()),
        };
        for runner in runners {
            race.add_runner(runner)?;
        }
        Ok(race)
    }

    /// Creates an empty short race.
    pub fn short(distance_km: f64) -> Result<Self> {
        Self::new(RaceKind::Short, distance_km, Vec::new())
    }

    /// Creates an empty marathon.
    pub fn marathon(distance_km: f64) -> Result<Self> {
        Self::new(RaceKind::Long, distance_km, Vec::new())
    }

    pub fn kind(&self) -> RaceKind {
        self.kind
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn runners(&self) -> &[Runner] {
        &self.runners
    }

    /// Enters a runner. Fails if the roster is full or the runner (by name)
    /// is already entered.
    pub fn add_runner(&mut self, runner: Runner) -> Result<()> {
        let capacity = self.kind.max_entrants();
        if self.runners.len() >= capacity {
            return Err(Error::RaceFull { capacity });
        }
        if self.runners.iter().any(|r| r.name() == runner.name()) {
            return Err(Error::RunnerAlreadyEntered(runner.name().to_owned()));
        }
        self.runners.push(runner);
        Ok(())
    }

    /// Withdraws the named runner, returning them.
    pub fn remove_runner(&mut self, name: &str) -> Result<Runner> {
        match self.runners.iter().position(|r| r.name() == name) {
            Some(i) => Ok(self.runners.remove(i)),
            None => Err(Error::RunnerNotEntered(name.to_owned())),
        }
    }

    /// Runs every entrant in roster order and returns one result per entrant,
    /// in that same order.
    ///
    /// Short races always finish. A marathon runs `ceil(distance)` legs of
    /// one kilometre each; a non-integral distance costs a full kilometre of
    /// time and energy for its last partial leg. A runner whose energy hits
    /// zero before the final leg is marked DNF and stops.
    pub fn conduct_race(&mut self) -> Result<Vec<RaceResult>> {
        let mut results = Vec::with_capacity(self.runners.len());
        match self.kind {
            RaceKind::Short => {
                for runner in &self.runners {
                    let time =
                        runner.run_race(RaceKind::Short, self.distance_km)? * SHORT_TIME_MULTIPLIER;
                    results.push(RaceResult {
                        name: runner.name().to_owned(),
                        outcome: Outcome::Finished(time),
                    });
                }
            }
            RaceKind::Long => {
                let legs = self.distance_km.ceil() as u32;
                for runner in &mut self.runners {
                    let mut time = 0.0;
                    let mut finished = true;
                    for _ in 0..legs {
                        if runner.energy() == 0 {
                            finished = false;
                            break;
                        }
                        time += runner.run_race(RaceKind::Long, 1.0)?;
                        runner.drain_energy(ENERGY_PER_KM)?;
                    }
                    results.push(RaceResult {
                        name: runner.name().to_owned(),
                        outcome: if finished {
                            Outcome::Finished(time)
                        } else {
                            Outcome::Dnf
                        },
                    });
                }
            }
        }
        Ok(results)
    }

    /// Hands the roster back after the race, energy state included.
    pub fn into_runners(self) -> Vec<Runner> {
        self.runners
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::countries::CountrySet;

    fn countries() -> CountrySet {
        ["Australia"].into_iter().collect()
    }

    fn runner(name: &str, sprint: f64, endurance: f64) -> Runner {
        Runner::new(name, 25, "Australia", sprint, endurance, &countries()).unwrap()
    }

    #[test]
    fn short_race_applies_time_multiplier() {
        let mut race = Race::short(2.0).unwrap();
        race.add_runner(runner("Elijah", 6.5, 4.0)).unwrap();
        let results = race.conduct_race().unwrap();
        assert_eq!(results.len(), 1);
        // 2000 / 6.5 rounded, then * 1.2.
        assert_relative_eq!(results[0].outcome.time().unwrap(), 307.69 * 1.2, epsilon = 1e-9);
    }

    #[test]
    fn short_race_never_dnfs_and_keeps_energy() {
        let mut race = Race::short(1.0).unwrap();
        let mut drained = runner("Elijah", 6.5, 4.0);
        drained.drain_energy(Runner::MAX_ENERGY).unwrap();
        race.add_runner(drained).unwrap();

        let results = race.conduct_race().unwrap();
        assert!(!results[0].outcome.is_dnf());
        assert_eq!(race.runners()[0].energy(), 0);
    }

    #[test]
    fn marathon_drains_energy_per_kilometre() {
        let mut race = Race::marathon(5.0).unwrap();
        race.add_runner(runner("Elijah", 6.5, 4.0)).unwrap();
        let results = race.conduct_race().unwrap();
        assert_relative_eq!(results[0].outcome.time().unwrap(), 1250.0, epsilon = 1e-9);
        assert_eq!(race.runners()[0].energy(), 500);
    }

    #[test]
    fn marathon_with_exactly_enough_energy_finishes() {
        // 10 legs at 100 energy each is exactly a full tank.
        let mut race = Race::marathon(10.0).unwrap();
        race.add_runner(runner("Elijah", 6.5, 4.0)).unwrap();
        let results = race.conduct_race().unwrap();
        assert!(!results[0].outcome.is_dnf());
        assert_eq!(race.runners()[0].energy(), 0);
    }

    #[test]
    fn marathon_dnfs_when_energy_runs_out() {
        let mut race = Race::marathon(11.0).unwrap();
        race.add_runner(runner("Elijah", 6.5, 4.0)).unwrap();
        let results = race.conduct_race().unwrap();
        assert!(results[0].outcome.is_dnf());
        assert_eq!(race.runners()[0].energy(), 0);
    }

    #[test]
    fn fractional_distance_rounds_up_to_whole_legs() {
        // 4.5 km simulates as 5 full legs.
        let mut race = Race::marathon(4.5).unwrap();
        race.add_runner(runner("Elijah", 6.5, 4.0)).unwrap();
        let results = race.conduct_race().unwrap();
        assert_relative_eq!(results[0].outcome.time().unwrap(), 1250.0, epsilon = 1e-9);
        assert_eq!(race.runners()[0].energy(), 500);
    }

    #[test]
    fn results_keep_roster_order() {
        let mut race = Race::short(1.0).unwrap();
        race.add_runner(runner("Slow", 2.2, 1.8)).unwrap();
        race.add_runner(runner("Fast", 6.5, 4.0)).unwrap();
        let results = race.conduct_race().unwrap();
        assert_eq!(results[0].name, "Slow");
        assert_eq!(results[1].name, "Fast");
    }

    #[test]
    fn roster_capacity_is_enforced() {
        let mut race = Race::short(1.0).unwrap();
        for i in 0..RaceKind::Short.max_entrants() {
            race.add_runner(runner(&format!("Runner{i}"), 6.5, 4.0))
                .unwrap();
        }
        assert!(matches!(
            race.add_runner(runner("OneTooMany", 6.5, 4.0)),
            Err(Error::RaceFull { capacity: 8 })
        ));
        // A marathon takes twice the field.
        assert_eq!(RaceKind::Long.max_entrants(), 16);
    }

    #[test]
    fn duplicate_and_missing_runners_are_distinct_errors() {
        let mut race = Race::short(1.0).unwrap();
        race.add_runner(runner("Elijah", 6.5, 4.0)).unwrap();
        assert!(matches!(
            race.add_runner(runner("Elijah", 6.5, 4.0)),
            Err(Error::RunnerAlreadyEntered(_))
        ));
        assert!(matches!(
            race.remove_runner("Rupert"),
            Err(Error::RunnerNotEntered(_))
        ));
        let removed = race.remove_runner("Elijah").unwrap();
        assert_eq!(removed.name(), "Elijah");
        assert!(race.runners().is_empty());
    }

    #[test]
    fn construction_rejects_bad_distance_and_duplicate_roster() {
        assert!(matches!(
            Race::short(0.0),
            Err(Error::InvalidValue(_))
        ));
        let roster = vec![runner("Elijah", 6.5, 4.0), runner("Elijah", 6.5, 4.0)];
        assert!(matches!(
            Race::new(RaceKind::Long, 5.0, roster),
            Err(Error::RunnerAlreadyEntered(_))
        ));
    }

    #[test]
    fn dnf_sorts_after_every_time() {
        let mut outcomes = vec![
            Outcome::Dnf,
            Outcome::Finished(10.0),
            Outcome::Dnf,
            Outcome::Finished(5.0),
        ];
        outcomes.sort();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Finished(5.0),
                Outcome::Finished(10.0),
                Outcome::Dnf,
                Outcome::Dnf,
            ]
        );
    }
}
