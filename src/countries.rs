//! Country reference data used to validate runner nationalities.
//!
//! The set is loaded from a CSV reference file whose fourth column holds the
//! country name. Runner construction takes the set as an explicit dependency
//! so the simulation core stays free of hidden I/O.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Zero-based column of the reference CSV holding the country name.
const NAME_COLUMN: usize = 3;

/// The set of country names accepted for runners.
#[derive(Debug, Clone, Default)]
pub struct CountrySet {
    names: HashSet<String>,
}

impl CountrySet {
    /// Loads the set from a CSV reference file, skipping the header row.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mut names = HashSet::new();
        for line in BufReader::new(file).lines().skip(1) {
            let line = line?;
            if let Some(name) = line.trim().split(',').nth(NAME_COLUMN) {
                names.insert(name.to_owned());
            }
        }
        Ok(Self { names })
    }

    /// Whether `country` is a known country name.
    pub fn contains(&self, country: &str) -> bool {
        self.names.contains(country)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CountrySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_names_from_fourth_column() {
        let path = std::env::temp_dir().join("track_meet_countries_test.csv");
        std::fs::write(
            &path,
            "id,alpha2,alpha3,name,region\n\
             1,AU,AUS,Australia,Oceania\n\
             2,FR,FRA,France,Europe\n",
        )
        .unwrap();

        let set = CountrySet::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(set.len(), 2);
        assert!(set.contains("Australia"));
        assert!(set.contains("France"));
        // Header row is skipped, other columns are ignored.
        assert!(!set.contains("name"));
        assert!(!set.contains("Oceania"));
    }

    #[test]
    fn builds_from_iterator() {
        let set: CountrySet = ["Australia", "Botswana"].into_iter().collect();
        assert!(set.contains("Botswana"));
        assert!(!set.contains("France"));
    }
}
