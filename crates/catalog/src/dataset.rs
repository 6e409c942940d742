use std::collections::BTreeMap;

use crate::record::{CountryRecord, WORLD_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateCountry(String),
    EmptyName { index: usize },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateCountry(name) => {
                write!(f, "country listed more than once: {name}")
            }
            CatalogError::EmptyName { index } => write!(f, "record {index} has an empty name"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable collection of country records keyed by canonical name.
///
/// Lookups are trimmed and case-insensitive; the original record order is
/// kept for iteration.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CountryRecord>,
    by_key: BTreeMap<String, usize>,
    world: CountryRecord,
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Dataset {
    pub fn new(records: Vec<CountryRecord>) -> Result<Self, CatalogError> {
        let mut by_key = BTreeMap::new();
        for (index, r) in records.iter().enumerate() {
            let key = lookup_key(&r.country);
            if key.is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if by_key.insert(key, index).is_some() {
                return Err(CatalogError::DuplicateCountry(r.country.clone()));
            }
        }
        let world = aggregate(&records);
        Ok(Self {
            records,
            by_key,
            world,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    /// Record for a canonical country name. `None` means "no data".
    pub fn get(&self, name: &str) -> Option<&CountryRecord> {
        self.by_key
            .get(&lookup_key(name))
            .and_then(|&i| self.records.get(i))
    }

    /// Like [`Dataset::get`] but also resolves the world pseudo-entity.
    pub fn record_or_world(&self, name: &str) -> Option<&CountryRecord> {
        if is_world(name) {
            return Some(&self.world);
        }
        self.get(name)
    }

    pub fn world_aggregate(&self) -> &CountryRecord {
        &self.world
    }

    /// Country names in alphabetical order, as offered by the pickers.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Highest-scoring `n` records, best first.
    pub fn top(&self, n: usize) -> Vec<&CountryRecord> {
        let mut sorted = self.by_score_desc();
        sorted.truncate(n);
        sorted
    }

    /// Lowest-scoring `n` records, worst last.
    pub fn bottom(&self, n: usize) -> Vec<&CountryRecord> {
        let sorted = self.by_score_desc();
        let start = sorted.len().saturating_sub(n);
        sorted[start..].to_vec()
    }

    fn by_score_desc(&self) -> Vec<&CountryRecord> {
        let mut sorted: Vec<&CountryRecord> = self.records.iter().collect();
        // Stable: equal scores keep dataset order.
        sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
        sorted
    }
}

pub fn is_world(name: &str) -> bool {
    name.trim() == WORLD_NAME
}

/// Arithmetic mean of every numeric column. Whiskers are not averaged.
fn aggregate(records: &[CountryRecord]) -> CountryRecord {
    let mut world = CountryRecord::new(WORLD_NAME, None, 0.0);
    if records.is_empty() {
        return world;
    }
    world.score = mean(records, |r| r.score);
    world.gdp = mean(records, |r| r.gdp);
    world.social_support = mean(records, |r| r.social_support);
    world.life_expectancy = mean(records, |r| r.life_expectancy);
    world.freedom = mean(records, |r| r.freedom);
    world.generosity = mean(records, |r| r.generosity);
    world.corruption = mean(records, |r| r.corruption);
    world.residual = mean(records, |r| r.residual);
    world
}

fn mean(records: &[CountryRecord], field: impl Fn(&CountryRecord) -> f64) -> f64 {
    records.iter().map(field).sum::<f64>() / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, Dataset, is_world};
    use crate::record::{CountryRecord, WORLD_NAME};
    use pretty_assertions::assert_eq;

    fn rec(name: &str, score: f64) -> CountryRecord {
        CountryRecord::new(name, Some(1), score)
    }

    #[test]
    fn world_aggregate_is_mean_score() {
        let ds = Dataset::new(vec![rec("A", 5.0), rec("B", 6.0), rec("C", 7.0)]).unwrap();
        let world = ds.world_aggregate();
        assert_eq!(world.score, 6.0);
        assert_eq!(world.rank, None);
        assert_eq!(world.country, WORLD_NAME);
        assert_eq!(world.upper_whisker, 0.0);
    }

    #[test]
    fn empty_dataset_aggregate_is_zero() {
        let ds = Dataset::new(Vec::new()).unwrap();
        assert_eq!(ds.world_aggregate().score, 0.0);
        assert!(ds.is_empty());
    }

    #[test]
    fn lookup_is_trimmed_and_case_insensitive() {
        let ds = Dataset::new(vec![rec("Finland", 7.7)]).unwrap();
        assert_eq!(ds.get("  finland ").map(|r| r.score), Some(7.7));
        assert!(ds.get("Narnia").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Dataset::new(vec![rec("Chad", 4.0), rec(" chad", 4.1)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCountry(" chad".to_string()));
    }

    #[test]
    fn empty_names_are_rejected() {
        let err = Dataset::new(vec![rec("A", 1.0), rec("  ", 2.0)]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyName { index: 1 });
    }

    #[test]
    fn record_or_world_resolves_pseudo_entity() {
        let ds = Dataset::new(vec![rec("A", 4.0), rec("B", 8.0)]).unwrap();
        assert_eq!(ds.record_or_world(WORLD_NAME).map(|r| r.score), Some(6.0));
        assert_eq!(ds.record_or_world("b").map(|r| r.score), Some(8.0));
        assert!(is_world(" World (Overall) "));
    }

    #[test]
    fn ordering_helpers() {
        let ds = Dataset::new(vec![
            rec("Mali", 4.2),
            rec("Denmark", 7.5),
            rec("Chile", 6.1),
            rec("Afghanistan", 1.7),
        ])
        .unwrap();
        assert_eq!(ds.sorted_names(), vec!["Afghanistan", "Chile", "Denmark", "Mali"]);

        let top: Vec<&str> = ds.top(2).iter().map(|r| r.country.as_str()).collect();
        assert_eq!(top, vec!["Denmark", "Chile"]);

        let bottom: Vec<&str> = ds.bottom(2).iter().map(|r| r.country.as_str()).collect();
        assert_eq!(bottom, vec!["Mali", "Afghanistan"]);

        assert_eq!(ds.top(10).len(), 4);
        assert_eq!(ds.bottom(10).len(), 4);
    }
}
