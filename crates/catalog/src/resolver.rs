use std::borrow::Cow;
use std::collections::BTreeMap;

/// Boundary-source spellings that differ from the dataset's canonical names.
///
/// Keys are the raw `properties.name` values of the 110m world atlas.
pub const DEFAULT_OVERRIDES: &[(&str, &str)] = &[
    ("United States of America", "United States"),
    ("Dem. Rep. Congo", "Congo (Kinshasa)"),
    ("Congo", "Congo (Brazzaville)"),
    ("Central African Rep.", "Central African Republic"),
    ("Dominican Rep.", "Dominican Republic"),
    ("Bosnia and Herz.", "Bosnia and Herzegovina"),
    ("Macedonia", "North Macedonia"),
    ("N. Cyprus", "North Cyprus"),
    ("S. Sudan", "South Sudan"),
    ("Côte d'Ivoire", "Ivory Coast"),
    ("Czech Rep.", "Czechia"),
    ("Turkey", "Türkiye"),
    ("Palestine", "State of Palestine"),
    ("Taiwan", "Taiwan Province of China"),
    ("Hong Kong", "Hong Kong S.A.R. of China"),
    ("Somaliland", "Somaliland region"),
    ("eSwatini", "Eswatini"),
    ("Lao PDR", "Laos"),
    ("Republic of Korea", "South Korea"),
    ("Korea", "South Korea"),
];

/// Maps raw boundary names to canonical dataset names.
///
/// Total and pure: names without an override pass through unchanged, and a
/// name that then fails to match a record is simply "no data".
#[derive(Debug, Clone)]
pub struct NameResolver {
    overrides: BTreeMap<String, String>,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_OVERRIDES.iter().copied())
    }
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with no overrides at all.
    pub fn identity() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            overrides: pairs
                .into_iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    /// Adds or replaces overrides; later entries win.
    pub fn with_overrides<'a>(
        mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        for (raw, canonical) in pairs {
            self.overrides.insert(raw.to_string(), canonical.to_string());
        }
        self
    }

    pub fn resolve<'a>(&'a self, raw_name: &'a str) -> Cow<'a, str> {
        match self.overrides.get(raw_name) {
            Some(canonical) => Cow::Borrowed(canonical.as_str()),
            None => Cow::Borrowed(raw_name),
        }
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::NameResolver;

    #[test]
    fn maps_overridden_names() {
        let r = NameResolver::new();
        assert_eq!(r.resolve("United States of America"), "United States");
        assert_eq!(r.resolve("Dem. Rep. Congo"), "Congo (Kinshasa)");
    }

    #[test]
    fn passes_unknown_names_through() {
        let r = NameResolver::new();
        assert_eq!(r.resolve("Finland"), "Finland");
        assert_eq!(r.resolve(""), "");
    }

    #[test]
    fn lookup_is_exact() {
        let r = NameResolver::new();
        assert_eq!(r.resolve("united states of america"), "united states of america");
    }

    #[test]
    fn host_overrides_replace_defaults() {
        let r = NameResolver::new().with_overrides([("Turkey", "Turkey"), ("Atlantis", "Lost")]);
        assert_eq!(r.resolve("Turkey"), "Turkey");
        assert_eq!(r.resolve("Atlantis"), "Lost");

        let id = NameResolver::identity();
        assert!(id.is_empty());
        assert_eq!(id.resolve("Turkey"), "Turkey");
    }
}
