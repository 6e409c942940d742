use serde::{Deserialize, Serialize};

/// Name of the aggregate pseudo-entity offered next to real countries.
pub const WORLD_NAME: &str = "World (Overall)";

/// One row of the happiness dataset.
///
/// Field names on the wire are fixed by the dataset export; absent numeric
/// columns read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "Country")]
    pub country: String,
    /// `None` only for the world aggregate.
    #[serde(rename = "Rank", default)]
    pub rank: Option<u32>,
    #[serde(rename = "Ladder_score", default)]
    pub score: f64,
    #[serde(rename = "upperwhisker", default)]
    pub upper_whisker: f64,
    #[serde(rename = "lowerwhisker", default)]
    pub lower_whisker: f64,
    #[serde(rename = "Log_GDP_per_capita", default)]
    pub gdp: f64,
    #[serde(rename = "Social_support", default)]
    pub social_support: f64,
    #[serde(rename = "Healthy_life_expectancy", default)]
    pub life_expectancy: f64,
    #[serde(rename = "Freedom_to_make_life_choices", default)]
    pub freedom: f64,
    #[serde(rename = "Generosity", default)]
    pub generosity: f64,
    #[serde(rename = "Perceptions_of_corruption", default)]
    pub corruption: f64,
    #[serde(rename = "Dystopia_plus_residual", default)]
    pub residual: f64,
}

/// Explanatory factors shown side by side in comparison mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Factor {
    Gdp,
    SocialSupport,
    LifeExpectancy,
    Freedom,
    Generosity,
    Corruption,
}

impl Factor {
    /// Table order; insight tie-breaks keep the earliest entry.
    pub const ALL: [Factor; 6] = [
        Factor::Gdp,
        Factor::SocialSupport,
        Factor::LifeExpectancy,
        Factor::Freedom,
        Factor::Generosity,
        Factor::Corruption,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Factor::Gdp => "GDP per Capita",
            Factor::SocialSupport => "Social Support",
            Factor::LifeExpectancy => "Life Expectancy",
            Factor::Freedom => "Freedom",
            Factor::Generosity => "Generosity",
            Factor::Corruption => "Absence of Corruption",
        }
    }
}

impl CountryRecord {
    /// A record with the given name and score and every other column zero.
    pub fn new(country: impl Into<String>, rank: Option<u32>, score: f64) -> Self {
        Self {
            country: country.into(),
            rank,
            score,
            upper_whisker: 0.0,
            lower_whisker: 0.0,
            gdp: 0.0,
            social_support: 0.0,
            life_expectancy: 0.0,
            freedom: 0.0,
            generosity: 0.0,
            corruption: 0.0,
            residual: 0.0,
        }
    }

    pub fn factor(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Gdp => self.gdp,
            Factor::SocialSupport => self.social_support,
            Factor::LifeExpectancy => self.life_expectancy,
            Factor::Freedom => self.freedom,
            Factor::Generosity => self.generosity,
            Factor::Corruption => self.corruption,
        }
    }

    pub fn with_factor(mut self, factor: Factor, value: f64) -> Self {
        let slot = match factor {
            Factor::Gdp => &mut self.gdp,
            Factor::SocialSupport => &mut self.social_support,
            Factor::LifeExpectancy => &mut self.life_expectancy,
            Factor::Freedom => &mut self.freedom,
            Factor::Generosity => &mut self.generosity,
            Factor::Corruption => &mut self.corruption,
        };
        *slot = value;
        self
    }
}
