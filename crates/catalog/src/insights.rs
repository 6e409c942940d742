//! Head-to-head insight derivation for comparison mode.

use crate::record::{CountryRecord, Factor};

/// A factor difference must exceed this to count as a lead.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// How the corruption column is read when naming a leader.
///
/// The dataset's "explained by" column grows with the absence of corruption,
/// but exports disagree on the sign, so this is left to configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CorruptionSense {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct InsightPolicy {
    pub corruption: CorruptionSense,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScoreLead {
    Leads { side: Side, margin: f64 },
    /// Equal scores; no side is declared the winner.
    Tie,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FactorHighlight {
    Significant {
        factor: Factor,
        side: Side,
        difference: f64,
    },
    SimilarProfiles,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonInsights {
    pub name_a: String,
    pub name_b: String,
    pub rank_a: Option<u32>,
    pub rank_b: Option<u32>,
    pub score: ScoreLead,
    pub highlight: FactorHighlight,
}

pub fn compare(a: &CountryRecord, b: &CountryRecord, policy: InsightPolicy) -> ComparisonInsights {
    let score_diff = a.score - b.score;
    let score = if score_diff > 0.0 {
        ScoreLead::Leads {
            side: Side::A,
            margin: score_diff,
        }
    } else if score_diff < 0.0 {
        ScoreLead::Leads {
            side: Side::B,
            margin: -score_diff,
        }
    } else {
        ScoreLead::Tie
    };

    let mut highlight = FactorHighlight::SimilarProfiles;
    let mut best = SIGNIFICANCE_THRESHOLD;
    for factor in Factor::ALL {
        let diff = a.factor(factor) - b.factor(factor);
        let magnitude = diff.abs();
        // Strictly greater: the earliest factor wins ties.
        if magnitude > best {
            best = magnitude;
            highlight = FactorHighlight::Significant {
                factor,
                side: leading_side(factor, diff, policy),
                difference: magnitude,
            };
        }
    }

    ComparisonInsights {
        name_a: a.country.clone(),
        name_b: b.country.clone(),
        rank_a: a.rank,
        rank_b: b.rank,
        score,
        highlight,
    }
}

fn leading_side(factor: Factor, diff: f64, policy: InsightPolicy) -> Side {
    let a_higher = diff > 0.0;
    let a_leads = match (factor, policy.corruption) {
        (Factor::Corruption, CorruptionSense::LowerIsBetter) => !a_higher,
        _ => a_higher,
    };
    if a_leads { Side::A } else { Side::B }
}

impl ComparisonInsights {
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.name_a,
            Side::B => &self.name_b,
        }
    }

    pub fn rank(&self, side: Side) -> Option<u32> {
        match side {
            Side::A => self.rank_a,
            Side::B => self.rank_b,
        }
    }

    /// Human-readable notes: the score verdict followed by the factor highlight.
    pub fn notes(&self) -> [String; 2] {
        let verdict = match self.score {
            ScoreLead::Leads { side, margin } => {
                let other = match side {
                    Side::A => Side::B,
                    Side::B => Side::A,
                };
                match self.rank(side) {
                    Some(rank) => format!(
                        "{} ranks #{rank}, scoring {margin:.2} points higher than {}.",
                        self.name(side),
                        self.name(other)
                    ),
                    None => format!(
                        "{} scores {margin:.2} points higher than {}.",
                        self.name(side),
                        self.name(other)
                    ),
                }
            }
            ScoreLead::Tie => format!(
                "{} and {} have identical happiness scores.",
                self.name_a, self.name_b
            ),
        };
        let highlight = match self.highlight {
            FactorHighlight::Significant { factor, side, .. } => format!(
                "{} has a significant lead in {}.",
                self.name(side),
                factor.label()
            ),
            FactorHighlight::SimilarProfiles => {
                "Both countries have very similar profiles across most factors.".to_string()
            }
        };
        [verdict, highlight]
    }
}
