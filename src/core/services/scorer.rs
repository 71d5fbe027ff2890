//! Risk scoring
//!
//! Linear accumulation of per-severity weights, capped at [`MAX_SCORE`].
//! It is a sum, not an average: four critical findings already saturate.

use serde::{Deserialize, Serialize};

use crate::core::models::{RiskItem, RiskLevel};

/// Upper bound of the overall risk score
pub const MAX_SCORE: u32 = 100;

/// Points contributed by one finding of each severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    /// Weight of a critical finding
    pub critical: u32,
    /// Weight of a high finding
    pub high: u32,
    /// Weight of a medium finding
    pub medium: u32,
    /// Weight of a low finding
    pub low: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            critical: 25,
            high: 15,
            medium: 8,
            low: 3,
        }
    }
}

impl SeverityWeights {
    /// Weight for `level`; unrecognized levels weigh nothing
    #[must_use]
    pub const fn weight(&self, level: RiskLevel) -> u32 {
        match level {
            RiskLevel::Critical => self.critical,
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
            RiskLevel::Unknown => 0,
        }
    }
}

/// Maps findings to a 0..=100 score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskScorer {
    weights: SeverityWeights,
}

impl RiskScorer {
    /// Scorer with explicit weights
    #[must_use]
    pub const fn new(weights: SeverityWeights) -> Self {
        Self { weights }
    }

    /// Score a list of findings
    #[must_use]
    pub fn score(&self, risks: &[RiskItem]) -> u32 {
        self.score_levels(risks.iter().map(|r| r.level))
    }

    /// Score a sequence of severity levels
    #[must_use]
    pub fn score_levels<I>(&self, levels: I) -> u32
    where
        I: IntoIterator<Item = RiskLevel>,
    {
        let total =
            levels.into_iter().fold(0u32, |acc, level| acc.saturating_add(self.weights.weight(level)));
        total.min(MAX_SCORE)
    }
}
