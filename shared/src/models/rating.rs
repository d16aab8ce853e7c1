//! Discrete rating tiers for a bite probability

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiteRating {
    Excellent,
    Good,
    Average,
    Weak,
    VeryWeak,
}

impl BiteRating {
    /// Tier for a probability. Thresholds are inclusive lower bounds at
    /// 80, 60, 40 and 20; anything below 20 (or NaN) is very weak.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 80.0 {
            Self::Excellent
        } else if probability >= 60.0 {
            Self::Good
        } else if probability >= 40.0 {
            Self::Average
        } else if probability >= 20.0 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }

    pub fn flames(&self) -> usize {
        match self {
            Self::Excellent => 5,
            Self::Good => 4,
            Self::Average => 3,
            Self::Weak => 2,
            Self::VeryWeak => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent bite",
            Self::Good => "Good bite",
            Self::Average => "Average bite",
            Self::Weak => "Weak bite",
            Self::VeryWeak => "Very weak bite",
        }
    }
}

impl std::fmt::Display for BiteRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", "🔥".repeat(self.flames()), self.label())
    }
}

/// Human-readable rating, e.g. "🔥🔥🔥🔥 Good bite"
pub fn format_rating(probability: f64) -> String {
    BiteRating::from_probability(probability).to_string()
}
