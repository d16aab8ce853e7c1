//! Multi-day bite forecast assembled from the scoring core

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bite::{assess_bite_probability, BiteAssessment};
use super::lunar::LunarPhase;
use super::rating::BiteRating;
use super::weather::DailyWeather;
use super::wind::{resolve_wind_direction, CompassDirection};

/// One scored day of the forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOutlook {
    pub date: NaiveDate,
    pub weather: DailyWeather,
    pub wind_direction: CompassDirection,
    pub assessment: BiteAssessment,
    pub rating: BiteRating,
}

/// Overall outlook tier for the closing recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceTier {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl AdviceTier {
    /// Strict lower bounds at 75, 50 and 25
    pub fn from_probability(probability: f64) -> Self {
        if probability > 75.0 {
            Self::Excellent
        } else if probability > 50.0 {
            Self::Good
        } else if probability > 25.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub fn tips(&self) -> [&'static str; 2] {
        match self {
            Self::Excellent => [
                "Excellent time to go fishing, don't miss it.",
                "Predators will be active, use active lures.",
            ],
            Self::Good => [
                "A good day for fishing, especially in the morning and evening.",
                "Try combining different techniques.",
            ],
            Self::Moderate => [
                "Moderate bite, fish the calmest part of the day.",
                "Passive lures and bait are recommended.",
            ],
            Self::Poor => [
                "Unfavorable conditions, fish are sluggish.",
                "If you go anyway, focus on deep spots.",
            ],
        }
    }
}

/// Closing recommendation, keyed off the best day of the window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishingAdvice {
    pub best_date: NaiveDate,
    pub best_probability: f64,
    pub tier: AdviceTier,
    pub tips: [&'static str; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiteForecast {
    pub lunar_phase: LunarPhase,
    pub days: Vec<DayOutlook>,
    pub advice: Option<FishingAdvice>,
}

impl BiteForecast {
    /// Day with the highest probability; the earliest one wins ties
    pub fn best_day(&self) -> Option<&DayOutlook> {
        self.days.iter().fold(None, |best: Option<&DayOutlook>, day| match best {
            Some(b) if b.assessment.probability >= day.assessment.probability => Some(b),
            _ => Some(day),
        })
    }
}

/// Score consecutive days starting at `start_date`. The lunar phase is
/// computed once by the caller and reused for every day.
pub fn build_forecast(
    start_date: NaiveDate,
    records: &[DailyWeather],
    moon: LunarPhase,
) -> BiteForecast {
    let days: Vec<DayOutlook> = records
        .iter()
        .enumerate()
        .map(|(offset, weather)| {
            let assessment = assess_bite_probability(weather, moon);
            DayOutlook {
                date: start_date + Duration::days(offset as i64),
                weather: weather.clone(),
                wind_direction: resolve_wind_direction(weather.wind_bearing_deg),
                rating: BiteRating::from_probability(assessment.probability),
                assessment,
            }
        })
        .collect();

    let mut forecast = BiteForecast {
        lunar_phase: moon,
        days,
        advice: None,
    };

    forecast.advice = forecast.best_day().map(|day| {
        let tier = AdviceTier::from_probability(day.assessment.probability);
        FishingAdvice {
            best_date: day.date,
            best_probability: day.assessment.probability,
            tier,
            tips: tier.tips(),
        }
    });

    forecast
}
