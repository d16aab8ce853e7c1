//! Bite probability engine
//!
//! Additive weather scoring with a final lunar multiplier. Each rule that
//! fires contributes one [`BiteFactor`] so the score stays auditable.

use serde::{Deserialize, Serialize, Serializer};

use super::lunar::LunarPhase;
use super::weather::DailyWeather;

/// Neutral starting score before any rule is applied
pub const BASELINE_PROBABILITY: f64 = 50.0;

/// Lunar factor at or above which the moon counts in favour of the bite
pub const FAVORABLE_MOON_FACTOR: f64 = 0.9;
/// Lunar factor at or below which the moon counts against the bite
pub const UNFAVORABLE_MOON_FACTOR: f64 = 0.7;

/// One explained contribution to a bite assessment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BiteFactor {
    OptimalTemperature(f64),
    AcceptableTemperature(f64),
    UnfavorableTemperature(f64),
    SuboptimalTemperature(f64),
    LightWind,
    ModerateWind,
    StrongWind,
    VeryStrongWind,
    StablePressure,
    UnstablePressure,
    VariableClouds,
    ClearWeather,
    Overcast,
    LightRain,
    ModerateRain,
    HeavyRain,
    FavorableMoon(LunarPhase),
    UnfavorableMoon(LunarPhase),
}

impl BiteFactor {
    /// Points added to the running score. Lunar notes carry no points; the
    /// phase acts through its multiplier instead.
    pub fn points(&self) -> f64 {
        match self {
            Self::OptimalTemperature(_) => 15.0,
            Self::AcceptableTemperature(_) => 5.0,
            Self::UnfavorableTemperature(_) => -20.0,
            Self::SuboptimalTemperature(_) => -10.0,
            Self::LightWind => 10.0,
            Self::ModerateWind => 5.0,
            Self::StrongWind => -5.0,
            Self::VeryStrongWind => -15.0,
            Self::StablePressure => 10.0,
            Self::UnstablePressure => -10.0,
            Self::VariableClouds => 10.0,
            Self::ClearWeather => 5.0,
            Self::Overcast => -5.0,
            Self::LightRain => 5.0,
            Self::ModerateRain => -5.0,
            Self::HeavyRain => -15.0,
            Self::FavorableMoon(_) | Self::UnfavorableMoon(_) => 0.0,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Self::FavorableMoon(_) => true,
            Self::UnfavorableMoon(_) => false,
            other => other.points() > 0.0,
        }
    }
}

impl std::fmt::Display for BiteFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OptimalTemperature(t) => write!(f, "Optimal temperature ({:.1}°C)", t),
            Self::AcceptableTemperature(t) => write!(f, "Acceptable temperature ({:.1}°C)", t),
            Self::UnfavorableTemperature(t) => write!(f, "Unfavorable temperature ({:.1}°C)", t),
            Self::SuboptimalTemperature(t) => write!(f, "Suboptimal temperature ({:.1}°C)", t),
            Self::LightWind => write!(f, "Light wind"),
            Self::ModerateWind => write!(f, "Moderate wind"),
            Self::StrongWind => write!(f, "Strong wind"),
            Self::VeryStrongWind => write!(f, "Very strong wind"),
            Self::StablePressure => write!(f, "Stable pressure"),
            Self::UnstablePressure => write!(f, "Unstable pressure"),
            Self::VariableClouds => write!(f, "Variable cloud cover"),
            Self::ClearWeather => write!(f, "Clear weather"),
            Self::Overcast => write!(f, "Overcast"),
            Self::LightRain => write!(f, "Light rain"),
            Self::ModerateRain => write!(f, "Moderate rain"),
            Self::HeavyRain => write!(f, "Heavy rain"),
            Self::FavorableMoon(phase) => write!(f, "Favorable moon phase ({})", phase),
            Self::UnfavorableMoon(phase) => write!(f, "Unfavorable moon phase ({})", phase),
        }
    }
}

impl Serialize for BiteFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Engine output for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiteAssessment {
    /// Always within 0-100
    pub probability: f64,
    pub positive_factors: Vec<BiteFactor>,
    pub negative_factors: Vec<BiteFactor>,
}

impl BiteAssessment {
    pub fn positive_notes(&self) -> Vec<String> {
        self.positive_factors.iter().map(ToString::to_string).collect()
    }

    pub fn negative_notes(&self) -> Vec<String> {
        self.negative_factors.iter().map(ToString::to_string).collect()
    }
}

/// Owned view of an assessment with factors already rendered, for clients
/// that only need the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiteAssessmentSummary {
    pub probability: f64,
    pub positive_factors: Vec<String>,
    pub negative_factors: Vec<String>,
}

impl From<&BiteAssessment> for BiteAssessmentSummary {
    fn from(assessment: &BiteAssessment) -> Self {
        Self {
            probability: assessment.probability,
            positive_factors: assessment.positive_notes(),
            negative_factors: assessment.negative_notes(),
        }
    }
}

fn temperature_factor(celsius: f64) -> BiteFactor {
    if (15.0..=25.0).contains(&celsius) {
        BiteFactor::OptimalTemperature(celsius)
    } else if (10.0..15.0).contains(&celsius) || (celsius > 25.0 && celsius <= 30.0) {
        BiteFactor::AcceptableTemperature(celsius)
    } else if celsius < 5.0 || celsius > 35.0 {
        BiteFactor::UnfavorableTemperature(celsius)
    } else {
        // [5,10) and (30,35]
        BiteFactor::SuboptimalTemperature(celsius)
    }
}

fn wind_factor(speed_mps: f64) -> BiteFactor {
    if speed_mps < 2.0 {
        BiteFactor::LightWind
    } else if speed_mps <= 5.0 {
        BiteFactor::ModerateWind
    } else if speed_mps <= 8.0 {
        BiteFactor::StrongWind
    } else {
        BiteFactor::VeryStrongWind
    }
}

fn pressure_factor(hpa: f64) -> Option<BiteFactor> {
    if (1010.0..=1020.0).contains(&hpa) {
        Some(BiteFactor::StablePressure)
    } else if (1000.0..=1030.0).contains(&hpa) {
        None
    } else {
        Some(BiteFactor::UnstablePressure)
    }
}

fn cloud_factor(percent: f64) -> BiteFactor {
    if (30.0..=70.0).contains(&percent) {
        BiteFactor::VariableClouds
    } else if percent < 30.0 {
        BiteFactor::ClearWeather
    } else {
        BiteFactor::Overcast
    }
}

fn precipitation_factor(weather: &DailyWeather) -> Option<BiteFactor> {
    let mm = weather.rain_mm()?;
    Some(if mm < 2.0 {
        BiteFactor::LightRain
    } else if mm <= 5.0 {
        BiteFactor::ModerateRain
    } else {
        BiteFactor::HeavyRain
    })
}

fn lunar_factor(moon: LunarPhase) -> Option<BiteFactor> {
    let factor = moon.fishing_factor();
    if factor >= FAVORABLE_MOON_FACTOR {
        Some(BiteFactor::FavorableMoon(moon))
    } else if factor <= UNFAVORABLE_MOON_FACTOR {
        Some(BiteFactor::UnfavorableMoon(moon))
    } else {
        None
    }
}

/// Score one day of weather under the given lunar phase.
///
/// Rules are evaluated in a fixed order (temperature, wind, pressure,
/// clouds, precipitation, moon) and the factor lists keep that order. The
/// lunar multiplier scales the combined weather score and the result is
/// clamped to 0-100 afterwards.
pub fn assess_bite_probability(weather: &DailyWeather, moon: LunarPhase) -> BiteAssessment {
    let weather_factors = [
        Some(temperature_factor(weather.day_temperature_celsius)),
        Some(wind_factor(weather.wind_speed_mps)),
        pressure_factor(weather.pressure_hpa),
        Some(cloud_factor(weather.cloud_cover_percent)),
        precipitation_factor(weather),
    ];

    let mut probability = BASELINE_PROBABILITY;
    let mut positive_factors = Vec::new();
    let mut negative_factors = Vec::new();

    for factor in weather_factors.into_iter().flatten() {
        probability += factor.points();
        if factor.is_positive() {
            positive_factors.push(factor);
        } else {
            negative_factors.push(factor);
        }
    }

    probability *= moon.fishing_factor();
    match lunar_factor(moon) {
        Some(factor) if factor.is_positive() => positive_factors.push(factor),
        Some(factor) => negative_factors.push(factor),
        None => {}
    }

    BiteAssessment {
        probability: probability.clamp(0.0, 100.0),
        positive_factors,
        negative_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temp: f64, wind: f64, pressure: f64, clouds: f64, rain: Option<f64>) -> DailyWeather {
        DailyWeather {
            day_temperature_celsius: temp,
            wind_speed_mps: wind,
            wind_bearing_deg: 0.0,
            cloud_cover_percent: clouds,
            pressure_hpa: pressure,
            precipitation_mm: rain,
            night_temperature_celsius: None,
            humidity_percent: None,
        }
    }

    #[test]
    fn test_temperature_brackets() {
        assert!(matches!(temperature_factor(15.0), BiteFactor::OptimalTemperature(_)));
        assert!(matches!(temperature_factor(25.0), BiteFactor::OptimalTemperature(_)));
        assert!(matches!(temperature_factor(10.0), BiteFactor::AcceptableTemperature(_)));
        assert!(matches!(temperature_factor(30.0), BiteFactor::AcceptableTemperature(_)));
        assert!(matches!(temperature_factor(30.5), BiteFactor::SuboptimalTemperature(_)));
        assert!(matches!(temperature_factor(35.0), BiteFactor::SuboptimalTemperature(_)));
        assert!(matches!(temperature_factor(5.0), BiteFactor::SuboptimalTemperature(_)));
        assert!(matches!(temperature_factor(4.9), BiteFactor::UnfavorableTemperature(_)));
        assert!(matches!(temperature_factor(35.1), BiteFactor::UnfavorableTemperature(_)));
    }

    #[test]
    fn test_neutral_pressure_band_has_no_note() {
        assert_eq!(pressure_factor(1005.0), None);
        assert_eq!(pressure_factor(1025.0), None);
        assert_eq!(pressure_factor(1030.0), None);
        assert_eq!(pressure_factor(1000.0), None);
        assert_eq!(pressure_factor(999.9), Some(BiteFactor::UnstablePressure));
        assert_eq!(pressure_factor(1030.1), Some(BiteFactor::UnstablePressure));
    }

    #[test]
    fn test_zero_precipitation_is_ignored() {
        let with_zero = assess_bite_probability(
            &weather(20.0, 1.0, 1015.0, 50.0, Some(0.0)),
            LunarPhase::WaxingGibbous,
        );
        let without = assess_bite_probability(
            &weather(20.0, 1.0, 1015.0, 50.0, None),
            LunarPhase::WaxingGibbous,
        );
        assert_eq!(with_zero, without);
    }

    #[test]
    fn test_light_rain_is_positive() {
        let assessment = assess_bite_probability(
            &weather(20.0, 1.0, 1015.0, 50.0, Some(1.0)),
            LunarPhase::WaxingGibbous,
        );
        assert!(assessment.positive_factors.contains(&BiteFactor::LightRain));
    }

    #[test]
    fn test_intermediate_moon_adds_no_note() {
        let assessment = assess_bite_probability(
            &weather(20.0, 1.0, 1015.0, 50.0, None),
            LunarPhase::LastQuarter,
        );
        assert!(assessment
            .positive_factors
            .iter()
            .chain(assessment.negative_factors.iter())
            .all(|f| !matches!(f, BiteFactor::FavorableMoon(_) | BiteFactor::UnfavorableMoon(_))));
        assert!((assessment.probability - 95.0 * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_factor_text() {
        assert_eq!(
            BiteFactor::OptimalTemperature(20.0).to_string(),
            "Optimal temperature (20.0°C)"
        );
        assert_eq!(
            BiteFactor::AcceptableTemperature(25.4).to_string(),
            "Acceptable temperature (25.4°C)"
        );
        assert_eq!(
            BiteFactor::SuboptimalTemperature(9.96).to_string(),
            "Suboptimal temperature (10.0°C)"
        );
        assert_eq!(
            BiteFactor::FavorableMoon(LunarPhase::FullMoon).to_string(),
            "Favorable moon phase (Full Moon 🌕)"
        );
    }

    #[test]
    fn test_assessment_serializes_factors_as_text() {
        let assessment = assess_bite_probability(
            &weather(20.0, 1.0, 1015.0, 50.0, None),
            LunarPhase::FullMoon,
        );
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["positive_factors"][1], "Light wind");
        assert_eq!(json["probability"], 95.0);
    }
}
