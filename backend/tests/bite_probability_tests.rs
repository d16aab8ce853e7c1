//! Bite probability engine tests
//!
//! Covers the rule brackets, lunar multiplier ordering and the 0-100
//! clamp for arbitrary finite weather.

use proptest::prelude::*;
use shared::{assess_bite_probability, BiteFactor, DailyWeather, LunarPhase};

fn weather(temp: f64, wind: f64, pressure: f64, clouds: f64, rain: Option<f64>) -> DailyWeather {
    DailyWeather {
        day_temperature_celsius: temp,
        wind_speed_mps: wind,
        wind_bearing_deg: 180.0,
        cloud_cover_percent: clouds,
        pressure_hpa: pressure,
        precipitation_mm: rain,
        night_temperature_celsius: None,
        humidity_percent: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Ideal summer day under a full moon
    #[test]
    fn test_ideal_day_full_moon() {
        let assessment =
            assess_bite_probability(&weather(20.0, 1.0, 1015.0, 50.0, None), LunarPhase::FullMoon);

        assert_eq!(assessment.probability, 95.0);
        assert_eq!(
            assessment.positive_factors,
            vec![
                BiteFactor::OptimalTemperature(20.0),
                BiteFactor::LightWind,
                BiteFactor::StablePressure,
                BiteFactor::VariableClouds,
                BiteFactor::FavorableMoon(LunarPhase::FullMoon),
            ]
        );
        assert!(assessment.negative_factors.is_empty());
    }

    /// Every rule negative under a new moon goes below zero before clamping
    #[test]
    fn test_storm_new_moon_clamps_to_zero() {
        let assessment = assess_bite_probability(
            &weather(2.0, 10.0, 990.0, 90.0, Some(8.0)),
            LunarPhase::NewMoon,
        );

        assert_eq!(assessment.probability, 0.0);
        assert!(assessment.positive_factors.is_empty());
        assert_eq!(
            assessment.negative_factors,
            vec![
                BiteFactor::UnfavorableTemperature(2.0),
                BiteFactor::VeryStrongWind,
                BiteFactor::UnstablePressure,
                BiteFactor::Overcast,
                BiteFactor::HeavyRain,
                BiteFactor::UnfavorableMoon(LunarPhase::NewMoon),
            ]
        );
    }

    #[test]
    fn test_35_degrees_is_suboptimal_not_unfavorable() {
        let assessment =
            assess_bite_probability(&weather(35.0, 1.0, 1015.0, 50.0, None), LunarPhase::FullMoon);

        assert_eq!(
            assessment.negative_factors,
            vec![BiteFactor::SuboptimalTemperature(35.0)]
        );
        assert_eq!(assessment.probability, 70.0);
    }

    #[test]
    fn test_factor_notes_are_readable() {
        let assessment =
            assess_bite_probability(&weather(20.0, 1.0, 1015.0, 50.0, None), LunarPhase::FullMoon);
        let notes = assessment.positive_notes();

        assert_eq!(notes[0], "Optimal temperature (20.0°C)");
        assert_eq!(notes[1], "Light wind");
        assert_eq!(notes[4], "Favorable moon phase (Full Moon 🌕)");
    }

    #[test]
    fn test_multiplier_scales_before_clamp() {
        // 50 + 15 + 10 + 10 + 10 + 5 = 100, scaled by 0.7 stays below the cap
        let assessment = assess_bite_probability(
            &weather(20.0, 1.0, 1015.0, 50.0, Some(1.0)),
            LunarPhase::WaningCrescent,
        );
        assert!((assessment.probability - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_moderate_wind_and_rain_brackets() {
        let assessment =
            assess_bite_probability(&weather(20.0, 5.0, 1015.0, 50.0, Some(5.0)), LunarPhase::FullMoon);
        assert!(assessment.positive_factors.contains(&BiteFactor::ModerateWind));
        assert!(assessment.negative_factors.contains(&BiteFactor::ModerateRain));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn arb_phase() -> impl Strategy<Value = LunarPhase> {
        prop::sample::select(LunarPhase::ALL.to_vec())
    }

    fn arb_weather() -> impl Strategy<Value = DailyWeather> {
        (
            -60.0f64..60.0,
            0.0f64..60.0,
            850.0f64..1100.0,
            0.0f64..=100.0,
            prop::option::of(0.0f64..200.0),
        )
            .prop_map(|(t, w, p, c, r)| weather(t, w, p, c, r))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Probability always lies in 0-100
        #[test]
        fn prop_probability_is_clamped(w in arb_weather(), moon in arb_phase()) {
            let assessment = assess_bite_probability(&w, moon);
            prop_assert!(assessment.probability >= 0.0);
            prop_assert!(assessment.probability <= 100.0);
        }

        /// Same input, same output
        #[test]
        fn prop_assessment_is_deterministic(w in arb_weather(), moon in arb_phase()) {
            prop_assert_eq!(assess_bite_probability(&w, moon), assess_bite_probability(&w, moon));
        }

        /// Positive and negative lists partition factors by sign
        #[test]
        fn prop_factor_lists_match_sign(w in arb_weather(), moon in arb_phase()) {
            let assessment = assess_bite_probability(&w, moon);
            prop_assert!(assessment.positive_factors.iter().all(|f| f.is_positive()));
            prop_assert!(assessment.negative_factors.iter().all(|f| !f.is_positive()));
        }

        /// Probability equals the clamped, scaled sum of factor points
        #[test]
        fn prop_probability_matches_factor_points(w in arb_weather(), moon in arb_phase()) {
            let assessment = assess_bite_probability(&w, moon);
            let sum: f64 = assessment
                .positive_factors
                .iter()
                .chain(assessment.negative_factors.iter())
                .map(|f| f.points())
                .sum();
            let expected = ((50.0 + sum) * moon.fishing_factor()).clamp(0.0, 100.0);
            prop_assert!((assessment.probability - expected).abs() < 1e-9);
        }

        /// Exactly one temperature, wind and cloud note per day
        #[test]
        fn prop_one_note_per_mandatory_rule(w in arb_weather(), moon in arb_phase()) {
            let assessment = assess_bite_probability(&w, moon);
            let all: Vec<_> = assessment
                .positive_factors
                .iter()
                .chain(assessment.negative_factors.iter())
                .collect();
            let temperature = all.iter().filter(|f| matches!(f,
                BiteFactor::OptimalTemperature(_)
                | BiteFactor::AcceptableTemperature(_)
                | BiteFactor::UnfavorableTemperature(_)
                | BiteFactor::SuboptimalTemperature(_))).count();
            let wind = all.iter().filter(|f| matches!(f,
                BiteFactor::LightWind
                | BiteFactor::ModerateWind
                | BiteFactor::StrongWind
                | BiteFactor::VeryStrongWind)).count();
            let clouds = all.iter().filter(|f| matches!(f,
                BiteFactor::VariableClouds | BiteFactor::ClearWeather | BiteFactor::Overcast)).count();
            prop_assert_eq!(temperature, 1);
            prop_assert_eq!(wind, 1);
            prop_assert_eq!(clouds, 1);
        }
    }
}
