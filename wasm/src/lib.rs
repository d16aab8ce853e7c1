//! WebAssembly module for the Fishing Bite Forecast
//!
//! Provides client-side scoring:
//! - Bite probability from a daily weather record
//! - Lunar phase for a day of the month
//! - Compass label for a wind bearing
//! - Rating label for a probability

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"bite forecast scoring loaded".into());
}

#[derive(Serialize)]
struct AssessmentReport {
    #[serde(flatten)]
    summary: BiteAssessmentSummary,
    rating: String,
    lunar_phase: String,
    wind_direction: String,
}

fn assess_report(weather_json: &str, day_of_month: u32) -> Result<String, String> {
    let weather: DailyWeather =
        serde_json::from_str(weather_json).map_err(|e| format!("Invalid weather JSON: {}", e))?;
    validate_daily_weather(&weather).map_err(|e| e.to_string())?;

    let moon = LunarPhase::from_day_in_cycle(day_of_month);
    let assessment = assess_bite_probability(&weather, moon);
    let report = AssessmentReport {
        summary: BiteAssessmentSummary::from(&assessment),
        rating: format_rating(assessment.probability),
        lunar_phase: moon.display_name(),
        wind_direction: resolve_wind_direction(weather.wind_bearing_deg).to_string(),
    };
    serde_json::to_string(&report).map_err(|e| e.to_string())
}

/// Score a daily weather record (JSON) for a day of the month
#[wasm_bindgen]
pub fn assess_bite_json(weather_json: &str, day_of_month: u32) -> Result<String, JsValue> {
    assess_report(weather_json, day_of_month).map_err(|e| JsValue::from_str(&e))
}

/// Lunar phase name with its glyph for a day of the month
#[wasm_bindgen]
pub fn lunar_phase_for_day(day_of_month: u32) -> String {
    LunarPhase::from_day_in_cycle(day_of_month).display_name()
}

/// Eight-point compass label for a bearing in degrees
#[wasm_bindgen]
pub fn wind_direction(bearing_deg: f64) -> String {
    resolve_wind_direction(bearing_deg).to_string()
}

/// Flame rating for a probability
#[wasm_bindgen]
pub fn bite_rating(probability: f64) -> String {
    format_rating(probability)
}
