//! Validation utilities for weather records and locations
//!
//! The scoring engine assumes well-formed input. These checks are the gate
//! the weather collaborator runs before a record reaches it.

use thiserror::Error;

use crate::models::DailyWeather;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherRecordError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl WeatherRecordError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotFinite { field } | Self::OutOfRange { field, .. } => field,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, WeatherRecordError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WeatherRecordError::NotFinite { field })
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), WeatherRecordError> {
    if (min..=max).contains(&finite(field, value)?) {
        Ok(())
    } else {
        Err(WeatherRecordError::OutOfRange { field, value })
    }
}

// ============================================================================
// Weather Validations
// ============================================================================

/// Reject records the engine must never see: non-finite numbers, negative
/// wind or precipitation, cloud cover outside 0-100.
pub fn validate_daily_weather(weather: &DailyWeather) -> Result<(), WeatherRecordError> {
    finite("day_temperature_celsius", weather.day_temperature_celsius)?;
    within("wind_speed_mps", weather.wind_speed_mps, 0.0, f64::MAX)?;
    finite("wind_bearing_deg", weather.wind_bearing_deg)?;
    within("cloud_cover_percent", weather.cloud_cover_percent, 0.0, 100.0)?;
    within("pressure_hpa", weather.pressure_hpa, 0.0, f64::MAX)?;
    if let Some(mm) = weather.precipitation_mm {
        within("precipitation_mm", mm, 0.0, f64::MAX)?;
    }
    if let Some(night) = weather.night_temperature_celsius {
        finite("night_temperature_celsius", night)?;
    }
    if let Some(humidity) = weather.humidity_percent {
        within("humidity_percent", humidity, 0.0, 100.0)?;
    }
    Ok(())
}

// ============================================================================
// Location Validations
// ============================================================================

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Place names typed by the user before geocoding
pub fn validate_location_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Location name cannot be empty");
    }
    if trimmed.chars().count() > 100 {
        return Err("Location name must be at most 100 characters");
    }
    if trimmed.starts_with('/') {
        return Err("Location name cannot be a command");
    }
    Ok(())
}
