//! Weather service producing daily records for the bite engine
//!
//! The provider returns 3-hourly samples. They are folded into one
//! `DailyWeather` per calendar date before scoring.

use chrono::NaiveDate;
use shared::{validate_daily_weather, CurrentConditions, DailyWeather, GpsCoordinates};

use crate::error::{AppError, AppResult};
use crate::external::weather::{CurrentWeather, ForecastItem, GeocodedPlace, WeatherClient};

/// Night temperature assumed below the current reading when no forecast
/// samples are available
const NIGHT_TEMPERATURE_DROP: f64 = 5.0;

/// Weather service for fetching scored-ready data
#[derive(Clone)]
pub struct WeatherService {
    weather_client: WeatherClient,
}

impl WeatherService {
    pub fn new(weather_client: WeatherClient) -> Self {
        Self { weather_client }
    }

    /// Live conditions for the location card
    pub async fn current_conditions(&self, coords: GpsCoordinates) -> AppResult<CurrentWeather> {
        self.weather_client.get_current_weather(coords).await
    }

    /// Resolve a user-typed place name
    pub async fn find_location(&self, name: &str) -> AppResult<GeocodedPlace> {
        self.weather_client.find_location(name).await
    }

    /// Exactly `days` daily records starting with the provider's first date.
    ///
    /// Fails if either provider call fails or an aggregated record is not
    /// fit for scoring; no placeholder data is substituted.
    pub async fn daily_records(
        &self,
        coords: GpsCoordinates,
        days: usize,
    ) -> AppResult<Vec<DailyWeather>> {
        let (current, forecast) = tokio::try_join!(
            self.weather_client.get_current_weather(coords),
            self.weather_client.get_forecast(coords),
        )?;

        tracing::debug!(
            "Aggregating {} forecast samples for {}",
            forecast.forecasts.len(),
            coords
        );

        let records = aggregate_daily(&forecast.forecasts, &current.conditions, days);
        for record in &records {
            validate_daily_weather(record).map_err(|e| {
                AppError::WeatherServiceUnavailable(format!("Malformed weather record: {}", e))
            })?;
        }
        Ok(records)
    }
}

/// Fold 3-hourly samples into daily records, in order of first appearance.
///
/// Day temperature is the maximum sample and night temperature the minimum.
/// Pressure, humidity, wind and cloud cover are arithmetic means. Rain is
/// the sum of the 3h amounts and is omitted when zero. The result is cut
/// or padded to `days` entries; padding repeats the last day, or is derived
/// from current conditions when there are no samples at all.
pub fn aggregate_daily(
    items: &[ForecastItem],
    current: &CurrentConditions,
    days: usize,
) -> Vec<DailyWeather> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(date, _)| *date == item.date) {
            Some((_, samples)) => samples.push(item),
            None => groups.push((item.date, vec![item])),
        }
    }

    let mut records: Vec<DailyWeather> = groups
        .iter()
        .take(days)
        .map(|(_, samples)| summarize_day(samples))
        .collect();

    if records.is_empty() && days > 0 {
        records.push(from_current(current));
    }
    while records.len() < days {
        match records.last().cloned() {
            Some(last) => records.push(last),
            None => break,
        }
    }
    records
}

fn summarize_day(samples: &[&ForecastItem]) -> DailyWeather {
    let count = samples.len() as f64;
    let mean = |field: fn(&ForecastItem) -> f64| samples.iter().map(|s| field(s)).sum::<f64>() / count;

    let day_temperature = samples
        .iter()
        .map(|s| s.temperature_celsius)
        .fold(f64::NEG_INFINITY, f64::max);
    let night_temperature = samples
        .iter()
        .map(|s| s.temperature_celsius)
        .fold(f64::INFINITY, f64::min);
    let rain: f64 = samples.iter().filter_map(|s| s.rain_3h_mm).sum();

    DailyWeather {
        day_temperature_celsius: day_temperature,
        wind_speed_mps: mean(|s| s.wind_speed_mps),
        wind_bearing_deg: mean(|s| s.wind_direction_deg),
        cloud_cover_percent: mean(|s| s.cloud_coverage_percent),
        pressure_hpa: mean(|s| s.pressure_hpa),
        precipitation_mm: (rain > 0.0).then_some(rain),
        night_temperature_celsius: Some(night_temperature),
        humidity_percent: Some(mean(|s| s.humidity_percent)),
    }
}

fn from_current(current: &CurrentConditions) -> DailyWeather {
    DailyWeather {
        day_temperature_celsius: current.temperature_celsius,
        wind_speed_mps: current.wind_speed_mps,
        wind_bearing_deg: current.wind_bearing_deg,
        cloud_cover_percent: current.cloud_cover_percent,
        pressure_hpa: current.pressure_hpa,
        precipitation_mm: None,
        night_temperature_celsius: Some(current.temperature_celsius - NIGHT_TEMPERATURE_DROP),
        humidity_percent: Some(current.humidity_percent),
    }
}
