//! Weather API client for fetching weather data
//!
//! Integrates with the OpenWeatherMap 2.5 API for current conditions,
//! 3-hourly forecasts and place-name lookup

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{CurrentConditions, GpsCoordinates};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    units: String,
    lang: String,
}

/// Current weather at a place, as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub country: String,
    pub coordinates: GpsCoordinates,
    pub timestamp: DateTime<Utc>,
    pub conditions: CurrentConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_1h_mm: Option<f64>,
}

/// One 3-hourly forecast sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastItem {
    pub timestamp: DateTime<Utc>,
    /// Calendar date the provider files this sample under
    pub date: NaiveDate,
    pub temperature_celsius: f64,
    pub pressure_hpa: f64,
    pub humidity_percent: f64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub cloud_coverage_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_3h_mm: Option<f64>,
}

/// 5-day / 3-hour forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub location_name: String,
    pub forecasts: Vec<ForecastItem>,
}

/// A place name resolved to coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    coord: OWMCoord,
    main: OWMMain,
    wind: OWMWind,
    clouds: OWMClouds,
    rain: Option<OWMRain>,
    dt: i64,
    sys: OWMSys,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMClouds {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMSys {
    #[serde(default)]
    country: Option<String>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    dt_txt: Option<String>,
    main: OWMMain,
    clouds: OWMClouds,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Weather HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            units: config.units.clone(),
            lang: config.lang.clone(),
        })
    }

    /// Create a new WeatherClient with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            units: "metric".to_string(),
            lang: "en".to_string(),
        }
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(&self, coords: GpsCoordinates) -> AppResult<CurrentWeather> {
        let data: OWMCurrentResponse = self
            .get_json(
                "weather",
                &[
                    ("lat", coords.latitude.to_string()),
                    ("lon", coords.longitude.to_string()),
                ],
            )
            .await?;

        Ok(convert_current_response(data))
    }

    /// Fetch the 5-day / 3-hour forecast by GPS coordinates
    pub async fn get_forecast(&self, coords: GpsCoordinates) -> AppResult<WeatherForecast> {
        let data: OWMForecastResponse = self
            .get_json(
                "forecast",
                &[
                    ("lat", coords.latitude.to_string()),
                    ("lon", coords.longitude.to_string()),
                ],
            )
            .await?;

        Ok(convert_forecast_response(data))
    }

    /// Resolve a place name through the current-weather endpoint
    pub async fn find_location(&self, name: &str) -> AppResult<GeocodedPlace> {
        let data: OWMCurrentResponse = self
            .get_json("weather", &[("q", name.trim().to_string())])
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::LocationNotFound(name.trim().to_string()),
                other => other,
            })?;

        tracing::debug!("Resolved '{}' to {} ({})", name, data.name, data.coord.lat);

        Ok(GeocodedPlace {
            name: data.name,
            country: data.sys.country.unwrap_or_default(),
            latitude: data.coord.lat,
            longitude: data.coord.lon,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::WeatherServiceUnavailable(format!(
                    "Weather API request failed: {}",
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(endpoint.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherServiceUnavailable(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            AppError::WeatherServiceUnavailable(format!(
                "Failed to parse {} response: {}",
                endpoint,
                e.without_url()
            ))
        })
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> CurrentWeather {
    CurrentWeather {
        location_name: data.name,
        country: data.sys.country.unwrap_or_default(),
        coordinates: GpsCoordinates::from_f64(data.coord.lat, data.coord.lon),
        timestamp: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
        conditions: CurrentConditions {
            temperature_celsius: data.main.temp,
            feels_like_celsius: data.main.feels_like,
            pressure_hpa: data.main.pressure,
            humidity_percent: data.main.humidity,
            wind_speed_mps: data.wind.speed,
            wind_bearing_deg: data.wind.deg.unwrap_or(0.0),
            cloud_cover_percent: data.clouds.all,
        },
        rain_1h_mm: data.rain.and_then(|r| r.one_hour),
    }
}

/// Convert OpenWeatherMap forecast response to our format
fn convert_forecast_response(data: OWMForecastResponse) -> WeatherForecast {
    let forecasts = data
        .list
        .into_iter()
        .map(|item| {
            let timestamp = DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now);
            ForecastItem {
                date: item
                    .dt_txt
                    .as_deref()
                    .and_then(|txt| NaiveDateTime::parse_from_str(txt, "%Y-%m-%d %H:%M:%S").ok())
                    .map(|dt| dt.date())
                    .unwrap_or_else(|| timestamp.date_naive()),
                timestamp,
                temperature_celsius: item.main.temp,
                pressure_hpa: item.main.pressure,
                humidity_percent: item.main.humidity,
                wind_speed_mps: item.wind.speed,
                wind_direction_deg: item.wind.deg.unwrap_or(0.0),
                cloud_coverage_percent: item.clouds.all,
                rain_3h_mm: item.rain.and_then(|r| r.three_hour),
            }
        })
        .collect();

    WeatherForecast {
        location_name: data.city.name,
        forecasts,
    }
}
