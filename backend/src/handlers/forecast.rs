//! HTTP handlers for bite scoring and forecasts

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::validation::{validate_coordinates, validate_daily_weather};

use crate::error::{AppError, AppResult};
use crate::models::{
    assess_bite_probability, compute_lunar_phase, resolve_wind_direction, BiteAssessment,
    BiteForecast, BiteRating, CompassDirection, DailyWeather, GpsCoordinates, LunarPhase,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub weather: DailyWeather,
    /// Date used for the lunar phase; today when absent
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AssessResponse {
    pub date: NaiveDate,
    pub lunar_phase: LunarPhase,
    pub lunar_phase_name: String,
    pub wind_direction: CompassDirection,
    pub assessment: BiteAssessment,
    pub rating: BiteRating,
    pub rating_label: String,
}

/// Score a single daily weather record
/// POST /api/v1/bite/assess
pub async fn assess_bite(Json(request): Json<AssessRequest>) -> AppResult<Json<AssessResponse>> {
    validate_daily_weather(&request.weather)?;

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    let moon = compute_lunar_phase(date);
    let assessment = assess_bite_probability(&request.weather, moon);
    let rating = BiteRating::from_probability(assessment.probability);

    Ok(Json(AssessResponse {
        date,
        lunar_phase: moon,
        lunar_phase_name: moon.display_name(),
        wind_direction: resolve_wind_direction(request.weather.wind_bearing_deg),
        assessment,
        rating,
        rating_label: rating.to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Multi-day bite forecast for coordinates
/// GET /api/v1/forecast?latitude=..&longitude=..
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<BiteForecast>> {
    let coords = GpsCoordinates::new(query.latitude, query.longitude);
    validate_coordinates(coords.latitude_f64(), coords.longitude_f64())
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let forecast = state.forecasts.forecast_for(coords).await?;
    Ok(Json(forecast))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: Option<NaiveDate>) -> AssessRequest {
        AssessRequest {
            weather: DailyWeather {
                day_temperature_celsius: 20.0,
                wind_speed_mps: 2.0,
                wind_bearing_deg: 350.0,
                cloud_cover_percent: 50.0,
                pressure_hpa: 1015.0,
                precipitation_mm: None,
                night_temperature_celsius: None,
                humidity_percent: None,
            },
            date,
        }
    }

    #[tokio::test]
    async fn test_assess_uses_requested_date_for_moon() {
        // 15th of the month is day 15 of the cycle
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let Json(response) = assess_bite(Json(request(Some(date)))).await.unwrap();

        assert_eq!(response.lunar_phase, LunarPhase::FullMoon);
        assert_eq!(response.wind_direction, CompassDirection::N);
        assert_eq!(response.assessment.probability, 90.0);
        assert_eq!(response.rating, BiteRating::Excellent);
        assert_eq!(response.rating_label, "🔥🔥🔥🔥🔥 Excellent bite");
    }

    #[tokio::test]
    async fn test_assess_rejects_invalid_record() {
        let mut req = request(None);
        req.weather.cloud_cover_percent = 140.0;
        let err = assess_bite(Json(req)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
