//! Bite forecast assembly and message rendering

use chrono::{Local, NaiveDate};
use shared::{
    build_forecast, compute_lunar_phase, resolve_wind_direction, BiteForecast, DailyWeather,
    DayOutlook, FishingLocation, GpsCoordinates,
};

use crate::error::AppResult;
use crate::external::weather::CurrentWeather;
use crate::services::weather::WeatherService;

#[derive(Clone)]
pub struct ForecastService {
    weather: WeatherService,
    days: usize,
}

impl ForecastService {
    pub fn new(weather: WeatherService, days: usize) -> Self {
        Self { weather, days }
    }

    /// Score the next `days` days at a place, starting today. The lunar
    /// phase is taken once, from the same date the report starts on.
    pub async fn forecast_for(&self, coords: GpsCoordinates) -> AppResult<BiteForecast> {
        let records = self.weather.daily_records(coords, self.days).await?;
        Ok(self.forecast_from(Local::now().date_naive(), &records))
    }

    /// Build the report for `today` from already fetched records
    pub fn forecast_from(&self, today: NaiveDate, records: &[DailyWeather]) -> BiteForecast {
        let moon = compute_lunar_phase(today);
        let forecast = build_forecast(today, records, moon);

        tracing::info!(
            "Forecast from {}: {} days, moon {:?}, best {:?}",
            today,
            forecast.days.len(),
            moon,
            forecast.best_day().map(|d| d.assessment.probability)
        );
        forecast
    }

    pub fn weather(&self) -> &WeatherService {
        &self.weather
    }
}

/// Escape characters that legacy Telegram Markdown treats as markup
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn render_day(out: &mut String, day: &DayOutlook) {
    let w = &day.weather;
    out.push_str(&format!("📅 *{}*\n", format_date(day.date)));
    match w.night_temperature_celsius {
        Some(night) => out.push_str(&format!(
            "🌡 Temperature: {:.1}°C (night {:.1}°C)\n",
            w.day_temperature_celsius, night
        )),
        None => out.push_str(&format!("🌡 Temperature: {:.1}°C\n", w.day_temperature_celsius)),
    }
    out.push_str(&format!("💨 Wind: {:.1} m/s, {}\n", w.wind_speed_mps, day.wind_direction));
    out.push_str(&format!("☁️ Clouds: {:.0}%\n", w.cloud_cover_percent));
    if let Some(humidity) = w.humidity_percent {
        out.push_str(&format!("💧 Humidity: {:.0}%\n", humidity));
    }
    out.push_str(&format!("📊 Pressure: {:.0} hPa\n", w.pressure_hpa));
    out.push_str(&format!("🌧 Precipitation: {:.1} mm\n", w.rain_mm().unwrap_or(0.0)));
    out.push_str(&format!(
        "🎣 Bite: {} ({:.0}%)\n",
        day.rating, day.assessment.probability
    ));

    out.push_str("👍 Favorable factors:\n");
    for factor in &day.assessment.positive_factors {
        out.push_str(&format!("  • {}\n", factor));
    }
    out.push_str("👎 Unfavorable factors:\n");
    for factor in &day.assessment.negative_factors {
        out.push_str(&format!("  • {}\n", factor));
    }
    out.push('\n');
}

/// Markdown report for the chat
pub fn render_forecast(location_name: &str, forecast: &BiteForecast) -> String {
    let mut out = format!("🎣 *Bite forecast for {}*\n\n", escape_markdown(location_name));
    out.push_str(&format!("🌙 Moon phase: {}\n\n", forecast.lunar_phase));

    for day in &forecast.days {
        render_day(&mut out, day);
    }

    if let Some(advice) = &forecast.advice {
        out.push_str("*Fishing recommendations:*\n");
        out.push_str(&format!(
            "Best day: {} ({:.0}%)\n",
            format_date(advice.best_date),
            advice.best_probability
        ));
        for tip in advice.tips {
            out.push_str(&format!("• {}\n", tip));
        }
    }
    out
}

/// Current conditions card for a saved location
pub fn render_location_card(location: &FishingLocation, weather: &CurrentWeather) -> String {
    let c = &weather.conditions;
    let mut out = format!("📍 *{}*\n\n", escape_markdown(&location.title()));
    out.push_str("🌤 *Current weather:*\n");
    out.push_str(&format!("Temperature: {:.1}°C\n", c.temperature_celsius));
    out.push_str(&format!("Feels like: {:.1}°C\n", c.feels_like_celsius));
    out.push_str(&format!("Pressure: {:.0} hPa\n", c.pressure_hpa));
    out.push_str(&format!("Humidity: {:.0}%\n", c.humidity_percent));
    out.push_str(&format!(
        "Wind: {:.1} m/s, {}\n",
        c.wind_speed_mps,
        resolve_wind_direction(c.wind_bearing_deg)
    ));
    out.push_str(&format!("Clouds: {:.0}%\n", c.cloud_cover_percent));
    out
}
