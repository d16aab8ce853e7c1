//! Fishing Bite Forecast Bot - Backend Server
//!
//! Telegram bot and HTTP API that score how likely fish are to bite from
//! the weather forecast and the lunar phase.

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod models;
mod routes;
mod services;

pub use config::Config;

use external::{TelegramClient, WeatherClient};
use services::{
    ChatbotService, ConversationStore, ForecastService, LocationService, PgLocationStore,
    WeatherService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub chatbot: ChatbotService<PgLocationStore>,
    pub forecasts: ForecastService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bite_bot=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Fishing Bite Forecast Bot");
    tracing::info!("Environment: {}", config.environment);
    if config.telegram.webhook_secret.is_empty() {
        tracing::warn!("Telegram webhook secret not set; webhook requests are not verified");
    }

    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Migrations completed");

    // Wire collaborators
    let weather = WeatherService::new(WeatherClient::new(&config.weather)?);
    let forecasts = ForecastService::new(weather, config.forecast.days);
    let chatbot = ChatbotService::new(
        TelegramClient::new(&config.telegram)?,
        LocationService::new(PgLocationStore::new(db_pool.clone())),
        forecasts.clone(),
        Arc::new(ConversationStore::new()),
    );

    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        chatbot,
        forecasts,
    };

    let app = create_app(state);

    let addr: SocketAddr = config.server.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .route("/webhook/telegram", post(handlers::handle_telegram_webhook))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Fishing Bite Forecast API v1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    const SECRET: &str = "test-secret";

    fn test_config() -> Config {
        Config {
            environment: "test".to_string(),
            server: crate::config::ServerConfig::default(),
            database: crate::config::DatabaseConfig {
                url: "postgres://localhost/bite_test".to_string(),
                max_connections: 1,
                min_connections: 0,
            },
            telegram: crate::config::TelegramConfig {
                bot_token: "123:abc".to_string(),
                webhook_secret: SECRET.to_string(),
                api_base_url: "http://127.0.0.1:9".to_string(),
            },
            weather: crate::config::WeatherConfig {
                api_endpoint: "http://127.0.0.1:9".to_string(),
                api_key: "key".to_string(),
                units: "metric".to_string(),
                lang: "en".to_string(),
                timeout_secs: 1,
            },
            forecast: crate::config::ForecastConfig::default(),
        }
    }

    fn test_app() -> Router {
        let config = test_config();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .unwrap();
        let forecasts = ForecastService::new(
            WeatherService::new(WeatherClient::new(&config.weather).unwrap()),
            config.forecast.days,
        );
        let chatbot = ChatbotService::new(
            TelegramClient::new(&config.telegram).unwrap(),
            LocationService::new(PgLocationStore::new(db.clone())),
            forecasts.clone(),
            Arc::new(ConversationStore::new()),
        );
        create_app(AppState {
            db,
            config: Arc::new(config),
            chatbot,
            forecasts,
        })
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-telegram-bot-api-secret-token", SECRET)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_assess_endpoint() {
        let body = r#"{
            "weather": {
                "day_temperature_celsius": 20.0,
                "wind_speed_mps": 1.0,
                "wind_bearing_deg": 0.0,
                "cloud_cover_percent": 50.0,
                "pressure_hpa": 1015.0
            },
            "date": "2024-06-15"
        }"#;
        let response = tokio_test::assert_ok!(
            test_app().oneshot(json_post("/api/v1/bite/assess", body)).await
        );
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["assessment"]["probability"], 95.0);
        assert_eq!(json["lunar_phase"], "full_moon");
        assert_eq!(json["rating"], "excellent");
        assert_eq!(json["assessment"]["positive_factors"][1], "Light wind");
    }

    #[tokio::test]
    async fn test_assess_rejects_out_of_range_record() {
        let body = r#"{
            "weather": {
                "day_temperature_celsius": 20.0,
                "wind_speed_mps": -1.0,
                "wind_bearing_deg": 0.0,
                "cloud_cover_percent": 50.0,
                "pressure_hpa": 1015.0
            }
        }"#;
        let response = test_app()
            .oneshot(json_post("/api/v1/bite/assess", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["field"], "wind_speed_mps");
    }

    #[tokio::test]
    async fn test_forecast_rejects_bad_coordinates() {
        let request = Request::builder()
            .uri("/api/v1/forecast?latitude=95&longitude=10")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webhook_requires_secret() {
        let request = Request::builder()
            .method("POST")
            .uri("/webhook/telegram")
            .header("x-telegram-bot-api-secret-token", "wrong")
            .body(Body::from(r#"{"update_id": 1}"#))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_webhook_acknowledges_empty_update() {
        let response = test_app()
            .oneshot(json_post("/webhook/telegram", r#"{"update_id": 42}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_webhook_rejects_malformed_body() {
        let response = test_app()
            .oneshot(json_post("/webhook/telegram", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
