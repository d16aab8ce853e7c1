//! Route definitions for the bite forecast API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/bite/assess", post(handlers::assess_bite))
        .route("/forecast", get(handlers::get_forecast))
}
