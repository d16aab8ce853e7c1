//! HTTP handler for the Telegram bot webhook

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;

use crate::external::telegram::Update;
use crate::AppState;

const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
}

impl WebhookResponse {
    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle Telegram updates
/// POST /webhook/telegram
///
/// Processing failures are logged and still acknowledged with 200 so
/// Telegram does not redeliver the update.
pub async fn handle_telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, (StatusCode, Json<WebhookResponse>)> {
    if let Err(e) = verify_secret_token(&headers, &state.config.telegram.webhook_secret) {
        tracing::warn!("Telegram webhook verification failed: {}", e);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(WebhookResponse::new(false, "Invalid secret token")),
        ));
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(u) => u,
        Err(e) => {
            tracing::error!("Failed to parse Telegram update: {}", e);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse::new(
                    false,
                    format!("Invalid request body: {}", e),
                )),
            ));
        }
    };

    let update_id = update.update_id;
    if let Err(e) = state.chatbot.process_update(update).await {
        tracing::error!("Failed to process Telegram update {}: {}", update_id, e);
        return Ok(Json(WebhookResponse::new(
            false,
            format!("Processing error: {}", e),
        )));
    }

    Ok(Json(WebhookResponse::new(true, "Update processed")))
}

/// Compare the secret token header with the configured one. An empty
/// configured secret disables the check.
fn verify_secret_token(headers: &HeaderMap, expected: &str) -> Result<(), &'static str> {
    if expected.is_empty() {
        return Ok(());
    }

    let token = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or("Missing secret token header")?;

    if token != expected {
        return Err("Secret token mismatch");
    }
    Ok(())
}
