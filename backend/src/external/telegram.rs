//! Telegram Bot API client and update types
//!
//! Only the subset the bot uses: text messages, inline keyboards and
//! callback queries.
//! See: https://core.telegram.org/bots/api

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::TelegramConfig;
use crate::error::{AppError, AppResult};

/// Incoming update delivered to the webhook
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: Option<String>,
}

/// Button press on an inline keyboard
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Message the keyboard was attached to; absent for very old messages
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// One button per row
    pub fn single_column(buttons: Vec<InlineKeyboardButton>) -> Self {
        Self::new(buttons.into_iter().map(|b| vec![b]).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
}

/// Text plus optional formatting and keyboard, used for both new and edited
/// messages
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
        }
    }

    pub fn markdown(mut self) -> Self {
        self.parse_mode = Some(ParseMode::Markdown);
        self
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct EditMessageTextRequest<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQueryRequest<'a> {
    callback_query_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    bot_token: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Configuration(format!("Telegram HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
        })
    }

    /// Create a client against a custom Bot API server
    #[cfg(test)]
    pub fn with_base_url(bot_token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            bot_token,
        }
    }

    pub async fn send_message(&self, chat_id: i64, message: &OutgoingMessage) -> AppResult<()> {
        self.call(
            "sendMessage",
            &SendMessageRequest {
                chat_id,
                text: &message.text,
                parse_mode: message.parse_mode,
                reply_markup: message.keyboard.as_ref(),
            },
        )
        .await
    }

    /// Replace the text (and keyboard) of a message the bot sent earlier.
    /// A message without a keyboard removes the existing one.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        message: &OutgoingMessage,
    ) -> AppResult<()> {
        self.call(
            "editMessageText",
            &EditMessageTextRequest {
                chat_id,
                message_id,
                text: &message.text,
                parse_mode: message.parse_mode,
                reply_markup: message.keyboard.as_ref(),
            },
        )
        .await
    }

    /// Stop the loading indicator on the pressed button
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> AppResult<()> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQueryRequest { callback_query_id },
        )
        .await
    }

    async fn call<T: Serialize>(&self, method: &str, body: &T) -> AppResult<()> {
        let url = format!("{}/bot{}/{}", self.base_url, self.bot_token, method);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                AppError::TelegramApiError(format!("{} request failed: {}", method, e.without_url()))
            })?;

        let status = response.status();
        let api: ApiResponse = response
            .json()
            .await
            .map_err(|e| {
                AppError::TelegramApiError(format!("{} bad response: {}", method, e.without_url()))
            })?;

        if !api.ok {
            return Err(AppError::TelegramApiError(format!(
                "{} failed ({}): {}",
                method,
                status,
                api.description.unwrap_or_default()
            )));
        }

        tracing::debug!("Telegram {} ok", method);
        Ok(())
    }
}
