//! Telegram chatbot service
//!
//! Turns webhook updates into conversation events, runs them through the
//! state machine and performs the resulting action:
//! - main menu and help
//! - adding, listing and deleting fishing locations
//! - current weather card and the multi-day bite forecast

use std::sync::Arc;

use shared::{validate_location_name, NewFishingLocation};

use crate::error::{AppError, AppResult};
use crate::external::telegram::{
    InlineKeyboardButton, InlineKeyboardMarkup, OutgoingMessage, TelegramClient, Update,
};
use crate::services::conversation::{
    transition, BotAction, CallbackAction, ConversationState, ConversationStore, Event,
};
use crate::services::forecast::{
    escape_markdown, render_forecast, render_location_card, ForecastService,
};
use crate::services::locations::{LocationService, LocationStore, UserId};

const NO_LOCATIONS: &str =
    "You have no saved locations yet. Tap '➕ Add location' to add your fishing spots.";
const LOCATION_PROMPT: &str = "📍 Send the name of the town or village you fish near.\n\n\
     For example: Moscow, Saint Petersburg, Sochi";
const LOCATION_NOT_FOUND: &str =
    "❌ Couldn't find that place. Please check the name and try again.";
const WEATHER_UNAVAILABLE: &str =
    "⚠️ Weather data is unavailable right now. Please try again later.";
const HELP_TEXT: &str = "🤖 *Bot commands:*\n\n\
     🎣 */forecast* - get a bite forecast\n\
     📍 */locations* - list my locations\n\
     ➕ */add_location* - add a new location\n\
     ❓ */help* - show this help\n\
     🔄 Restart - restart the bot\n\n\
     *How does it work?*\n\
     1. Add your favourite fishing spots\n\
     2. Ask for a bite forecast\n\
     3. The bot analyses the weather and estimates the chance of a good bite\n\n\
     *Factors that affect the bite:*\n\
     • Atmospheric pressure\n\
     • Air temperature\n\
     • Wind strength\n\
     • Cloud cover\n\
     • Precipitation\n\
     • Moon phase";

/// Where a reply goes: a new message, or an edit of the message whose
/// button was pressed
#[derive(Debug, Clone)]
struct ReplyContext {
    chat_id: i64,
    user_id: UserId,
    first_name: String,
    edit_message_id: Option<i64>,
}

pub struct ChatbotService<S> {
    telegram: TelegramClient,
    locations: LocationService<S>,
    forecasts: ForecastService,
    conversations: Arc<ConversationStore>,
}

impl<S> Clone for ChatbotService<S> {
    fn clone(&self) -> Self {
        Self {
            telegram: self.telegram.clone(),
            locations: self.locations.clone(),
            forecasts: self.forecasts.clone(),
            conversations: Arc::clone(&self.conversations),
        }
    }
}

fn back_to_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![InlineKeyboardButton::new(
        "🔄 Back to main menu",
        CallbackAction::Restart.callback_data(),
    )])
}

/// Main menu keyboard
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::new("🎣 Bite forecast", CallbackAction::ShowForecast.callback_data()),
            InlineKeyboardButton::new("📍 My locations", CallbackAction::ShowLocations.callback_data()),
        ],
        vec![
            InlineKeyboardButton::new("➕ Add location", CallbackAction::AddLocation.callback_data()),
            InlineKeyboardButton::new("❓ Help", CallbackAction::Help.callback_data()),
        ],
        vec![InlineKeyboardButton::new(
            "🔄 Restart",
            CallbackAction::Restart.callback_data(),
        )],
    ])
}

impl<S: LocationStore> ChatbotService<S> {
    pub fn new(
        telegram: TelegramClient,
        locations: LocationService<S>,
        forecasts: ForecastService,
        conversations: Arc<ConversationStore>,
    ) -> Self {
        Self {
            telegram,
            locations,
            forecasts,
            conversations,
        }
    }

    /// Handle one webhook update
    pub async fn process_update(&self, update: Update) -> AppResult<()> {
        let (ctx, event) = if let Some(query) = update.callback_query {
            if let Err(e) = self.telegram.answer_callback_query(&query.id).await {
                tracing::warn!("Failed to answer callback query {}: {}", query.id, e);
            }
            let Some(action) = query.data.as_deref().and_then(CallbackAction::parse) else {
                tracing::warn!("Unknown callback data: {:?}", query.data);
                return Ok(());
            };
            let ctx = ReplyContext {
                chat_id: query.message.as_ref().map_or(query.from.id, |m| m.chat.id),
                user_id: query.from.id,
                first_name: query.from.first_name.clone(),
                edit_message_id: query.message.as_ref().map(|m| m.message_id),
            };
            (ctx, Event::Button(action))
        } else if let Some(message) = update.message {
            let Some(text) = message.text.as_deref() else {
                tracing::debug!("Skipping non-text message {}", message.message_id);
                return Ok(());
            };
            let ctx = ReplyContext {
                chat_id: message.chat.id,
                user_id: message.from.as_ref().map_or(message.chat.id, |u| u.id),
                first_name: message
                    .from
                    .as_ref()
                    .map(|u| u.first_name.clone())
                    .unwrap_or_default(),
                edit_message_id: None,
            };
            (ctx, Event::from_text(text))
        } else {
            tracing::debug!("Skipping update {} with no message", update.update_id);
            return Ok(());
        };

        let key = (ctx.chat_id, ctx.user_id);
        let state = self.conversations.get(key);
        let step = transition(state, event);
        tracing::debug!(
            "Chat {} user {}: {:?} -> {:?} via {:?}",
            ctx.chat_id,
            ctx.user_id,
            state,
            step.next,
            step.action
        );

        let next = self.execute(&ctx, step.action).await?.unwrap_or(step.next);
        self.conversations.set(key, next);
        Ok(())
    }

    /// Perform an action. Returns a state that overrides the planned one
    /// when the outcome changes where the dialogue goes.
    async fn execute(
        &self,
        ctx: &ReplyContext,
        action: BotAction,
    ) -> AppResult<Option<ConversationState>> {
        match action {
            BotAction::Greet => {
                let text = format!(
                    "Hi, {}! 👋\n\nI'm a fish bite forecasting bot. I analyse the weather \
                     and tell you when it's best to go fishing.\n\nChoose an action from the menu below:",
                    ctx.first_name
                );
                self.send(ctx, OutgoingMessage::text(text).with_keyboard(main_menu()))
                    .await?;
            }
            BotAction::ShowMainMenu => {
                let text = "Bot restarted!\n\nChoose an action from the menu below:";
                self.respond(ctx, OutgoingMessage::text(text).with_keyboard(main_menu()))
                    .await?;
            }
            BotAction::ShowHelp => {
                self.respond(
                    ctx,
                    OutgoingMessage::text(HELP_TEXT)
                        .markdown()
                        .with_keyboard(back_to_menu()),
                )
                .await?;
            }
            BotAction::ShowLocations => return self.show_locations(ctx).await,
            BotAction::ChooseForecastLocation => return self.choose_forecast_location(ctx).await,
            BotAction::PromptLocationName => {
                let cancel = InlineKeyboardMarkup::single_column(vec![InlineKeyboardButton::new(
                    "🔄 Cancel",
                    CallbackAction::Restart.callback_data(),
                )]);
                self.respond(ctx, OutgoingMessage::text(LOCATION_PROMPT).with_keyboard(cancel))
                    .await?;
            }
            BotAction::AddLocation(name) => return self.add_location(ctx, &name).await,
            BotAction::ShowLocationWeather(index) => self.show_location_weather(ctx, index).await?,
            BotAction::ShowBiteForecast(index) => self.show_bite_forecast(ctx, index).await?,
            BotAction::ChooseLocationToDelete => return self.choose_location_to_delete(ctx).await,
            BotAction::RemoveLocation(index) => {
                let text = match self.locations.remove(ctx.user_id, index).await {
                    Ok(removed) => format!("Location {} removed.", removed.name),
                    Err(AppError::NotFound(_)) => "Error: location not found.".to_string(),
                    Err(e) => return Err(e),
                };
                self.respond(ctx, OutgoingMessage::text(text)).await?;
            }
            BotAction::CancelDelete => {
                self.respond(ctx, OutgoingMessage::text("Deletion cancelled."))
                    .await?;
            }
            BotAction::MenuHint => {
                self.send(
                    ctx,
                    OutgoingMessage::text("Please use the menu buttons to navigate.")
                        .with_keyboard(back_to_menu()),
                )
                .await?;
            }
            BotAction::Ignore => {}
        }
        Ok(None)
    }

    async fn show_locations(&self, ctx: &ReplyContext) -> AppResult<Option<ConversationState>> {
        let locations = self.locations.list(ctx.user_id).await?;
        if locations.is_empty() {
            self.respond(ctx, OutgoingMessage::text(NO_LOCATIONS)).await?;
            return Ok(Some(ConversationState::Idle));
        }

        let mut text = String::from("📍 *My fishing locations:*\n\n");
        let mut buttons = Vec::with_capacity(locations.len() + 2);
        for (i, location) in locations.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, escape_markdown(&location.title())));
            buttons.push(InlineKeyboardButton::new(
                location.title(),
                CallbackAction::Location(i).callback_data(),
            ));
        }
        buttons.push(InlineKeyboardButton::new(
            "❌ Delete location",
            CallbackAction::DeleteLocation.callback_data(),
        ));
        buttons.push(InlineKeyboardButton::new(
            "🔄 Back to main menu",
            CallbackAction::Restart.callback_data(),
        ));

        self.respond(
            ctx,
            OutgoingMessage::text(text)
                .markdown()
                .with_keyboard(InlineKeyboardMarkup::single_column(buttons)),
        )
        .await?;
        Ok(None)
    }

    async fn choose_forecast_location(
        &self,
        ctx: &ReplyContext,
    ) -> AppResult<Option<ConversationState>> {
        let locations = self.locations.list(ctx.user_id).await?;
        if locations.is_empty() {
            self.respond(ctx, OutgoingMessage::text(NO_LOCATIONS)).await?;
            return Ok(Some(ConversationState::Idle));
        }

        let mut buttons: Vec<_> = locations
            .iter()
            .enumerate()
            .map(|(i, l)| {
                InlineKeyboardButton::new(l.title(), CallbackAction::Forecast(i).callback_data())
            })
            .collect();
        buttons.push(InlineKeyboardButton::new(
            "🔄 Back to main menu",
            CallbackAction::Restart.callback_data(),
        ));

        self.respond(
            ctx,
            OutgoingMessage::text("🎣 Choose a location for the bite forecast:")
                .with_keyboard(InlineKeyboardMarkup::single_column(buttons)),
        )
        .await?;
        Ok(None)
    }

    async fn add_location(
        &self,
        ctx: &ReplyContext,
        name: &str,
    ) -> AppResult<Option<ConversationState>> {
        if let Err(reason) = validate_location_name(name) {
            self.send(ctx, OutgoingMessage::text(format!("❌ {}. {}", reason, LOCATION_PROMPT)))
                .await?;
            return Ok(Some(ConversationState::AwaitingLocationName));
        }

        let place = match self.forecasts.weather().find_location(name).await {
            Ok(place) => place,
            Err(AppError::LocationNotFound(_)) => {
                self.send(ctx, OutgoingMessage::text(LOCATION_NOT_FOUND)).await?;
                return Ok(None);
            }
            Err(e) => {
                tracing::error!("Error adding location '{}': {}", name, e);
                self.send(ctx, OutgoingMessage::text(WEATHER_UNAVAILABLE)).await?;
                return Ok(None);
            }
        };

        let input = NewFishingLocation {
            name: place.name,
            country: place.country,
            latitude: place.latitude,
            longitude: place.longitude,
        };
        let text = match self.locations.add(ctx.user_id, input).await {
            Ok(location) => format!(
                "✅ Location added!\n\n📍 *{}*\nCoordinates: {}\n\n\
                 You can now get a bite forecast for this location.",
                escape_markdown(&location.title()),
                location.coordinates
            ),
            Err(AppError::DuplicateEntry(_)) => {
                format!("Location {} is already in your list!", escape_markdown(name.trim()))
            }
            Err(AppError::ValidationError(msg)) => {
                tracing::warn!("Geocoded place rejected: {}", msg);
                LOCATION_NOT_FOUND.to_string()
            }
            Err(e) => return Err(e),
        };
        self.send(ctx, OutgoingMessage::text(text).markdown()).await?;
        Ok(None)
    }

    async fn show_location_weather(&self, ctx: &ReplyContext, index: usize) -> AppResult<()> {
        let location = match self.locations.get(ctx.user_id, index).await {
            Ok(location) => location,
            Err(AppError::NotFound(_)) => {
                return self
                    .send(ctx, OutgoingMessage::text("Error: location not found."))
                    .await
            }
            Err(e) => return Err(e),
        };

        let message = match self
            .forecasts
            .weather()
            .current_conditions(location.coordinates)
            .await
        {
            Ok(weather) => OutgoingMessage::text(render_location_card(&location, &weather)).markdown(),
            Err(e) => {
                tracing::error!("Weather for {} failed: {}", location.title(), e);
                OutgoingMessage::text(WEATHER_UNAVAILABLE)
            }
        };
        self.send(ctx, message).await
    }

    async fn show_bite_forecast(&self, ctx: &ReplyContext, index: usize) -> AppResult<()> {
        let location = match self.locations.get(ctx.user_id, index).await {
            Ok(location) => location,
            Err(AppError::NotFound(_)) => {
                return self
                    .send(ctx, OutgoingMessage::text("Error: location not found."))
                    .await
            }
            Err(e) => return Err(e),
        };

        self.send(
            ctx,
            OutgoingMessage::text(format!(
                "🔍 Analysing weather conditions for {}...",
                location.name
            )),
        )
        .await?;

        let message = match self.forecasts.forecast_for(location.coordinates).await {
            Ok(forecast) => {
                OutgoingMessage::text(render_forecast(&location.name, &forecast)).markdown()
            }
            Err(e) => {
                tracing::error!("Forecast for {} failed: {}", location.title(), e);
                OutgoingMessage::text(WEATHER_UNAVAILABLE)
            }
        };
        self.send(ctx, message).await
    }

    async fn choose_location_to_delete(
        &self,
        ctx: &ReplyContext,
    ) -> AppResult<Option<ConversationState>> {
        let locations = self.locations.list(ctx.user_id).await?;
        if locations.is_empty() {
            self.send(ctx, OutgoingMessage::text("You have no saved locations."))
                .await?;
            return Ok(Some(ConversationState::Idle));
        }

        let mut buttons: Vec<_> = locations
            .iter()
            .enumerate()
            .map(|(i, l)| {
                InlineKeyboardButton::new(
                    format!("Delete: {}", l.name),
                    CallbackAction::Remove(i).callback_data(),
                )
            })
            .collect();
        buttons.push(InlineKeyboardButton::new(
            "Cancel",
            CallbackAction::CancelDelete.callback_data(),
        ));

        self.respond(
            ctx,
            OutgoingMessage::text("Choose a location to delete:")
                .with_keyboard(InlineKeyboardMarkup::single_column(buttons)),
        )
        .await?;
        Ok(None)
    }

    async fn send(&self, ctx: &ReplyContext, message: OutgoingMessage) -> AppResult<()> {
        self.telegram.send_message(ctx.chat_id, &message).await
    }

    /// Edit the message whose button was pressed, or send a new one
    async fn respond(&self, ctx: &ReplyContext, message: OutgoingMessage) -> AppResult<()> {
        match ctx.edit_message_id {
            Some(message_id) => {
                self.telegram
                    .edit_message_text(ctx.chat_id, message_id, &message)
                    .await
            }
            None => self.send(ctx, message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    use crate::external::weather::WeatherClient;
    use crate::services::conversation::ConversationState::*;
    use crate::services::locations::MemoryLocationStore;
    use crate::services::weather::WeatherService;

    #[test]
    fn test_main_menu_layout() {
        let menu = main_menu();
        let data: Vec<Vec<&str>> = menu
            .inline_keyboard
            .iter()
            .map(|row| row.iter().map(|b| b.callback_data.as_str()).collect())
            .collect();
        assert_eq!(
            data,
            vec![
                vec!["show_forecast", "show_locations"],
                vec!["add_location", "help"],
                vec!["restart"],
            ]
        );
    }

    #[test]
    fn test_menu_buttons_parse_back() {
        for row in main_menu().inline_keyboard {
            for button in row {
                assert!(CallbackAction::parse(&button.callback_data).is_some());
            }
        }
    }

    #[test]
    fn test_help_text_has_no_escapes_inside_bold() {
        // Markdown escapes are printed literally inside an entity
        assert!(HELP_TEXT.contains("*/add_location*"));
        assert!(!HELP_TEXT.contains('\\'));
    }

    // ------------------------------------------------------------------------
    // Update handling against a local Bot API / OpenWeatherMap stand-in
    // ------------------------------------------------------------------------

    type Sent = Arc<Mutex<Vec<(String, Value)>>>;

    async fn bot_method(
        State(sent): State<Sent>,
        Path((_token, method)): Path<(String, String)>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        sent.lock().unwrap().push((method, body));
        Json(json!({"ok": true, "result": true}))
    }

    async fn owm_weather(
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        let name = params.get("q").cloned().unwrap_or_default();
        if name == "Atlantis" {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(Json(json!({
            "coord": {"lon": 39.73, "lat": 43.6},
            "main": {"temp": 21.0, "feels_like": 20.5, "pressure": 1016, "humidity": 60},
            "wind": {"speed": 2.0, "deg": 250},
            "clouds": {"all": 20},
            "dt": 1718370000,
            "sys": {"country": "RU"},
            "name": name
        })))
    }

    async fn test_bot() -> (ChatbotService<MemoryLocationStore>, Sent) {
        let sent: Sent = Arc::default();
        let app = Router::new()
            .route("/weather", get(owm_weather))
            .route("/:token/:method", post(bot_method))
            .with_state(sent.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let weather = WeatherService::new(WeatherClient::with_base_url("key".to_string(), base.clone()));
        let bot = ChatbotService::new(
            TelegramClient::with_base_url("123:abc".to_string(), base),
            LocationService::new(MemoryLocationStore::new()),
            ForecastService::new(weather, 3),
            Arc::new(ConversationStore::new()),
        );
        (bot, sent)
    }

    fn text_update(chat_id: i64, user_id: i64, text: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "from": {"id": user_id, "is_bot": false, "first_name": "Alex"},
                "chat": {"id": chat_id, "type": if chat_id < 0 { "group" } else { "private" }},
                "text": text
            }
        }))
        .unwrap()
    }

    fn button_update(user_id: i64, data: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": 2,
            "callback_query": {
                "id": "cbq",
                "from": {"id": user_id, "is_bot": false, "first_name": "Alex"},
                "message": {"message_id": 11, "chat": {"id": user_id, "type": "private"}},
                "data": data
            }
        }))
        .unwrap()
    }

    /// Text of the last sendMessage / editMessageText call
    fn last_reply(sent: &Sent) -> String {
        sent.lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(method, _)| method != "answerCallbackQuery")
            .and_then(|(_, body)| body["text"].as_str().map(str::to_string))
            .unwrap_or_default()
    }

    async fn names(bot: &ChatbotService<MemoryLocationStore>, user_id: i64) -> Vec<String> {
        bot.locations
            .list(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect()
    }

    #[tokio::test]
    async fn test_add_location_flow_and_duplicate() {
        let (bot, sent) = test_bot().await;

        bot.process_update(text_update(5, 5, "/add_location")).await.unwrap();
        assert_eq!(bot.conversations.get((5, 5)), AwaitingLocationName);

        bot.process_update(text_update(5, 5, "Sochi")).await.unwrap();
        assert_eq!(bot.conversations.get((5, 5)), Idle);
        assert_eq!(names(&bot, 5).await, vec!["Sochi"]);
        assert!(last_reply(&sent).starts_with("✅ Location added!"));

        bot.process_update(text_update(5, 5, "/add_location")).await.unwrap();
        bot.process_update(text_update(5, 5, "Sochi")).await.unwrap();
        assert_eq!(names(&bot, 5).await, vec!["Sochi"]);
        assert_eq!(last_reply(&sent), "Location Sochi is already in your list!");
    }

    #[tokio::test]
    async fn test_group_members_have_separate_dialogues() {
        let (bot, _sent) = test_bot().await;

        bot.process_update(text_update(-100, 1, "/add_location")).await.unwrap();
        bot.process_update(text_update(-100, 2, "Sochi")).await.unwrap();

        assert!(names(&bot, 2).await.is_empty());
        assert_eq!(bot.conversations.get((-100, 1)), AwaitingLocationName);
        assert_eq!(bot.conversations.get((-100, 2)), Idle);

        bot.process_update(text_update(-100, 1, "Sochi")).await.unwrap();
        assert_eq!(names(&bot, 1).await, vec!["Sochi"]);
    }

    #[tokio::test]
    async fn test_invalid_name_keeps_waiting_for_a_name() {
        let (bot, sent) = test_bot().await;

        bot.process_update(text_update(5, 5, "/add_location")).await.unwrap();
        bot.process_update(text_update(5, 5, &"x".repeat(101))).await.unwrap();

        assert_eq!(bot.conversations.get((5, 5)), AwaitingLocationName);
        assert!(last_reply(&sent).starts_with("❌ "));
        assert!(names(&bot, 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_place_is_reported() {
        let (bot, sent) = test_bot().await;

        bot.process_update(text_update(5, 5, "/add_location")).await.unwrap();
        bot.process_update(text_update(5, 5, "Atlantis")).await.unwrap();

        assert_eq!(bot.conversations.get((5, 5)), Idle);
        assert_eq!(last_reply(&sent), LOCATION_NOT_FOUND);
        assert!(names(&bot, 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_pickers_fall_back_to_idle_without_locations() {
        let (bot, sent) = test_bot().await;

        bot.process_update(button_update(5, "show_forecast")).await.unwrap();
        assert_eq!(bot.conversations.get((5, 5)), Idle);
        assert_eq!(last_reply(&sent), NO_LOCATIONS);

        bot.process_update(text_update(5, 5, "/locations")).await.unwrap();
        assert_eq!(bot.conversations.get((5, 5)), Idle);

        // button presses edit the message they came from
        let methods: Vec<String> = sent.lock().unwrap().iter().map(|(m, _)| m.clone()).collect();
        assert_eq!(
            methods,
            vec!["answerCallbackQuery", "editMessageText", "sendMessage"]
        );
    }

    #[tokio::test]
    async fn test_remove_by_index_flow() {
        let (bot, sent) = test_bot().await;
        for name in ["Moscow", "Sochi"] {
            bot.process_update(text_update(5, 5, "/add_location")).await.unwrap();
            bot.process_update(text_update(5, 5, name)).await.unwrap();
        }

        bot.process_update(button_update(5, "delete_location")).await.unwrap();
        assert_eq!(bot.conversations.get((5, 5)), SelectingLocation);

        bot.process_update(button_update(5, "remove_0")).await.unwrap();
        assert_eq!(bot.conversations.get((5, 5)), Idle);
        assert_eq!(last_reply(&sent), "Location Moscow removed.");
        assert_eq!(names(&bot, 5).await, vec!["Sochi"]);

        bot.process_update(button_update(5, "remove_5")).await.unwrap();
        assert_eq!(last_reply(&sent), "Error: location not found.");
        assert_eq!(names(&bot, 5).await, vec!["Sochi"]);
    }
}
