//! Conversation state machine
//!
//! Incoming updates are reduced to an [`Event`] and fed through
//! [`transition`], which is pure. The chatbot service executes the
//! resulting [`BotAction`] and stores the next state.

use std::collections::HashMap;
use std::sync::Mutex;

/// Where a chat currently is in the dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    /// Next free text is a place name to add
    AwaitingLocationName,
    /// A location picker is on screen
    SelectingLocation,
}

/// Slash commands the bot understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Forecast,
    Locations,
    AddLocation,
    Unknown(String),
}

impl BotCommand {
    /// Parse a message starting with `/`. Returns `None` for plain text.
    /// A `@botname` suffix on the command is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.trim().split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name).to_lowercase();

        Some(match name.as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "forecast" => Self::Forecast,
            "locations" => Self::Locations,
            "add_location" => Self::AddLocation,
            _ => Self::Unknown(name),
        })
    }
}

/// Inline keyboard buttons, encoded in `callback_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Restart,
    ShowForecast,
    ShowLocations,
    AddLocation,
    Help,
    /// Current weather card for the location at an index
    Location(usize),
    /// Bite forecast for the location at an index
    Forecast(usize),
    DeleteLocation,
    Remove(usize),
    CancelDelete,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        let indexed = |prefix: &str| -> Option<usize> { data.strip_prefix(prefix)?.parse().ok() };

        match data {
            "restart" => Some(Self::Restart),
            "show_forecast" => Some(Self::ShowForecast),
            "show_locations" => Some(Self::ShowLocations),
            "add_location" => Some(Self::AddLocation),
            "help" => Some(Self::Help),
            "delete_location" => Some(Self::DeleteLocation),
            "cancel_delete" => Some(Self::CancelDelete),
            _ => indexed("location_")
                .map(Self::Location)
                .or_else(|| indexed("forecast_").map(Self::Forecast))
                .or_else(|| indexed("remove_").map(Self::Remove)),
        }
    }

    pub fn callback_data(&self) -> String {
        match self {
            Self::Restart => "restart".to_string(),
            Self::ShowForecast => "show_forecast".to_string(),
            Self::ShowLocations => "show_locations".to_string(),
            Self::AddLocation => "add_location".to_string(),
            Self::Help => "help".to_string(),
            Self::Location(i) => format!("location_{}", i),
            Self::Forecast(i) => format!("forecast_{}", i),
            Self::DeleteLocation => "delete_location".to_string(),
            Self::Remove(i) => format!("remove_{}", i),
            Self::CancelDelete => "cancel_delete".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(BotCommand),
    Button(CallbackAction),
    Text(String),
}

impl Event {
    /// Classify a text message as a command or free text
    pub fn from_text(text: &str) -> Self {
        match BotCommand::parse(text) {
            Some(command) => Event::Command(command),
            None => Event::Text(text.trim().to_string()),
        }
    }
}

/// Side effect the chatbot performs for a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    Greet,
    ShowMainMenu,
    ShowHelp,
    ShowLocations,
    ChooseForecastLocation,
    PromptLocationName,
    AddLocation(String),
    ShowLocationWeather(usize),
    ShowBiteForecast(usize),
    ChooseLocationToDelete,
    RemoveLocation(usize),
    CancelDelete,
    /// Reply that navigation happens through the menu buttons
    MenuHint,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ConversationState,
    pub action: BotAction,
}

impl Transition {
    fn to(next: ConversationState, action: BotAction) -> Self {
        Self { next, action }
    }

    fn stay(state: ConversationState, action: BotAction) -> Self {
        Self {
            next: state,
            action,
        }
    }
}

/// Next state and action for an event.
///
/// `/start` restarts from any state. Other commands are only accepted when
/// idle. Buttons work in every state. Free text is only meaningful while a
/// location name is awaited.
pub fn transition(state: ConversationState, event: Event) -> Transition {
    use ConversationState::*;

    match event {
        Event::Command(BotCommand::Start) => Transition::to(Idle, BotAction::Greet),
        Event::Command(command) if state == Idle => match command {
            BotCommand::Help => Transition::to(Idle, BotAction::ShowHelp),
            BotCommand::Forecast => {
                Transition::to(SelectingLocation, BotAction::ChooseForecastLocation)
            }
            BotCommand::Locations => Transition::to(SelectingLocation, BotAction::ShowLocations),
            BotCommand::AddLocation => {
                Transition::to(AwaitingLocationName, BotAction::PromptLocationName)
            }
            BotCommand::Start | BotCommand::Unknown(_) => Transition::stay(Idle, BotAction::MenuHint),
        },
        Event::Command(_) => Transition::stay(state, BotAction::MenuHint),
        Event::Button(button) => match button {
            CallbackAction::Restart => Transition::to(Idle, BotAction::ShowMainMenu),
            CallbackAction::ShowForecast => {
                Transition::to(SelectingLocation, BotAction::ChooseForecastLocation)
            }
            CallbackAction::ShowLocations => {
                Transition::to(SelectingLocation, BotAction::ShowLocations)
            }
            CallbackAction::AddLocation => {
                Transition::to(AwaitingLocationName, BotAction::PromptLocationName)
            }
            CallbackAction::Help => Transition::to(Idle, BotAction::ShowHelp),
            CallbackAction::Location(i) => Transition::to(Idle, BotAction::ShowLocationWeather(i)),
            CallbackAction::Forecast(i) => Transition::to(Idle, BotAction::ShowBiteForecast(i)),
            CallbackAction::DeleteLocation => {
                Transition::to(SelectingLocation, BotAction::ChooseLocationToDelete)
            }
            CallbackAction::Remove(i) => Transition::to(Idle, BotAction::RemoveLocation(i)),
            CallbackAction::CancelDelete => Transition::to(Idle, BotAction::CancelDelete),
        },
        Event::Text(text) if state == AwaitingLocationName => {
            Transition::to(Idle, BotAction::AddLocation(text))
        }
        Event::Text(_) => Transition::stay(state, BotAction::Ignore),
    }
}

/// A dialogue is owned by one user within one chat
pub type ConversationKey = (i64, i64);

/// In-memory conversation state per chat member
#[derive(Default)]
pub struct ConversationStore {
    states: Mutex<HashMap<ConversationKey, ConversationState>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: ConversationKey) -> ConversationState {
        self.states
            .lock()
            .map(|s| s.get(&key).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn set(&self, key: ConversationKey, state: ConversationState) {
        let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        if state == ConversationState::Idle {
            states.remove(&key);
        } else {
            states.insert(key, state);
        }
    }
}
