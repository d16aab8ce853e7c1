//! Business logic services for the bite forecast bot

pub mod chatbot;
pub mod conversation;
pub mod forecast;
pub mod locations;
pub mod weather;

pub use chatbot::ChatbotService;
pub use conversation::ConversationStore;
pub use forecast::ForecastService;
pub use locations::{LocationService, PgLocationStore};
pub use weather::WeatherService;
