//! External API integrations

pub mod telegram;
pub mod weather;

pub use telegram::TelegramClient;
pub use weather::WeatherClient;
