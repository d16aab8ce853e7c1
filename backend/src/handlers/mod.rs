//! HTTP request handlers

pub mod forecast;
pub mod health;
pub mod telegram;

pub use forecast::*;
pub use health::*;
pub use telegram::*;
