//! Shared types and models for the fishing bite forecast
//!
//! This crate holds the pure scoring core (lunar phase, wind direction, bite
//! probability, rating) and the domain models shared between the backend and
//! the WASM bindings. Nothing here performs I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
