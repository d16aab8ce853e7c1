//! Domain models
//!
//! Re-exports the scoring core models from the shared crate

pub use shared::models::*;
pub use shared::types::GpsCoordinates;
