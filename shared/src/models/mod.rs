//! Domain models for the bite forecast

mod bite;
mod forecast;
mod location;
mod lunar;
mod rating;
mod weather;
mod wind;

pub use bite::*;
pub use forecast::*;
pub use location::*;
pub use lunar::*;
pub use rating::*;
pub use weather::*;
pub use wind::*;
