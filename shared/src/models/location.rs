//! Fishing location models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::GpsCoordinates;

/// A place a user fishes at, resolved from a place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishingLocation {
    pub id: Uuid,
    pub name: String,
    /// ISO 3166 country code as reported by the weather provider
    pub country: String,
    pub coordinates: GpsCoordinates,
    pub added_at: DateTime<Utc>,
}

impl FishingLocation {
    /// Two locations are the same place when name and country match
    pub fn is_same_place(&self, name: &str, country: &str) -> bool {
        self.name == name && self.country == country
    }

    /// "Name, CC"
    pub fn title(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Geocoded location awaiting storage
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewFishingLocation {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 3))]
    pub country: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl NewFishingLocation {
    pub fn into_location(self) -> FishingLocation {
        FishingLocation {
            id: Uuid::new_v4(),
            coordinates: GpsCoordinates::from_f64(self.latitude, self.longitude),
            name: self.name,
            country: self.country,
            added_at: Utc::now(),
        }
    }
}
