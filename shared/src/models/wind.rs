//! Compass labels for wind bearings

use serde::{Deserialize, Serialize};

/// Eight-point compass rose, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassDirection {
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::N,
        CompassDirection::NE,
        CompassDirection::E,
        CompassDirection::SE,
        CompassDirection::S,
        CompassDirection::SW,
        CompassDirection::W,
        CompassDirection::NW,
    ];

    /// Resolve a bearing in degrees. Any real input is accepted and wrapped
    /// modulo 360; half-sector ties round to even.
    pub fn from_degrees(degrees: f64) -> Self {
        let sector = (degrees.rem_euclid(360.0) / 45.0).round_ties_even() as i64;
        Self::ALL[sector.rem_euclid(8) as usize]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Compass label for a wind bearing
pub fn resolve_wind_direction(bearing_degrees: f64) -> CompassDirection {
    CompassDirection::from_degrees(bearing_degrees)
}
