//! Lunar phase approximation used as a fishing multiplier
//!
//! The cycle is a fixed 30-day approximation keyed on the calendar day of
//! month, not the synodic period.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of the approximated lunar cycle in days
pub const LUNAR_CYCLE_DAYS: u32 = 30;

/// Eight named lunar phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// Ascending upper bounds (exclusive) of each bucket within the cycle.
/// Days 28 and 29 wrap back to the new moon.
const PHASE_THRESHOLDS: [(u32, LunarPhase); 9] = [
    (2, LunarPhase::NewMoon),
    (7, LunarPhase::WaxingCrescent),
    (9, LunarPhase::FirstQuarter),
    (14, LunarPhase::WaxingGibbous),
    (16, LunarPhase::FullMoon),
    (21, LunarPhase::WaningGibbous),
    (23, LunarPhase::LastQuarter),
    (28, LunarPhase::WaningCrescent),
    (LUNAR_CYCLE_DAYS, LunarPhase::NewMoon),
];

impl LunarPhase {
    pub const ALL: [LunarPhase; 8] = [
        LunarPhase::NewMoon,
        LunarPhase::WaxingCrescent,
        LunarPhase::FirstQuarter,
        LunarPhase::WaxingGibbous,
        LunarPhase::FullMoon,
        LunarPhase::WaningGibbous,
        LunarPhase::LastQuarter,
        LunarPhase::WaningCrescent,
    ];

    /// Map a day within the 30-day cycle to its phase. Values past the
    /// cycle wrap around.
    pub fn from_day_in_cycle(day: u32) -> Self {
        let day = day % LUNAR_CYCLE_DAYS;
        PHASE_THRESHOLDS
            .iter()
            .find(|(upper, _)| day < *upper)
            .map(|(_, phase)| *phase)
            .unwrap_or(LunarPhase::NewMoon)
    }

    /// Position of the phase in the cycle, 0-7
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::NewMoon => 0,
            Self::WaxingCrescent => 1,
            Self::FirstQuarter => 2,
            Self::WaxingGibbous => 3,
            Self::FullMoon => 4,
            Self::WaningGibbous => 5,
            Self::LastQuarter => 6,
            Self::WaningCrescent => 7,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::NewMoon => "🌑",
            Self::WaxingCrescent => "🌒",
            Self::FirstQuarter => "🌓",
            Self::WaxingGibbous => "🌔",
            Self::FullMoon => "🌕",
            Self::WaningGibbous => "🌖",
            Self::LastQuarter => "🌗",
            Self::WaningCrescent => "🌘",
        }
    }

    /// Name followed by the moon glyph, e.g. "Full Moon 🌕"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name(), self.glyph())
    }

    /// Folklore multiplier applied to the combined weather score
    pub fn fishing_factor(&self) -> f64 {
        match self {
            Self::NewMoon => 0.70,
            Self::WaxingCrescent => 0.80,
            Self::FirstQuarter => 0.90,
            Self::WaxingGibbous => 0.85,
            Self::FullMoon => 1.00,
            Self::WaningGibbous => 0.85,
            Self::LastQuarter => 0.75,
            Self::WaningCrescent => 0.70,
        }
    }
}

impl std::fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.glyph())
    }
}

/// Lunar phase for a calendar date (`day_of_month % 30`)
pub fn compute_lunar_phase(date: NaiveDate) -> LunarPhase {
    LunarPhase::from_day_in_cycle(date.day() % LUNAR_CYCLE_DAYS)
}

/// Lunar phase for today's local date
pub fn current_lunar_phase() -> LunarPhase {
    compute_lunar_phase(Local::now().date_naive())
}
