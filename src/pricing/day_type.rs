//! Day-type detection and penalty multiplier selection.
//!
//! Exactly one day-type multiplier applies to a shift, chosen by priority
//! public holiday > Sunday > Saturday > weekday. Penalties never stack: a
//! public holiday that falls on a Sunday attracts only the public holiday
//! multiplier.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PenaltyRateTable, ShiftContext};

/// The day-type category of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// A gazetted public holiday. Overrides weekend penalties entirely.
    PublicHoliday,
    /// A Sunday that is not a public holiday.
    Sunday,
    /// A Saturday that is not a public holiday.
    Saturday,
    /// An ordinary Monday-to-Friday day.
    Weekday,
}

impl DayType {
    /// Returns the segment label used in pay breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PublicHoliday => "public holiday",
            Self::Sunday => "sunday penalty",
            Self::Saturday => "saturday penalty",
            Self::Weekday => "ordinary",
        }
    }
}

/// Determines the day type of a shift.
pub fn day_type(shift: &ShiftContext) -> DayType {
    if shift.public_holiday {
        return DayType::PublicHoliday;
    }
    match shift.day_of_week() {
        Weekday::Sun => DayType::Sunday,
        Weekday::Sat => DayType::Saturday,
        _ => DayType::Weekday,
    }
}

/// Returns the penalty multiplier for a day type. Weekdays are 100%.
pub fn day_type_multiplier(day_type: DayType, penalties: &PenaltyRateTable) -> Decimal {
    match day_type {
        DayType::PublicHoliday => penalties.public_holiday,
        DayType::Sunday => penalties.sunday,
        DayType::Saturday => penalties.saturday,
        DayType::Weekday => Decimal::ONE,
    }
}
