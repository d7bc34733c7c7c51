//! Time-of-day loading selection.
//!
//! If the shift start time falls inside a configured evening or night
//! window, an additional multiplier is applied on top of the
//! day-type-penalized rate. Windows must not overlap in configuration; if
//! they do, evening takes precedence.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::models::TimeOfDayLoadings;

/// The window a shift start fell into, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingKind {
    /// The evening window.
    Evening,
    /// The night window.
    Night,
}

/// The result of the time-of-day check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDayResult {
    /// The multiplier to apply (1 when no window matched).
    pub multiplier: Decimal,
    /// Which window matched, if any.
    pub window: Option<LoadingKind>,
}

/// Returns the time-of-day multiplier for a shift start time.
///
/// Evening is checked before night, so an overlap resolves in favour of
/// the evening loading.
pub fn time_of_day_multiplier(start: NaiveTime, loadings: &TimeOfDayLoadings) -> TimeOfDayResult {
    if let Some(evening) = &loadings.evening {
        if evening.contains(start) {
            return TimeOfDayResult {
                multiplier: evening.multiplier,
                window: Some(LoadingKind::Evening),
            };
        }
    }

    if let Some(night) = &loadings.night {
        if night.contains(start) {
            return TimeOfDayResult {
                multiplier: night.multiplier,
                window: Some(LoadingKind::Night),
            };
        }
    }

    TimeOfDayResult {
        multiplier: Decimal::ONE,
        window: None,
    }
}
