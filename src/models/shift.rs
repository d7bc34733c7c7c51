//! Shift context model.
//!
//! A [`ShiftContext`] carries everything the pricing engine needs to know
//! about one shift/worker pairing. It is constructed per calculation request
//! and never persisted by this engine.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The basis a worker is employed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentBasis {
    /// Permanent (full-time or part-time) employment with leave entitlements.
    Permanent,
    /// Casual employment; attracts casual loading in lieu of leave.
    Casual,
}

/// The facts of a single shift needed to price it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftContext {
    /// The date the shift starts on.
    pub date: NaiveDate,
    /// Shift start time.
    pub start_time: NaiveTime,
    /// Shift end time. May be earlier than `start_time` for shifts that
    /// cross midnight.
    pub end_time: NaiveTime,
    /// Unpaid break minutes deducted from worked time.
    #[serde(default)]
    pub unpaid_break_minutes: i64,
    /// The worker's employment basis.
    pub employment_basis: EmploymentBasis,
    /// Whether the shift date is a public holiday.
    #[serde(default)]
    pub public_holiday: bool,
}

impl ShiftContext {
    /// Returns the day of the week the shift starts on.
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns true if the worker is casual.
    pub fn is_casual(&self) -> bool {
        self.employment_basis == EmploymentBasis::Casual
    }

    /// Calculates worked minutes for the shift.
    ///
    /// An end time earlier than the start time is treated as crossing
    /// midnight (24 hours are added). Unpaid break minutes are then
    /// deducted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidShiftDuration`] if the result is zero
    /// or negative after break deduction.
    pub fn worked_minutes(&self) -> EngineResult<i64> {
        let mut span = (self.end_time - self.start_time).num_minutes();
        if span < 0 {
            span += 24 * 60;
        }

        let worked = span - self.unpaid_break_minutes;
        if worked <= 0 {
            return Err(EngineError::InvalidShiftDuration {
                message: format!(
                    "shift on {} has {worked} worked minutes after deducting {} break minutes",
                    self.date, self.unpaid_break_minutes
                ),
            });
        }

        Ok(worked)
    }

    /// Calculates worked hours for the shift as a Decimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use agreement_engine::models::{EmploymentBasis, ShiftContext};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let shift = ShiftContext {
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
    ///     unpaid_break_minutes: 30,
    ///     employment_basis: EmploymentBasis::Permanent,
    ///     public_holiday: false,
    /// };
    /// assert_eq!(shift.worked_hours().unwrap(), Decimal::new(80, 1)); // 8.0
    /// ```
    pub fn worked_hours(&self) -> EngineResult<Decimal> {
        let minutes = self.worked_minutes()?;
        Ok(Decimal::new(minutes, 0) / Decimal::new(60, 0))
    }
}
