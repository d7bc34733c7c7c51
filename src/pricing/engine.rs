//! Shift pricing orchestration.
//!
//! Combines worked time, casual loading, day-type penalty, time-of-day
//! loading, and overtime tiering into a [`PayBreakdown`] for one shift and
//! one resolved rate.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{PayBreakdown, PaySegment, ShiftContext};
use crate::resolver::ResolvedRate;

use super::casual_loading::apply_casual_loading;
use super::day_type::{day_type, day_type_multiplier};
use super::overtime::split_overtime;
use super::time_of_day::{LoadingKind, time_of_day_multiplier};

/// Prices one shift against one resolved rate.
///
/// The regular segment is paid at the combined
/// `casual-loaded x day-type x time-of-day` rate. Overtime tiers are paid
/// at the casual-loaded base rate times the tier multiplier; day-type and
/// time-of-day factors do not stack onto overtime, per agreement
/// convention.
///
/// # Errors
///
/// - [`EngineError::InvalidShiftDuration`](crate::error::EngineError::InvalidShiftDuration)
///   for zero or negative worked time.
/// - [`EngineError::InvariantViolation`](crate::error::EngineError::InvariantViolation)
///   if a negative rate or a segment-hours mismatch is ever computed;
///   pricing fails loudly rather than returning a negative amount.
///
/// # Examples
///
/// ```
/// use agreement_engine::models::{
///     EmploymentBasis, OvertimeRuleSet, PenaltyRateTable, ShiftContext, TimeOfDayLoadings,
/// };
/// use agreement_engine::pricing::price_shift;
/// use agreement_engine::resolver::ResolvedRate;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let resolved = ResolvedRate {
///     agreement_id: "ma000018".to_string(),
///     priority: 1,
///     classification_code: "level_3".to_string(),
///     version_id: Uuid::nil(),
///     version_effective_from: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     base_rate: Decimal::from_str("28.00").unwrap(),
///     casual_loading_percent: Decimal::from_str("25").unwrap(),
///     penalties: PenaltyRateTable {
///         saturday: Decimal::from_str("1.25").unwrap(),
///         sunday: Decimal::from_str("1.75").unwrap(),
///         public_holiday: Decimal::from_str("2.5").unwrap(),
///     },
///     overtime: OvertimeRuleSet::default(),
///     loadings: TimeOfDayLoadings::default(),
/// };
///
/// let shift = ShiftContext {
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(), // Thursday
///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
///     unpaid_break_minutes: 30,
///     employment_basis: EmploymentBasis::Permanent,
///     public_holiday: false,
/// };
///
/// let breakdown = price_shift(&resolved, &shift).unwrap();
/// assert_eq!(breakdown.total_pay, Decimal::from_str("224.00").unwrap());
/// ```
pub fn price_shift(resolved: &ResolvedRate, shift: &ShiftContext) -> EngineResult<PayBreakdown> {
    let worked_hours = shift.worked_hours()?;

    let loading = apply_casual_loading(
        resolved.base_rate,
        resolved.casual_loading_percent,
        shift.employment_basis,
    );

    let day = day_type(shift);
    let day_multiplier = day_type_multiplier(day, &resolved.penalties);

    let time_of_day = time_of_day_multiplier(shift.start_time, &resolved.loadings);

    let regular_rate = loading.loaded_rate * day_multiplier * time_of_day.multiplier;

    let split = split_overtime(worked_hours, &resolved.overtime);

    let mut segments = Vec::with_capacity(3);

    if split.regular_hours > Decimal::ZERO {
        let label = match time_of_day.window {
            Some(LoadingKind::Evening) => format!("{} (evening)", day.label()),
            Some(LoadingKind::Night) => format!("{} (night)", day.label()),
            None => day.label().to_string(),
        };
        segments.push(PaySegment {
            label,
            hours: split.regular_hours,
            rate: regular_rate,
            amount: split.regular_hours * regular_rate,
        });
    }

    if split.tier_one_hours > Decimal::ZERO {
        let rate = loading.loaded_rate * resolved.overtime.first_tier_multiplier;
        segments.push(PaySegment {
            label: "overtime tier 1".to_string(),
            hours: split.tier_one_hours,
            rate,
            amount: split.tier_one_hours * rate,
        });
    }

    if split.tier_two_hours > Decimal::ZERO {
        let rate = loading.loaded_rate * resolved.overtime.second_tier_multiplier;
        segments.push(PaySegment {
            label: "overtime tier 2".to_string(),
            hours: split.tier_two_hours,
            rate,
            amount: split.tier_two_hours * rate,
        });
    }

    let breakdown = PayBreakdown::from_segments(segments, worked_hours)?;

    debug!(
        agreement_id = %resolved.agreement_id,
        date = %shift.date,
        %worked_hours,
        total = %breakdown.total_pay,
        "priced shift"
    );

    Ok(breakdown)
}
