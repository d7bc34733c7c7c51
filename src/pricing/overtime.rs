//! Tiered daily overtime splitting.
//!
//! Worked hours beyond the daily threshold split into a first tier
//! (commonly the first two overtime hours) and a second tier beyond that.
//! Overtime multipliers apply to the casual-loaded base rate, not to the
//! day-type-penalized rate.

use rust_decimal::Decimal;

use crate::models::OvertimeRuleSet;

/// The split of worked hours into regular and overtime tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeSplit {
    /// Hours up to the daily threshold.
    pub regular_hours: Decimal,
    /// Hours in the first overtime tier.
    pub tier_one_hours: Decimal,
    /// Hours beyond the first tier.
    pub tier_two_hours: Decimal,
}

/// Splits worked hours against the agreement's overtime rules.
///
/// # Examples
///
/// ```
/// use agreement_engine::models::OvertimeRuleSet;
/// use agreement_engine::pricing::split_overtime;
/// use rust_decimal::Decimal;
///
/// let split = split_overtime(Decimal::new(11, 0), &OvertimeRuleSet::default());
/// assert_eq!(split.regular_hours, Decimal::new(8, 0));
/// assert_eq!(split.tier_one_hours, Decimal::new(2, 0));
/// assert_eq!(split.tier_two_hours, Decimal::new(1, 0));
/// ```
pub fn split_overtime(worked_hours: Decimal, rules: &OvertimeRuleSet) -> OvertimeSplit {
    let regular_hours = worked_hours.min(rules.daily_threshold_hours);
    let overtime = (worked_hours - rules.daily_threshold_hours).max(Decimal::ZERO);
    let tier_one_hours = overtime.min(rules.first_tier_hours);
    let tier_two_hours = overtime - tier_one_hours;

    OvertimeSplit {
        regular_hours,
        tier_one_hours,
        tier_two_hours,
    }
}
