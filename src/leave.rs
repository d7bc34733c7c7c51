//! Leave accrual calculation.
//!
//! Long-service leave is state legislation rather than award content, so
//! each Australian state and territory carries its own rule row:
//! qualifying years, entitlement weeks, the pro-rata access window, and
//! the accrual rate beyond the first entitlement. Annual and personal
//! leave follow the flat NES rates (4 and 2 weeks per year of hours
//! worked) and accrue for permanent workers only; casuals receive loading
//! in lieu. Long-service leave accrues for both bases.
//!
//! Everything here is a pure function of its inputs, so results are
//! reproducible for audit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EmploymentBasis, LeaveType};

const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);
const ANNUAL_LEAVE_WEEKS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
const PERSONAL_LEAVE_WEEKS: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Australian state or territory whose long-service legislation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// New South Wales.
    Nsw,
    /// Victoria.
    Vic,
    /// Queensland.
    Qld,
    /// South Australia.
    Sa,
    /// Western Australia.
    Wa,
    /// Tasmania.
    Tas,
    /// Northern Territory.
    Nt,
    /// Australian Capital Territory.
    Act,
}

impl State {
    /// Returns the long-service rule row for this jurisdiction.
    pub fn long_service_rule(self) -> LongServiceRule {
        // Entitlement weeks use four decimal places where legislation
        // expresses the entitlement as a fraction (2 months = 8.6667
        // weeks, 1/60th of seven years = 6.0667 weeks).
        match self {
            State::Nsw => LongServiceRule {
                entitlement_years: Decimal::from_parts(10, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(86667, 0, 0, false, 4),
                pro_rata_years: Decimal::from_parts(5, 0, 0, false, 0),
                pro_rata_on_resignation: false,
                additional_weeks_per_year: Decimal::from_parts(86667, 0, 0, false, 5),
            },
            State::Vic => LongServiceRule {
                entitlement_years: Decimal::from_parts(7, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(60667, 0, 0, false, 4),
                pro_rata_years: Decimal::from_parts(7, 0, 0, false, 0),
                pro_rata_on_resignation: true,
                additional_weeks_per_year: Decimal::from_parts(86667, 0, 0, false, 5),
            },
            State::Qld => LongServiceRule {
                entitlement_years: Decimal::from_parts(10, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(86667, 0, 0, false, 4),
                pro_rata_years: Decimal::from_parts(7, 0, 0, false, 0),
                pro_rata_on_resignation: false,
                additional_weeks_per_year: Decimal::from_parts(86667, 0, 0, false, 5),
            },
            State::Sa => LongServiceRule {
                entitlement_years: Decimal::from_parts(10, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(13, 0, 0, false, 0),
                pro_rata_years: Decimal::from_parts(7, 0, 0, false, 0),
                pro_rata_on_resignation: true,
                additional_weeks_per_year: Decimal::from_parts(13, 0, 0, false, 1),
            },
            State::Wa => LongServiceRule {
                entitlement_years: Decimal::from_parts(10, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(86667, 0, 0, false, 4),
                pro_rata_years: Decimal::from_parts(7, 0, 0, false, 0),
                pro_rata_on_resignation: false,
                additional_weeks_per_year: Decimal::from_parts(86667, 0, 0, false, 5),
            },
            State::Tas => LongServiceRule {
                entitlement_years: Decimal::from_parts(10, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(86667, 0, 0, false, 4),
                pro_rata_years: Decimal::from_parts(7, 0, 0, false, 0),
                pro_rata_on_resignation: false,
                additional_weeks_per_year: Decimal::from_parts(86667, 0, 0, false, 5),
            },
            State::Nt => LongServiceRule {
                entitlement_years: Decimal::from_parts(10, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(13, 0, 0, false, 0),
                pro_rata_years: Decimal::from_parts(7, 0, 0, false, 0),
                pro_rata_on_resignation: false,
                additional_weeks_per_year: Decimal::from_parts(13, 0, 0, false, 1),
            },
            State::Act => LongServiceRule {
                entitlement_years: Decimal::from_parts(7, 0, 0, false, 0),
                entitlement_weeks: Decimal::from_parts(60667, 0, 0, false, 4),
                pro_rata_years: Decimal::from_parts(5, 0, 0, false, 0),
                pro_rata_on_resignation: true,
                additional_weeks_per_year: Decimal::from_parts(86667, 0, 0, false, 5),
            },
        }
    }
}

/// One jurisdiction's long-service leave parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongServiceRule {
    /// Years of continuous service before the full entitlement vests.
    pub entitlement_years: Decimal,
    /// Weeks of leave granted at the full entitlement.
    pub entitlement_weeks: Decimal,
    /// Years of service after which pro-rata access opens on termination.
    pub pro_rata_years: Decimal,
    /// Whether pro-rata access extends to resignation as well as
    /// employer-initiated termination.
    pub pro_rata_on_resignation: bool,
    /// Weeks accrued per year of service beyond the first entitlement.
    pub additional_weeks_per_year: Decimal,
}

/// Long-service standing derived from the rule row and service years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongServiceSummary {
    /// The rule row applied.
    pub rule: LongServiceRule,
    /// Whether the full entitlement has vested.
    pub full_entitlement_reached: bool,
    /// Whether pro-rata access has opened.
    pub pro_rata_eligible: bool,
}

/// One leave type's accrual for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualLine {
    /// Which leave type accrued.
    pub leave_type: LeaveType,
    /// Hours accrued over the period.
    pub hours_accrued: Decimal,
    /// The fraction of worked hours that accrued.
    pub rate: Decimal,
    /// Human-readable derivation for audit display.
    pub formula: String,
}

/// The full accrual result for one worker over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualCalculation {
    /// Hours worked over the period.
    pub hours_worked: Decimal,
    /// The worker's employment basis.
    pub employment_basis: EmploymentBasis,
    /// Completed years of continuous service.
    pub service_years: Decimal,
    /// The jurisdiction whose long-service rules applied.
    pub state: State,
    /// Per-leave-type accrual lines.
    pub lines: Vec<AccrualLine>,
    /// Long-service standing under the state rule.
    pub long_service: LongServiceSummary,
}

impl AccrualCalculation {
    /// Returns the accrual line for a leave type, if one accrued.
    pub fn line(&self, leave_type: LeaveType) -> Option<&AccrualLine> {
        self.lines.iter().find(|l| l.leave_type == leave_type)
    }
}

/// Calculates leave accrual for hours worked in one period.
///
/// Annual and personal leave accrue as a flat fraction of hours worked
/// (4/52 and 2/52) for permanent workers only. Long-service leave accrues
/// for both bases at the state rate: the initial entitlement rate until
/// the qualifying period completes, the additional-weeks rate thereafter.
///
/// # Examples
///
/// ```
/// use agreement_engine::leave::{calculate_accrual, State};
/// use agreement_engine::models::{EmploymentBasis, LeaveType};
/// use rust_decimal::Decimal;
///
/// let calc = calculate_accrual(
///     Decimal::new(38, 0),
///     EmploymentBasis::Permanent,
///     Decimal::new(3, 0),
///     State::Nsw,
/// );
/// let annual = calc.line(LeaveType::Annual).unwrap();
/// assert_eq!(
///     annual.hours_accrued,
///     Decimal::new(38, 0) * (Decimal::new(4, 0) / Decimal::new(52, 0)),
/// );
/// ```
pub fn calculate_accrual(
    hours_worked: Decimal,
    employment_basis: EmploymentBasis,
    service_years: Decimal,
    state: State,
) -> AccrualCalculation {
    let rule = state.long_service_rule();
    let full_entitlement_reached = service_years >= rule.entitlement_years;
    let pro_rata_eligible = service_years >= rule.pro_rata_years;

    let mut lines = Vec::new();

    if employment_basis == EmploymentBasis::Permanent {
        let annual_rate = ANNUAL_LEAVE_WEEKS / WEEKS_PER_YEAR;
        lines.push(AccrualLine {
            leave_type: LeaveType::Annual,
            hours_accrued: hours_worked * annual_rate,
            rate: annual_rate,
            formula: format!("{hours_worked}h x 4/52 (NES annual leave)"),
        });

        let personal_rate = PERSONAL_LEAVE_WEEKS / WEEKS_PER_YEAR;
        lines.push(AccrualLine {
            leave_type: LeaveType::Personal,
            hours_accrued: hours_worked * personal_rate,
            rate: personal_rate,
            formula: format!("{hours_worked}h x 2/52 (NES personal leave)"),
        });
    }

    let (weeks_per_year, phase) = if full_entitlement_reached {
        (rule.additional_weeks_per_year, "post-entitlement")
    } else {
        (
            rule.entitlement_weeks / rule.entitlement_years,
            "initial entitlement",
        )
    };
    let long_service_rate = weeks_per_year / WEEKS_PER_YEAR;
    lines.push(AccrualLine {
        leave_type: LeaveType::LongService,
        hours_accrued: hours_worked * long_service_rate,
        rate: long_service_rate,
        formula: format!(
            "{hours_worked}h x {weeks_per_year} weeks/year / 52 ({state:?} {phase})"
        ),
    });

    AccrualCalculation {
        hours_worked,
        employment_basis,
        service_years,
        state,
        lines,
        long_service: LongServiceSummary {
            rule,
            full_entitlement_reached,
            pro_rata_eligible,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_permanent_accrues_annual_and_personal() {
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Permanent, dec("2"), State::Nsw);

        let annual = calc.line(LeaveType::Annual).unwrap();
        assert_eq!(annual.hours_accrued, dec("38") * (dec("4") / dec("52")));

        let personal = calc.line(LeaveType::Personal).unwrap();
        assert_eq!(personal.hours_accrued, dec("38") * (dec("2") / dec("52")));

        // Annual accrues at roughly twice the personal rate; the division
        // rounds at 28 digits so the relationship is approximate.
        assert!(annual.hours_accrued > personal.hours_accrued);
    }

    #[test]
    fn test_casual_accrues_long_service_only() {
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Casual, dec("2"), State::Nsw);

        assert!(calc.line(LeaveType::Annual).is_none());
        assert!(calc.line(LeaveType::Personal).is_none());
        assert!(calc.line(LeaveType::LongService).is_some());
        assert_eq!(calc.lines.len(), 1);
    }

    #[test]
    fn test_long_service_initial_rate_nsw() {
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Permanent, dec("4"), State::Nsw);

        let lsl = calc.line(LeaveType::LongService).unwrap();
        // 8.6667 weeks over 10 years, as a fraction of 52 weeks.
        let expected_rate = dec("8.6667") / dec("10") / dec("52");
        assert_eq!(lsl.rate, expected_rate);
        assert_eq!(lsl.hours_accrued, dec("38") * expected_rate);
        assert!(!calc.long_service.full_entitlement_reached);
    }

    #[test]
    fn test_long_service_additional_rate_after_entitlement() {
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Permanent, dec("12"), State::Nsw);

        let lsl = calc.line(LeaveType::LongService).unwrap();
        assert_eq!(lsl.rate, dec("0.86667") / dec("52"));
        assert!(calc.long_service.full_entitlement_reached);
        assert!(calc.long_service.pro_rata_eligible);
    }

    #[test]
    fn test_pro_rata_window_opens_before_entitlement() {
        // NSW pro-rata opens at five years; the full entitlement at ten.
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Permanent, dec("6"), State::Nsw);
        assert!(calc.long_service.pro_rata_eligible);
        assert!(!calc.long_service.full_entitlement_reached);
        assert!(!calc.long_service.rule.pro_rata_on_resignation);
    }

    #[test]
    fn test_victoria_seven_year_entitlement() {
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Permanent, dec("7"), State::Vic);
        assert!(calc.long_service.full_entitlement_reached);
        assert!(calc.long_service.rule.pro_rata_on_resignation);
        assert_eq!(calc.long_service.rule.entitlement_weeks, dec("6.0667"));
    }

    #[test]
    fn test_south_australia_thirteen_weeks() {
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Permanent, dec("3"), State::Sa);
        let lsl = calc.line(LeaveType::LongService).unwrap();
        assert_eq!(lsl.rate, dec("13") / dec("10") / dec("52"));
    }

    #[test]
    fn test_zero_hours_accrues_zero() {
        let calc = calculate_accrual(dec("0"), EmploymentBasis::Permanent, dec("3"), State::Qld);
        for line in &calc.lines {
            assert_eq!(line.hours_accrued, Decimal::ZERO);
        }
    }

    #[test]
    fn test_accrual_scales_linearly_with_hours() {
        let single = calculate_accrual(dec("10"), EmploymentBasis::Permanent, dec("3"), State::Wa);
        let double = calculate_accrual(dec("20"), EmploymentBasis::Permanent, dec("3"), State::Wa);

        for (s, d) in single.lines.iter().zip(double.lines.iter()) {
            assert_eq!(d.hours_accrued, s.hours_accrued * dec("2"));
        }
    }

    #[test]
    fn test_formula_names_state_and_phase() {
        let calc = calculate_accrual(dec("38"), EmploymentBasis::Casual, dec("2"), State::Tas);
        let lsl = calc.line(LeaveType::LongService).unwrap();
        assert!(lsl.formula.contains("Tas"));
        assert!(lsl.formula.contains("initial entitlement"));
    }
}
