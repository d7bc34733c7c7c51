//! Agreement model and related types.
//!
//! This module defines the [`Agreement`] aggregate and its supporting tables:
//! classifications, penalty rates, overtime rules, time-of-day loadings,
//! allowances, and leave entitlements.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of pay-and-conditions instrument an agreement represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementKind {
    /// A Fair Work modern award (e.g., MA000018).
    ModernAward,
    /// A negotiated enterprise agreement, tested against a reference award.
    EnterpriseAgreement,
    /// An individual flexibility arrangement varying an underlying instrument.
    IndividualFlexibilityArrangement,
}

/// Lifecycle status of an agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    /// The agreement is in force.
    Active,
    /// The agreement has passed its nominal expiry date.
    Expired,
    /// The agreement is approved but not yet in effect.
    Pending,
    /// The agreement has been replaced by a newer instrument.
    Superseded,
}

/// A pay grade/level within an agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The classification code (e.g., "dce_level_3").
    pub code: String,
    /// The human-readable name of the classification.
    pub name: String,
    /// Seniority level within the agreement (1 = most junior).
    pub level: u32,
    /// Qualifications required to hold this classification.
    #[serde(default)]
    pub required_qualifications: Vec<String>,
    /// Minimum years of experience required, if any.
    #[serde(default)]
    pub min_experience_years: Option<u32>,
    /// For enterprise agreement classifications, the code of the underlying
    /// award classification used for better-off-overall comparison.
    #[serde(default)]
    pub award_reference: Option<String>,
}

/// Day-type penalty multipliers.
///
/// Exactly one of these (or the implicit weekday 100%) applies to a shift;
/// they are never stacked. Public holiday overrides weekend penalties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRateTable {
    /// Multiplier for Saturday shifts (e.g., 1.25).
    pub saturday: Decimal,
    /// Multiplier for Sunday shifts (e.g., 1.75).
    pub sunday: Decimal,
    /// Multiplier for public holiday shifts (e.g., 2.50).
    pub public_holiday: Decimal,
}

/// A time window attracting an additional loading when a shift starts inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingWindow {
    /// Start of the window (inclusive).
    pub start: NaiveTime,
    /// End of the window (exclusive). May be earlier than `start` for
    /// windows that cross midnight.
    pub end: NaiveTime,
    /// The multiplier applied on top of the day-type-penalized rate.
    pub multiplier: Decimal,
}

impl LoadingWindow {
    /// Returns true if the given time falls inside the window.
    ///
    /// Windows whose end is earlier than their start are treated as crossing
    /// midnight (e.g., 22:00 to 06:00).
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            time >= self.start && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

/// Evening and night loading windows for an agreement.
///
/// Windows must not overlap in configuration; if they do, evening takes
/// precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimeOfDayLoadings {
    /// The evening window, if the agreement defines one.
    #[serde(default)]
    pub evening: Option<LoadingWindow>,
    /// The night window, if the agreement defines one.
    #[serde(default)]
    pub night: Option<LoadingWindow>,
}

/// Tiered daily overtime rules.
///
/// Overtime multipliers are defined against the casual-loaded base rate,
/// not stacked with day-type penalties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRuleSet {
    /// Daily worked-hours threshold beyond which overtime applies.
    pub daily_threshold_hours: Decimal,
    /// Length of the first overtime tier in hours (commonly 2).
    pub first_tier_hours: Decimal,
    /// Multiplier for the first overtime tier (e.g., 1.5).
    pub first_tier_multiplier: Decimal,
    /// Multiplier beyond the first tier (e.g., 2.0).
    pub second_tier_multiplier: Decimal,
}

impl Default for OvertimeRuleSet {
    fn default() -> Self {
        Self {
            daily_threshold_hours: Decimal::new(8, 0),
            first_tier_hours: Decimal::new(2, 0),
            first_tier_multiplier: Decimal::new(15, 1),
            second_tier_multiplier: Decimal::new(2, 0),
        }
    }
}

/// An allowance payable under an agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// The allowance code (e.g., "laundry").
    pub code: String,
    /// A human-readable description.
    pub description: String,
    /// The rate per unit (shift, week, kilometre).
    pub rate: Decimal,
    /// The unit the rate applies per.
    pub unit: String,
}

/// The type of leave an entitlement or accrual refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual leave (NES: four weeks per year).
    Annual,
    /// Personal/carer's leave (NES: ten days per year).
    Personal,
    /// Long service leave, governed by state legislation.
    LongService,
}

/// A leave entitlement declared by an agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEntitlement {
    /// The type of leave.
    pub leave_type: LeaveType,
    /// Weeks of leave accrued per year of service.
    pub weeks_per_year: Decimal,
}

/// A pay-and-conditions agreement governing a class of workers.
///
/// Agreements are immutable once superseded; rate changes are captured as
/// new [`RateVersion`](super::RateVersion) snapshots rather than in-place
/// edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    /// Unique identifier (e.g., the Fair Work code "MA000018").
    pub id: String,
    /// The kind of instrument.
    pub kind: AgreementKind,
    /// The human-readable name of the agreement.
    pub name: String,
    /// Lifecycle status.
    pub status: AgreementStatus,
    /// Regions the agreement applies in (e.g., "nsw", "vic").
    #[serde(default)]
    pub regions: Vec<String>,
    /// Industry classifications the agreement applies to.
    #[serde(default)]
    pub industries: Vec<String>,
    /// Ordered classification table, most junior first.
    pub classifications: Vec<Classification>,
    /// Day-type penalty multipliers.
    pub penalties: PenaltyRateTable,
    /// Tiered overtime rules.
    pub overtime: OvertimeRuleSet,
    /// Evening/night loading windows.
    #[serde(default)]
    pub loadings: TimeOfDayLoadings,
    /// Allowances payable under the agreement.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
    /// Leave entitlements declared by the agreement.
    #[serde(default)]
    pub leave_entitlements: Vec<LeaveEntitlement>,
    /// Superannuation guarantee percentage (e.g., 11.5).
    pub superannuation_percent: Decimal,
    /// Casual loading percentage applied in lieu of leave (e.g., 25).
    pub casual_loading_percent: Decimal,
}

impl Agreement {
    /// Looks up a classification by its code.
    pub fn classification(&self, code: &str) -> Option<&Classification> {
        self.classifications.iter().find(|c| c.code == code)
    }
}
