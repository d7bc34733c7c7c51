//! Administrative import file structures.
//!
//! These are the strongly-typed shapes deserialized from an agreement
//! bundle's YAML files before they are installed into the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{
    AgreementKind, Allowance, Classification, LeaveEntitlement, OvertimeRuleSet, PenaltyRateTable,
    TimeOfDayLoadings,
};

/// The `agreement.yaml` file: everything about an agreement except its
/// rate history.
#[derive(Debug, Clone, Deserialize)]
pub struct AgreementFile {
    /// Unique agreement identifier (e.g., "MA000018").
    pub id: String,
    /// The kind of instrument.
    pub kind: AgreementKind,
    /// The human-readable name of the agreement.
    pub name: String,
    /// Regions the agreement applies in.
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
    /// Superannuation guarantee percentage.
    pub superannuation_percent: Decimal,
    /// Casual loading percentage.
    pub casual_loading_percent: Decimal,
}

/// One effective-dated rate file from the bundle's `rates/` directory.
#[derive(Debug, Clone, Deserialize)]
pub struct RateFile {
    /// The date from which these rates apply.
    pub effective_from: NaiveDate,
    /// External reference for the change (e.g., an FWC publication id).
    pub reference: String,
    /// Hourly rate per classification code.
    pub rates: HashMap<String, Decimal>,
}

/// A fully-loaded agreement bundle: metadata plus its rate history,
/// oldest rate file first.
#[derive(Debug, Clone)]
pub struct AgreementBundle {
    agreement: AgreementFile,
    rate_files: Vec<RateFile>,
}

impl AgreementBundle {
    /// Creates a bundle, sorting the rate files by effective date.
    pub fn new(agreement: AgreementFile, rate_files: Vec<RateFile>) -> Self {
        let mut sorted = rate_files;
        sorted.sort_by_key(|rf| rf.effective_from);
        Self {
            agreement,
            rate_files: sorted,
        }
    }

    /// Returns the agreement metadata.
    pub fn agreement(&self) -> &AgreementFile {
        &self.agreement
    }

    /// Returns the rate files, oldest first.
    pub fn rate_files(&self) -> &[RateFile] {
        &self.rate_files
    }
}
