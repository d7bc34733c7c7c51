//! Effective-dated rate version snapshots.
//!
//! Each [`RateVersion`] captures the classification rates of an agreement
//! as they stood from a given effective date, so that "what rate applied on
//! date X" is always reconstructible.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A single field-level change between two rate versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionChange {
    /// The field that changed (e.g., "rates.level_3.hourly").
    pub field: String,
    /// The previous value, rendered as a string.
    pub previous_value: String,
    /// The new value, rendered as a string.
    pub new_value: String,
}

/// One effective-dated snapshot of an agreement's classification rates.
///
/// At most one version per agreement has `is_current = true` at any time;
/// the [`AgreementStore`](crate::store::AgreementStore) flips the pointer
/// atomically when a new version is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateVersion {
    /// Unique identifier for this version.
    pub id: Uuid,
    /// The agreement this version belongs to.
    pub agreement_id: String,
    /// The date from which these rates apply.
    pub effective_from: NaiveDate,
    /// External reference for the change (e.g., an FWC publication id).
    pub reference: String,
    /// Field-level changes relative to the previous version.
    #[serde(default)]
    pub changes: Vec<VersionChange>,
    /// Whether this is the agreement's current version.
    pub is_current: bool,
    /// Hourly rate per classification code as at the effective date.
    pub rates: HashMap<String, Decimal>,
    /// When the version record was created.
    pub created_at: DateTime<Utc>,
}

impl RateVersion {
    /// Returns the hourly rate for a classification, if the snapshot has one.
    pub fn rate_for(&self, classification_code: &str) -> Option<Decimal> {
        self.rates.get(classification_code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_version() -> RateVersion {
        let mut rates = HashMap::new();
        rates.insert("level_3".to_string(), dec("28.00"));
        rates.insert("level_4".to_string(), dec("30.45"));

        RateVersion {
            id: Uuid::nil(),
            agreement_id: "ma000018".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            reference: "FWC-2025-AWR".to_string(),
            changes: vec![VersionChange {
                field: "rates.level_3.hourly".to_string(),
                previous_value: "27.17".to_string(),
                new_value: "28.00".to_string(),
            }],
            is_current: true,
            rates,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rate_for_known_classification() {
        let version = sample_version();
        assert_eq!(version.rate_for("level_3"), Some(dec("28.00")));
        assert_eq!(version.rate_for("level_4"), Some(dec("30.45")));
    }

    #[test]
    fn test_rate_for_unknown_classification() {
        let version = sample_version();
        assert_eq!(version.rate_for("level_9"), None);
    }

    #[test]
    fn test_version_serialization_round_trip() {
        let version = sample_version();
        let json = serde_json::to_string(&version).unwrap();
        let back: RateVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(version, back);
    }

    #[test]
    fn test_version_change_deserialization() {
        let json = r#"{
            "field": "rates.level_3.hourly",
            "previous_value": "27.17",
            "new_value": "28.00"
        }"#;

        let change: VersionChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.field, "rates.level_3.hourly");
        assert_eq!(change.previous_value, "27.17");
        assert_eq!(change.new_value, "28.00");
    }
}
