//! Compliance check result models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Severity of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Compliance fails; immediate remediation required.
    Critical,
    /// Serious finding that does not fail compliance on its own.
    Major,
    /// Low-impact finding.
    Minor,
}

/// Category of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Actual rate is below the agreement minimum.
    Underpayment,
    /// The data needed to determine the minimum is missing.
    MissingData,
}

/// A single compliance issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// How serious the issue is.
    pub severity: IssueSeverity,
    /// What kind of issue this is.
    pub category: IssueCategory,
    /// A human-readable description of the finding.
    pub message: String,
    /// What the reviewer should do about it.
    pub recommended_action: String,
    /// Estimated annual underpayment, when quantifiable.
    #[serde(default)]
    pub estimated_underpayment: Option<Decimal>,
    /// Remediation deadline, when one applies.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// A non-failing observation attached to a compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// An active manual rate override, surfaced as a review warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateOverride {
    /// Unique identifier for the override.
    pub id: String,
    /// Why the override was put in place.
    pub reason: String,
}

/// The graded result of one compliance check.
///
/// `is_compliant` is true iff no issue has critical severity. The score is
/// in [0, 100]: 100 minus 30 per critical, 15 per major, 5 per minor and 2
/// per warning, floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheckResult {
    /// The date the check was performed for.
    pub check_date: NaiveDate,
    /// The worker that was checked.
    pub worker_id: String,
    /// The agreement the minimum was taken from.
    pub agreement_id: String,
    /// The classification the minimum was taken from.
    pub classification_code: String,
    /// The worker's actual hourly rate.
    pub actual_hourly_rate: Decimal,
    /// The resolved minimum, when the current version could be found.
    #[serde(default)]
    pub minimum_hourly_rate: Option<Decimal>,
    /// True iff there are no critical issues.
    pub is_compliant: bool,
    /// Issues found, most severe first.
    pub issues: Vec<ComplianceIssue>,
    /// Non-failing observations.
    pub warnings: Vec<ComplianceWarning>,
    /// Numeric score in [0, 100].
    pub compliance_score: u8,
}

impl ComplianceCheckResult {
    /// Counts issues of the given severity.
    pub fn count_by_severity(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
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
    fn test_severity_serialization() {
        assert_eq!(
            serde_json::to_string(&IssueSeverity::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(
            serde_json::to_string(&IssueCategory::MissingData).unwrap(),
            "\"missing_data\""
        );
    }

    #[test]
    fn test_count_by_severity() {
        let result = ComplianceCheckResult {
            check_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            worker_id: "w_001".to_string(),
            agreement_id: "ma000018".to_string(),
            classification_code: "level_3".to_string(),
            actual_hourly_rate: dec("25.00"),
            minimum_hourly_rate: Some(dec("28.00")),
            is_compliant: false,
            issues: vec![
                ComplianceIssue {
                    severity: IssueSeverity::Critical,
                    category: IssueCategory::Underpayment,
                    message: "rate below minimum".to_string(),
                    recommended_action: "raise rate immediately".to_string(),
                    estimated_underpayment: Some(dec("5928.00")),
                    deadline: Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
                },
                ComplianceIssue {
                    severity: IssueSeverity::Minor,
                    category: IssueCategory::MissingData,
                    message: "award reference missing".to_string(),
                    recommended_action: "link the reference award".to_string(),
                    estimated_underpayment: None,
                    deadline: None,
                },
            ],
            warnings: vec![],
            compliance_score: 65,
        };

        assert_eq!(result.count_by_severity(IssueSeverity::Critical), 1);
        assert_eq!(result.count_by_severity(IssueSeverity::Major), 0);
        assert_eq!(result.count_by_severity(IssueSeverity::Minor), 1);
    }

    #[test]
    fn test_result_serialization_round_trip() {
        let result = ComplianceCheckResult {
            check_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            worker_id: "w_001".to_string(),
            agreement_id: "ma000018".to_string(),
            classification_code: "level_3".to_string(),
            actual_hourly_rate: dec("29.00"),
            minimum_hourly_rate: Some(dec("28.00")),
            is_compliant: true,
            issues: vec![],
            warnings: vec![ComplianceWarning {
                code: "overrides_active".to_string(),
                message: "1 manual override active".to_string(),
            }],
            compliance_score: 98,
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: ComplianceCheckResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
