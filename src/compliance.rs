//! Underpayment risk checking.
//!
//! The checker compares a worker's actual hourly rate against the
//! historically-correct agreement minimum and produces a graded severity
//! report. It is deliberately error-tolerant: a missing current version is
//! converted into a finding rather than an error, because "we don't know
//! the compliant rate" is itself actionable information.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    ComplianceCheckResult, ComplianceIssue, ComplianceWarning, IssueCategory, IssueSeverity,
    RateOverride,
};
use crate::store::AgreementStore;

/// Assumed annual worked hours for underpayment estimates (38 x 52).
pub const ASSUMED_ANNUAL_HOURS: Decimal = Decimal::from_parts(1976, 0, 0, false, 0);

/// Factor above the minimum under which a near-minimum warning is raised.
const NEAR_MINIMUM_FACTOR: Decimal = Decimal::from_parts(102, 0, 0, false, 2);

/// Score deductions per finding.
const CRITICAL_PENALTY: i32 = 30;
const MAJOR_PENALTY: i32 = 15;
const MINOR_PENALTY: i32 = 5;
const WARNING_PENALTY: i32 = 2;

/// Compares actual pay against resolved minimums.
pub struct ComplianceChecker {
    store: Arc<AgreementStore>,
}

impl ComplianceChecker {
    /// Creates a checker reading minimums from the given store.
    pub fn new(store: Arc<AgreementStore>) -> Self {
        Self { store }
    }

    /// Runs a compliance check for one worker against one agreement
    /// classification.
    ///
    /// Never fails: if the agreement's current version (or the
    /// classification's rate within it) cannot be found, the result is a
    /// non-compliant report with a single major "version not found" issue
    /// and a score of 0.
    pub fn check(
        &self,
        worker_id: &str,
        actual_hourly_rate: Decimal,
        agreement_id: &str,
        classification_code: &str,
        overrides: &[RateOverride],
        check_date: NaiveDate,
    ) -> ComplianceCheckResult {
        let minimum = self
            .store
            .get_current_version(agreement_id)
            .ok()
            .and_then(|version| version.rate_for(classification_code));

        let Some(minimum) = minimum else {
            return ComplianceCheckResult {
                check_date,
                worker_id: worker_id.to_string(),
                agreement_id: agreement_id.to_string(),
                classification_code: classification_code.to_string(),
                actual_hourly_rate,
                minimum_hourly_rate: None,
                is_compliant: false,
                issues: vec![ComplianceIssue {
                    severity: IssueSeverity::Major,
                    category: IssueCategory::MissingData,
                    message: format!(
                        "no current rate version found for classification \
                         '{classification_code}' under agreement '{agreement_id}'"
                    ),
                    recommended_action: "import or restore the agreement's rate data before \
                                         relying on compliance results"
                        .to_string(),
                    estimated_underpayment: None,
                    deadline: None,
                }],
                warnings: vec![],
                compliance_score: 0,
            };
        };

        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        if actual_hourly_rate < minimum {
            let shortfall = minimum - actual_hourly_rate;
            issues.push(ComplianceIssue {
                severity: IssueSeverity::Critical,
                category: IssueCategory::Underpayment,
                message: format!(
                    "actual rate {actual_hourly_rate} is below the agreement minimum {minimum}"
                ),
                recommended_action: format!(
                    "raise the rate to at least {minimum} immediately and review back pay"
                ),
                estimated_underpayment: Some(shortfall * ASSUMED_ANNUAL_HOURS),
                deadline: Some(check_date),
            });
        } else if actual_hourly_rate < minimum * NEAR_MINIMUM_FACTOR {
            warnings.push(ComplianceWarning {
                code: "near_minimum".to_string(),
                message: format!(
                    "actual rate {actual_hourly_rate} is within 2% of the minimum {minimum}; \
                     the next rate update is likely to cause underpayment"
                ),
            });
        }

        if !overrides.is_empty() {
            warnings.push(ComplianceWarning {
                code: "overrides_active".to_string(),
                message: format!(
                    "{} manual rate override(s) active and should be reviewed",
                    overrides.len()
                ),
            });
        }

        let critical = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Critical)
            .count() as i32;
        let major = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Major)
            .count() as i32;
        let minor = issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Minor)
            .count() as i32;

        let score = 100
            - CRITICAL_PENALTY * critical
            - MAJOR_PENALTY * major
            - MINOR_PENALTY * minor
            - WARNING_PENALTY * warnings.len() as i32;
        let compliance_score = score.clamp(0, 100) as u8;

        debug!(
            worker_id,
            agreement_id,
            %actual_hourly_rate,
            %minimum,
            compliance_score,
            "compliance check completed"
        );

        ComplianceCheckResult {
            check_date,
            worker_id: worker_id.to_string(),
            agreement_id: agreement_id.to_string(),
            classification_code: classification_code.to_string(),
            actual_hourly_rate,
            minimum_hourly_rate: Some(minimum),
            is_compliant: critical == 0,
            issues,
            warnings,
            compliance_score,
        }
    }
}
