//! Rate resolution: turning a worker and a date into applicable rates.
//!
//! The resolver walks a worker's agreements in priority order and, for
//! each, finds the classification mapping and rate version in effect on
//! the requested date. The primary resolved rate (priority-lowest) drives
//! default calculations; the full list supports better-off-overall
//! comparisons between an enterprise agreement and its reference award.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AgreementKind, OvertimeRuleSet, PenaltyRateTable, TimeOfDayLoadings, WorkerAgreementAssignment,
};
use crate::store::AgreementStore;

/// One applicable rate for a worker on a date, with everything the pricing
/// engine needs to compute a pay breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// The agreement the rate came from.
    pub agreement_id: String,
    /// The link priority this rate was resolved under.
    pub priority: u32,
    /// The classification the rate was looked up for.
    pub classification_code: String,
    /// The rate version the rate was taken from.
    pub version_id: Uuid,
    /// The effective date of that version.
    pub version_effective_from: NaiveDate,
    /// The base hourly rate for the classification.
    pub base_rate: Decimal,
    /// The agreement's casual loading percentage.
    pub casual_loading_percent: Decimal,
    /// Day-type penalty multipliers.
    pub penalties: PenaltyRateTable,
    /// Tiered overtime rules.
    pub overtime: OvertimeRuleSet,
    /// Evening/night loading windows.
    pub loadings: TimeOfDayLoadings,
}

/// Resolves all applicable rates for a worker on a date, in priority order.
///
/// # Errors
///
/// - [`EngineError::NotFound`] if an assigned agreement, its rate version,
///   or the mapped classification's rate is unknown.
/// - [`EngineError::NoApplicableClassification`] if an assigned agreement
///   has no classification mapping with `effective_from <= date`.
///
/// An unresolved rate is never defaulted: resolution errors surface to the
/// caller rather than falling back to zero or a guessed value.
pub fn resolve(
    store: &AgreementStore,
    assignment: &WorkerAgreementAssignment,
    date: NaiveDate,
) -> EngineResult<Vec<ResolvedRate>> {
    let mut resolved = Vec::with_capacity(assignment.links().len());

    for link in assignment.links() {
        let agreement = store.get_agreement(&link.agreement_id)?;

        let mapping = link.mapping_for(date).ok_or_else(|| {
            EngineError::NoApplicableClassification {
                worker_id: assignment.worker_id.clone(),
                agreement_id: link.agreement_id.clone(),
                date,
            }
        })?;

        let version = store.version_for_date(&link.agreement_id, date)?;

        let base_rate = version
            .rate_for(&mapping.classification_code)
            .ok_or_else(|| {
                EngineError::not_found(
                    "classification rate",
                    format!(
                        "{} in version {} of {}",
                        mapping.classification_code, version.id, link.agreement_id
                    ),
                )
            })?;

        debug!(
            worker_id = %assignment.worker_id,
            agreement_id = %link.agreement_id,
            classification = %mapping.classification_code,
            %base_rate,
            "resolved rate"
        );

        resolved.push(ResolvedRate {
            agreement_id: link.agreement_id.clone(),
            priority: link.priority,
            classification_code: mapping.classification_code.clone(),
            version_id: version.id,
            version_effective_from: version.effective_from,
            base_rate,
            casual_loading_percent: agreement.casual_loading_percent,
            penalties: agreement.penalties.clone(),
            overtime: agreement.overtime.clone(),
            loadings: agreement.loadings.clone(),
        });
    }

    Ok(resolved)
}

/// Resolves only the primary (priority-lowest) rate.
pub fn resolve_primary(
    store: &AgreementStore,
    assignment: &WorkerAgreementAssignment,
    date: NaiveDate,
) -> EngineResult<ResolvedRate> {
    let resolved = resolve(store, assignment, date)?;
    resolved
        .into_iter()
        .next()
        .ok_or_else(|| EngineError::InvariantViolation {
            message: format!(
                "assignment for worker '{}' resolved to no rates",
                assignment.worker_id
            ),
        })
}

/// The outcome of a better-off-overall comparison between an enterprise
/// agreement rate and its reference modern award rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootComparison {
    /// The enterprise agreement that was tested.
    pub enterprise_agreement_id: String,
    /// The modern award it was compared against.
    pub award_agreement_id: String,
    /// The resolved enterprise agreement base rate.
    pub enterprise_rate: Decimal,
    /// The resolved award base rate.
    pub award_rate: Decimal,
    /// True iff the enterprise rate is at least the award rate.
    pub better_off: bool,
}

/// Compares the first enterprise agreement rate in a resolved list against
/// the first modern award rate.
///
/// Returns `None` when the list does not contain both instrument kinds;
/// the comparison only makes sense for workers covered by an enterprise
/// agreement layered over an award.
pub fn boot_comparison(
    store: &AgreementStore,
    resolved: &[ResolvedRate],
) -> EngineResult<Option<BootComparison>> {
    let mut enterprise: Option<&ResolvedRate> = None;
    let mut award: Option<&ResolvedRate> = None;

    for rate in resolved {
        let agreement = store.get_agreement(&rate.agreement_id)?;
        match agreement.kind {
            AgreementKind::EnterpriseAgreement if enterprise.is_none() => {
                enterprise = Some(rate);
            }
            AgreementKind::ModernAward if award.is_none() => award = Some(rate),
            _ => {}
        }
    }

    Ok(match (enterprise, award) {
        (Some(enterprise), Some(award)) => Some(BootComparison {
            enterprise_agreement_id: enterprise.agreement_id.clone(),
            award_agreement_id: award.agreement_id.clone(),
            enterprise_rate: enterprise.base_rate,
            award_rate: award.base_rate,
            better_off: enterprise.base_rate >= award.base_rate,
        }),
        _ => None,
    })
}
