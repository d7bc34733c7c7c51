//! Authoritative, versioned store of agreements and their rate tables.
//!
//! The store keeps one [`VersionedAgreement`] aggregate per agreement id
//! behind its own lock, so reads run concurrently and writes serialize per
//! agreement: concurrent version creation for the same agreement is
//! mutually exclusive, while different agreements proceed in parallel.
//! Every mutation is recorded through the [`AuditLedger`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::ledger::AuditLedger;
use crate::models::{
    Agreement, AgreementStatus, AuditEventType, EntityRef, EventSource, FieldChange, RateVersion,
    VersionChange,
};

/// An agreement together with its full effective-dated version history.
///
/// Invariant: after registration, exactly one version has
/// `is_current = true`, and its `effective_from` is the maximum among all
/// versions. The current-pointer flip in
/// [`AgreementStore::create_version_snapshot`] happens under the
/// aggregate's write lock, so there is no window with zero or two current
/// versions.
#[derive(Debug, Clone)]
pub struct VersionedAgreement {
    /// The agreement record.
    pub agreement: Agreement,
    /// Version history in insertion order.
    pub versions: Vec<RateVersion>,
}

impl VersionedAgreement {
    fn current(&self) -> Option<&RateVersion> {
        self.versions.iter().find(|v| v.is_current)
    }
}

/// Versioned, audited record of all agreements known to the engine.
pub struct AgreementStore {
    ledger: Arc<AuditLedger>,
    agreements: RwLock<HashMap<String, Arc<RwLock<VersionedAgreement>>>>,
}

impl AgreementStore {
    /// Creates an empty store writing its audit trail to the given ledger.
    pub fn new(ledger: Arc<AuditLedger>) -> Self {
        Self {
            ledger,
            agreements: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the ledger this store records into.
    pub fn ledger(&self) -> &Arc<AuditLedger> {
        &self.ledger
    }

    /// Registers a new agreement with its initial rate snapshot.
    ///
    /// The initial version becomes current immediately and an
    /// `agreement_imported` audit event is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if the agreement id is
    /// already registered; new rates for an existing agreement go through
    /// [`Self::create_version_snapshot`] instead.
    pub fn insert_agreement(
        &self,
        agreement: Agreement,
        effective_from: NaiveDate,
        reference: impl Into<String>,
        rates: HashMap<String, Decimal>,
        actor: impl Into<String>,
    ) -> EngineResult<RateVersion> {
        let version = RateVersion {
            id: Uuid::new_v4(),
            agreement_id: agreement.id.clone(),
            effective_from,
            reference: reference.into(),
            changes: vec![],
            is_current: true,
            rates,
            created_at: Utc::now(),
        };

        let entity = EntityRef {
            entity_type: "agreement".to_string(),
            entity_id: agreement.id.clone(),
            entity_name: agreement.name.clone(),
        };

        {
            let mut agreements = self.agreements.write().expect("agreement map lock poisoned");
            if agreements.contains_key(&agreement.id) {
                return Err(EngineError::InvariantViolation {
                    message: format!("agreement '{}' is already registered", agreement.id),
                });
            }
            agreements.insert(
                agreement.id.clone(),
                Arc::new(RwLock::new(VersionedAgreement {
                    agreement,
                    versions: vec![version.clone()],
                })),
            );
        }

        info!(
            agreement_id = %entity.entity_id,
            effective_from = %effective_from,
            "registered agreement"
        );

        self.ledger.record(
            AuditEventType::AgreementImported,
            entity,
            vec![],
            actor,
            EventSource::Import,
            None,
        );

        Ok(version)
    }

    /// Returns a copy of the agreement record.
    pub fn get_agreement(&self, agreement_id: &str) -> EngineResult<Agreement> {
        let entry = self.entry(agreement_id)?;
        let aggregate = entry.read().expect("agreement lock poisoned");
        Ok(aggregate.agreement.clone())
    }

    /// Returns the agreement's current rate version.
    pub fn get_current_version(&self, agreement_id: &str) -> EngineResult<RateVersion> {
        let entry = self.entry(agreement_id)?;
        let aggregate = entry.read().expect("agreement lock poisoned");
        aggregate.current().cloned().ok_or_else(|| {
            // Unreachable after registration; surfaced loudly if it ever
            // happens rather than silently resolving no rate.
            EngineError::InvariantViolation {
                message: format!("agreement '{agreement_id}' has no current version"),
            }
        })
    }

    /// Returns the full version history, newest effective date first.
    pub fn get_version_history(&self, agreement_id: &str) -> EngineResult<Vec<RateVersion>> {
        let entry = self.entry(agreement_id)?;
        let aggregate = entry.read().expect("agreement lock poisoned");
        let mut versions = aggregate.versions.clone();
        versions.sort_by(|a, b| b.effective_from.cmp(&a.effective_from));
        Ok(versions)
    }

    /// Returns the version in effect on the given date, i.e. the latest
    /// version with `effective_from <= date`.
    pub fn version_for_date(
        &self,
        agreement_id: &str,
        date: NaiveDate,
    ) -> EngineResult<RateVersion> {
        let entry = self.entry(agreement_id)?;
        let aggregate = entry.read().expect("agreement lock poisoned");
        aggregate
            .versions
            .iter()
            .filter(|v| v.effective_from <= date)
            .max_by_key(|v| v.effective_from)
            .cloned()
            .ok_or_else(|| {
                EngineError::not_found(
                    "rate version",
                    format!("{agreement_id} on {date}"),
                )
            })
    }

    /// Creates a new current version snapshot.
    ///
    /// Marks the prior current version non-current and inserts the new one
    /// as current in a single locked operation, then records a
    /// `rate_version_created` audit event summarizing the change list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown agreement id, or
    /// [`EngineError::InvalidEffectiveDate`] if the new effective date is
    /// not strictly after the current version's.
    pub fn create_version_snapshot(
        &self,
        agreement_id: &str,
        effective_date: NaiveDate,
        reference: impl Into<String>,
        changes: Vec<VersionChange>,
        rates: HashMap<String, Decimal>,
        actor: impl Into<String>,
    ) -> EngineResult<RateVersion> {
        let entry = self.entry(agreement_id)?;

        let (version, entity) = {
            let mut aggregate = entry.write().expect("agreement lock poisoned");

            let current_date = aggregate
                .current()
                .map(|v| v.effective_from)
                .ok_or_else(|| EngineError::InvariantViolation {
                    message: format!("agreement '{agreement_id}' has no current version"),
                })?;

            if effective_date <= current_date {
                return Err(EngineError::InvalidEffectiveDate {
                    agreement_id: agreement_id.to_string(),
                    current: current_date,
                    proposed: effective_date,
                });
            }

            let version = RateVersion {
                id: Uuid::new_v4(),
                agreement_id: agreement_id.to_string(),
                effective_from: effective_date,
                reference: reference.into(),
                changes,
                is_current: true,
                rates,
                created_at: Utc::now(),
            };

            // Atomic flip: the old pointer clears and the new version lands
            // while the write lock is held.
            for existing in &mut aggregate.versions {
                existing.is_current = false;
            }
            aggregate.versions.push(version.clone());

            let entity = EntityRef {
                entity_type: "agreement".to_string(),
                entity_id: agreement_id.to_string(),
                entity_name: aggregate.agreement.name.clone(),
            };

            (version, entity)
        };

        debug!(
            agreement_id,
            effective_from = %effective_date,
            "created rate version snapshot"
        );

        self.ledger.record(
            AuditEventType::RateVersionCreated,
            entity,
            version
                .changes
                .iter()
                .map(|c| FieldChange {
                    field: c.field.clone(),
                    previous_value: c.previous_value.clone(),
                    new_value: c.new_value.clone(),
                })
                .collect(),
            actor,
            EventSource::User,
            None,
        );

        Ok(version)
    }

    /// Marks an agreement as expired and records an `eba_expired` event,
    /// which the ledger's rule table turns into a high-priority alert.
    ///
    /// Idempotent: marking an already-expired agreement is a no-op and does
    /// not raise another alert.
    pub fn mark_expired(
        &self,
        agreement_id: &str,
        actor: impl Into<String>,
    ) -> EngineResult<Agreement> {
        let entry = self.entry(agreement_id)?;

        let (agreement, previous) = {
            let mut aggregate = entry.write().expect("agreement lock poisoned");
            let previous = aggregate.agreement.status;
            if previous == AgreementStatus::Expired {
                return Ok(aggregate.agreement.clone());
            }
            aggregate.agreement.status = AgreementStatus::Expired;
            (aggregate.agreement.clone(), previous)
        };

        self.ledger.record(
            AuditEventType::EbaExpired,
            EntityRef {
                entity_type: "agreement".to_string(),
                entity_id: agreement.id.clone(),
                entity_name: agreement.name.clone(),
            },
            vec![FieldChange {
                field: "status".to_string(),
                previous_value: format!("{previous:?}").to_lowercase(),
                new_value: "expired".to_string(),
            }],
            actor,
            EventSource::System,
            None,
        );

        Ok(agreement)
    }

    fn entry(&self, agreement_id: &str) -> EngineResult<Arc<RwLock<VersionedAgreement>>> {
        self.agreements
            .read()
            .expect("agreement map lock poisoned")
            .get(agreement_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("agreement", agreement_id))
    }
}
