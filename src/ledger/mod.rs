//! Append-only audit ledger and derived alerting.
//!
//! Every mutation of the agreement store flows through the
//! [`AuditLedger`]. Recording an event always succeeds; a fixed rule table
//! maps certain event types to alert templates, and a fault in alert-rule
//! evaluation is logged without losing the underlying event.

mod export;
mod rules;

pub use export::export_csv;

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AlertPriority, AlertStatus, AuditEvent, AuditEventType, EntityRef, EventSource, FieldChange,
    RateChangeAlert,
};

/// Pending alert counts broken down by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PendingAlertCounts {
    /// Pending critical alerts.
    pub critical: usize,
    /// Pending high alerts.
    pub high: usize,
    /// Pending medium alerts.
    pub medium: usize,
    /// Pending low alerts.
    pub low: usize,
}

impl PendingAlertCounts {
    /// Total pending alerts across all priorities.
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Append-only event log with derived, priority-ranked alerts.
///
/// Writes are serialized per ledger through internal mutexes; reads return
/// owned snapshots so callers never hold a lock.
#[derive(Debug, Default)]
pub struct AuditLedger {
    events: Mutex<Vec<AuditEvent>>,
    alerts: Mutex<Vec<RateChangeAlert>>,
}

impl AuditLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an audit event and raises any alerts the rule table maps it
    /// to.
    ///
    /// Recording never fails: business validation happens before the ledger
    /// is reached, and a fault while evaluating alert rules is logged and
    /// swallowed so the event itself is never lost.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        event_type: AuditEventType,
        entity: EntityRef,
        changes: Vec<FieldChange>,
        actor: impl Into<String>,
        source: EventSource,
        reason: Option<String>,
    ) -> AuditEvent {
        let actor = actor.into();

        let triggered = match rules::evaluate(event_type, &entity) {
            Ok(alerts) => alerts,
            Err(error) => {
                warn!(
                    event_type = event_type.label(),
                    entity_id = %entity.entity_id,
                    %error,
                    "alert rule evaluation failed; recording event without alerts"
                );
                Vec::new()
            }
        };

        let event = AuditEvent {
            id: Uuid::new_v4(),
            event_type,
            entity,
            changes,
            actor,
            source,
            timestamp: Utc::now(),
            reason,
            triggered_alert_ids: triggered.iter().map(|a| a.id).collect(),
        };

        debug!(
            event_type = event.event_type.label(),
            entity_id = %event.entity.entity_id,
            alerts = triggered.len(),
            "recorded audit event"
        );

        // Lock order: events before alerts, always.
        self.events
            .lock()
            .expect("audit event lock poisoned")
            .push(event.clone());
        if !triggered.is_empty() {
            self.alerts
                .lock()
                .expect("alert lock poisoned")
                .extend(triggered);
        }

        event
    }

    /// Applies a lifecycle transition to an alert.
    ///
    /// The transition itself is recorded back into the event log.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown alert id, or
    /// [`EngineError::InvalidTransition`] when the state machine rejects
    /// the move.
    pub fn transition_alert(
        &self,
        alert_id: Uuid,
        to: AlertStatus,
        actor: impl Into<String>,
        notes: Option<String>,
    ) -> EngineResult<RateChangeAlert> {
        let actor = actor.into();

        let (updated, previous) = {
            let mut alerts = self.alerts.lock().expect("alert lock poisoned");
            let alert = alerts
                .iter_mut()
                .find(|a| a.id == alert_id)
                .ok_or_else(|| EngineError::not_found("alert", alert_id.to_string()))?;

            let previous = alert.status;
            alert.transition(to, actor.clone(), notes.clone())?;
            (alert.clone(), previous)
        };

        self.record(
            AuditEventType::AlertTransition,
            EntityRef {
                entity_type: "alert".to_string(),
                entity_id: alert_id.to_string(),
                entity_name: updated.title.clone(),
            },
            vec![FieldChange {
                field: "status".to_string(),
                previous_value: previous.label().to_string(),
                new_value: to.label().to_string(),
            }],
            actor,
            EventSource::User,
            notes,
        );

        Ok(updated)
    }

    /// Returns pending alert counts by priority.
    pub fn pending_alert_counts(&self) -> PendingAlertCounts {
        let alerts = self.alerts.lock().expect("alert lock poisoned");
        let mut counts = PendingAlertCounts::default();
        for alert in alerts.iter().filter(|a| a.status == AlertStatus::Pending) {
            match alert.priority {
                AlertPriority::Critical => counts.critical += 1,
                AlertPriority::High => counts.high += 1,
                AlertPriority::Medium => counts.medium += 1,
                AlertPriority::Low => counts.low += 1,
            }
        }
        counts
    }

    /// Returns alerts filtered by status and/or priority, sorted by
    /// priority then recency. This is the canonical read contract used by
    /// dashboards.
    pub fn alerts(
        &self,
        status: Option<AlertStatus>,
        priority: Option<AlertPriority>,
    ) -> Vec<RateChangeAlert> {
        let alerts = self.alerts.lock().expect("alert lock poisoned");
        let mut selected: Vec<RateChangeAlert> = alerts
            .iter()
            .filter(|a| status.is_none_or(|s| a.status == s))
            .filter(|a| priority.is_none_or(|p| a.priority == p))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(b.created_at.cmp(&a.created_at))
        });
        selected
    }

    /// Looks up a single alert by id.
    pub fn alert(&self, alert_id: Uuid) -> EngineResult<RateChangeAlert> {
        self.alerts
            .lock()
            .expect("alert lock poisoned")
            .iter()
            .find(|a| a.id == alert_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("alert", alert_id.to_string()))
    }

    /// Returns all recorded events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit event lock poisoned").clone()
    }

    /// Returns events whose date falls within the inclusive range.
    pub fn events_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<AuditEvent> {
        self.events
            .lock()
            .expect("audit event lock poisoned")
            .iter()
            .filter(|e| {
                let date = e.timestamp.date_naive();
                date >= from && date <= to
            })
            .cloned()
            .collect()
    }

    /// Exports events in the inclusive date range as CSV.
    pub fn export_events_csv(&self, from: NaiveDate, to: NaiveDate) -> String {
        export::export_csv(&self.events_in_range(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agreement_entity(id: &str) -> EntityRef {
        EntityRef {
            entity_type: "agreement".to_string(),
            entity_id: id.to_string(),
            entity_name: "Acme Enterprise Agreement".to_string(),
        }
    }

    #[test]
    fn test_record_appends_event() {
        let ledger = AuditLedger::new();
        let event = ledger.record(
            AuditEventType::RateVersionCreated,
            agreement_entity("ea_acme"),
            vec![],
            "importer",
            EventSource::Import,
            None,
        );

        let events = ledger.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, event.id);
    }

    #[test]
    fn test_override_created_raises_medium_alert() {
        let ledger = AuditLedger::new();
        let event = ledger.record(
            AuditEventType::RateOverrideCreated,
            agreement_entity("ea_acme"),
            vec![],
            "manager",
            EventSource::User,
            None,
        );

        assert_eq!(event.triggered_alert_ids.len(), 1);
        let alerts = ledger.alerts(Some(AlertStatus::Pending), Some(AlertPriority::Medium));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, event.triggered_alert_ids[0]);
    }

    #[test]
    fn test_eba_expired_raises_high_alert() {
        let ledger = AuditLedger::new();
        ledger.record(
            AuditEventType::EbaExpired,
            agreement_entity("ea_acme"),
            vec![],
            "system",
            EventSource::System,
            None,
        );

        let counts = ledger.pending_alert_counts();
        assert_eq!(counts.high, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_alert_transition_round_trip() {
        let ledger = AuditLedger::new();
        let event = ledger.record(
            AuditEventType::RateOverrideCreated,
            agreement_entity("ea_acme"),
            vec![],
            "manager",
            EventSource::User,
            None,
        );
        let alert_id = event.triggered_alert_ids[0];

        let updated = ledger
            .transition_alert(alert_id, AlertStatus::Acknowledged, "reviewer", None)
            .unwrap();
        assert_eq!(updated.status, AlertStatus::Acknowledged);

        // The transition itself lands in the event log.
        let events = ledger.events();
        assert_eq!(
            events.last().unwrap().event_type,
            AuditEventType::AlertTransition
        );

        // Terminal transition, then a rejected follow-up.
        ledger
            .transition_alert(alert_id, AlertStatus::Actioned, "reviewer", None)
            .unwrap();
        let result = ledger.transition_alert(alert_id, AlertStatus::Dismissed, "reviewer", None);
        assert!(matches!(
            result,
            Err(EngineError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_transition_unknown_alert_is_not_found() {
        let ledger = AuditLedger::new();
        let result =
            ledger.transition_alert(Uuid::new_v4(), AlertStatus::Acknowledged, "reviewer", None);
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_alerts_sorted_by_priority_then_recency() {
        let ledger = AuditLedger::new();
        // Medium first, then high.
        ledger.record(
            AuditEventType::RateOverrideCreated,
            agreement_entity("ea_acme"),
            vec![],
            "manager",
            EventSource::User,
            None,
        );
        ledger.record(
            AuditEventType::EbaExpired,
            agreement_entity("ea_acme"),
            vec![],
            "system",
            EventSource::System,
            None,
        );

        let alerts = ledger.alerts(None, None);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].priority, AlertPriority::High);
        assert_eq!(alerts[1].priority, AlertPriority::Medium);
    }

    #[test]
    fn test_pending_counts_exclude_non_pending() {
        let ledger = AuditLedger::new();
        let event = ledger.record(
            AuditEventType::RateOverrideCreated,
            agreement_entity("ea_acme"),
            vec![],
            "manager",
            EventSource::User,
            None,
        );
        ledger
            .transition_alert(
                event.triggered_alert_ids[0],
                AlertStatus::Dismissed,
                "reviewer",
                None,
            )
            .unwrap();

        assert_eq!(ledger.pending_alert_counts().total(), 0);
    }

    #[test]
    fn test_alert_transition_event_carries_no_alert() {
        let ledger = AuditLedger::new();
        let event = ledger.record(
            AuditEventType::RateOverrideCreated,
            agreement_entity("ea_acme"),
            vec![],
            "manager",
            EventSource::User,
            None,
        );
        ledger
            .transition_alert(
                event.triggered_alert_ids[0],
                AlertStatus::Acknowledged,
                "reviewer",
                None,
            )
            .unwrap();

        // Only the original override alert exists; the transition event did
        // not spawn another.
        assert_eq!(ledger.alerts(None, None).len(), 1);
    }
}
