//! Audit event model.
//!
//! Audit events are immutable and append-only; they are recorded by the
//! [`AuditLedger`](crate::ledger::AuditLedger) and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The enumerated kinds of auditable events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// A manual rate override was created.
    RateOverrideCreated,
    /// A manual rate override was updated.
    RateOverrideUpdated,
    /// A manual rate override was removed.
    RateOverrideRemoved,
    /// A new rate version snapshot was created for an agreement.
    RateVersionCreated,
    /// A regulator (FWC) minimum-wage update was ingested.
    FwcRateUpdate,
    /// An enterprise agreement passed its nominal expiry date.
    EbaExpired,
    /// An agreement bundle was imported into the store.
    AgreementImported,
    /// An alert changed lifecycle status.
    AlertTransition,
}

impl AuditEventType {
    /// Returns the snake_case label used in exports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RateOverrideCreated => "rate_override_created",
            Self::RateOverrideUpdated => "rate_override_updated",
            Self::RateOverrideRemoved => "rate_override_removed",
            Self::RateVersionCreated => "rate_version_created",
            Self::FwcRateUpdate => "fwc_rate_update",
            Self::EbaExpired => "eba_expired",
            Self::AgreementImported => "agreement_imported",
            Self::AlertTransition => "alert_transition",
        }
    }
}

/// Where an audit event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// A human actor through the application.
    User,
    /// The engine itself (e.g., expiry sweeps).
    System,
    /// An administrative import.
    Import,
}

impl EventSource {
    /// Returns the snake_case label used in exports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
            Self::Import => "import",
        }
    }
}

/// A field-level change captured on an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// The field that changed.
    pub field: String,
    /// The previous value, rendered as a string.
    pub previous_value: String,
    /// The new value, rendered as a string.
    pub new_value: String,
}

/// A reference to the entity an event or alert concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// The kind of entity (e.g., "agreement", "worker").
    pub entity_type: String,
    /// The entity's identifier.
    pub entity_id: String,
    /// A display name for the entity.
    pub entity_name: String,
}

/// One immutable entry in the append-only audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// The kind of event.
    pub event_type: AuditEventType,
    /// The entity the event concerns.
    pub entity: EntityRef,
    /// Field-level changes, empty when not applicable.
    #[serde(default)]
    pub changes: Vec<FieldChange>,
    /// Who performed the action.
    pub actor: String,
    /// Where the event originated.
    pub source: EventSource,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Optional free-text reason supplied by the actor.
    #[serde(default)]
    pub reason: Option<String>,
    /// Alerts this event triggered, if any.
    #[serde(default)]
    pub triggered_alert_ids: Vec<Uuid>,
}
