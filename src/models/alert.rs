//! Rate change alert model and lifecycle state machine.
//!
//! Alerts are derived from audit events by the ledger's rule table. Their
//! lifecycle is `pending -> acknowledged -> actioned`, or a dismissal from
//! either non-terminal state. `actioned` and `dismissed` are terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::audit::EntityRef;

/// What an alert is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// A manual rate override needs review.
    OverrideReview,
    /// An enterprise agreement has expired; workers may revert to the award.
    AgreementExpired,
    /// A regulator rate update landed; affected workers need review.
    RateUpdateReview,
}

/// Priority of an alert. Ordering is highest-priority-first so alert lists
/// can sort on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    /// Requires immediate attention.
    Critical,
    /// Requires prompt attention.
    High,
    /// Should be reviewed in the normal course of work.
    Medium,
    /// Informational.
    Low,
}

/// Lifecycle status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    /// Newly created, awaiting triage.
    Pending,
    /// Seen by a human, not yet acted on.
    Acknowledged,
    /// Resolved through action. Terminal.
    Actioned,
    /// Closed without action. Terminal.
    Dismissed,
}

impl AlertStatus {
    /// Returns the snake_case label used in errors and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Acknowledged => "acknowledged",
            Self::Actioned => "actioned",
            Self::Dismissed => "dismissed",
        }
    }

    /// Returns true if no further transitions are allowed from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Actioned | Self::Dismissed)
    }
}

/// A timestamped, actor-attributed lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTransition {
    /// The status the alert moved to.
    pub to: AlertStatus,
    /// Who performed the transition.
    pub actor: String,
    /// When the transition happened.
    pub at: DateTime<Utc>,
    /// Optional notes supplied with the transition.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A priority-ranked alert raised by the audit ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateChangeAlert {
    /// Unique identifier for the alert.
    pub id: Uuid,
    /// What the alert is about.
    pub alert_type: AlertType,
    /// Priority ranking.
    pub priority: AlertPriority,
    /// Current lifecycle status.
    pub status: AlertStatus,
    /// Short human-readable title.
    pub title: String,
    /// Longer message describing what to do.
    pub message: String,
    /// Optional deadline for acting on the alert.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Entities the alert concerns.
    #[serde(default)]
    pub affected_entities: Vec<EntityRef>,
    /// When the alert was created.
    pub created_at: DateTime<Utc>,
    /// Transition history, oldest first.
    #[serde(default)]
    pub transitions: Vec<AlertTransition>,
}

impl RateChangeAlert {
    /// Applies a lifecycle transition, validating the state machine.
    ///
    /// Allowed moves: `pending -> acknowledged`, `pending -> dismissed`,
    /// `acknowledged -> actioned`, `acknowledged -> dismissed`, and the
    /// shortcut `pending -> actioned` for alerts resolved without an
    /// explicit acknowledgement step.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] for any move out of a
    /// terminal state or any move not listed above.
    pub fn transition(
        &mut self,
        to: AlertStatus,
        actor: impl Into<String>,
        notes: Option<String>,
    ) -> EngineResult<()> {
        let allowed = match (self.status, to) {
            (AlertStatus::Pending, AlertStatus::Acknowledged)
            | (AlertStatus::Pending, AlertStatus::Actioned)
            | (AlertStatus::Pending, AlertStatus::Dismissed)
            | (AlertStatus::Acknowledged, AlertStatus::Actioned)
            | (AlertStatus::Acknowledged, AlertStatus::Dismissed) => true,
            _ => false,
        };

        if !allowed {
            return Err(EngineError::InvalidTransition {
                alert_id: self.id.to_string(),
                from: self.status.label().to_string(),
                to: to.label().to_string(),
            });
        }

        self.status = to;
        self.transitions.push(AlertTransition {
            to,
            actor: actor.into(),
            at: Utc::now(),
            notes,
        });

        Ok(())
    }
}
