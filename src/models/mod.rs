//! Domain models for the Pay Agreement Resolution & Compliance Engine.
//!
//! This module contains the core data structures: agreements and their
//! classification tables, effective-dated rate versions, worker agreement
//! assignments, shift contexts, pay breakdowns, compliance results, audit
//! events, and rate change alerts.

mod agreement;
mod alert;
mod assignment;
mod audit;
mod compliance;
mod pay;
mod shift;
mod version;

pub use agreement::{
    Agreement, AgreementKind, AgreementStatus, Allowance, Classification, LeaveEntitlement,
    LeaveType, LoadingWindow, OvertimeRuleSet, PenaltyRateTable, TimeOfDayLoadings,
};
pub use alert::{AlertPriority, AlertStatus, AlertTransition, AlertType, RateChangeAlert};
pub use assignment::{AgreementLink, ClassificationMapping, WorkerAgreementAssignment};
pub use audit::{AuditEvent, AuditEventType, EntityRef, EventSource, FieldChange};
pub use compliance::{
    ComplianceCheckResult, ComplianceIssue, ComplianceWarning, IssueCategory, IssueSeverity,
    RateOverride,
};
pub use pay::{PayBreakdown, PaySegment};
pub use shift::{EmploymentBasis, ShiftContext};
pub use version::{RateVersion, VersionChange};
