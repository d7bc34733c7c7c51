//! Error types for the Pay Agreement Resolution & Compliance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during agreement resolution,
//! shift pricing, and ledger operations.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the agreement engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use agreement_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "agreement".to_string(),
///     id: "ma000018".to_string(),
/// };
/// assert_eq!(error.to_string(), "agreement not found: ma000018");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An agreement, classification, or version could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was missing (e.g., "agreement").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A new version's effective date was not strictly after the current one.
    #[error(
        "invalid effective date {proposed} for agreement '{agreement_id}': \
         must be strictly after current version date {current}"
    )]
    InvalidEffectiveDate {
        /// The agreement whose version history was being extended.
        agreement_id: String,
        /// The effective date of the existing current version.
        current: NaiveDate,
        /// The rejected effective date.
        proposed: NaiveDate,
    },

    /// No classification mapping was in effect for the requested date.
    #[error(
        "no applicable classification for worker '{worker_id}' under agreement \
         '{agreement_id}' on {date}"
    )]
    NoApplicableClassification {
        /// The worker whose assignment was being resolved.
        worker_id: String,
        /// The agreement that had no mapping in effect.
        agreement_id: String,
        /// The resolution date.
        date: NaiveDate,
    },

    /// A shift had zero or negative worked time after break deduction.
    #[error("invalid shift duration: {message}")]
    InvalidShiftDuration {
        /// A description of what made the duration invalid.
        message: String,
    },

    /// An internal consistency check failed. Never silently swallowed.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// A description of the violated invariant.
        message: String,
    },

    /// An alert state transition was not permitted from the current status.
    #[error("invalid alert transition for '{alert_id}': {from} -> {to}")]
    InvalidTransition {
        /// The alert whose transition was rejected.
        alert_id: String,
        /// The status the alert was in.
        from: String,
        /// The requested target status.
        to: String,
    },

    /// A worker assignment contained two agreements with the same priority.
    #[error("duplicate priority {priority} in assignment for worker '{worker_id}'")]
    DuplicatePriority {
        /// The worker whose assignment was rejected.
        worker_id: String,
        /// The duplicated priority value.
        priority: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Convenience constructor for [`EngineError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
