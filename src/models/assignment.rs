//! Worker-to-agreement assignment model.
//!
//! A worker may be covered by multiple agreements at once; the assignment
//! records them as an ordered list with a total-order priority (lower
//! priority value applies first). The priority-lowest link is the primary
//! agreement used for default calculations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Maps a worker to a classification under one agreement from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationMapping {
    /// The classification code within the agreement.
    pub classification_code: String,
    /// The date from which this mapping applies.
    pub effective_from: NaiveDate,
}

/// One agreement a worker is covered by, with its resolution priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementLink {
    /// The agreement identifier.
    pub agreement_id: String,
    /// Resolution priority; lower applies first when conditions conflict.
    pub priority: u32,
    /// Classification mappings in insertion order. When two mappings share
    /// an `effective_from`, the most recently added one wins.
    pub mappings: Vec<ClassificationMapping>,
}

impl AgreementLink {
    /// Returns the classification mapping in effect on the given date.
    ///
    /// Picks the mapping with the latest `effective_from <= date`; ties on
    /// `effective_from` are broken by insertion order, last added winning.
    /// This tie-break is a deliberate, documented policy.
    pub fn mapping_for(&self, date: NaiveDate) -> Option<&ClassificationMapping> {
        let mut selected: Option<&ClassificationMapping> = None;
        for mapping in &self.mappings {
            if mapping.effective_from > date {
                continue;
            }
            match selected {
                // >= so that a later-inserted mapping with the same
                // effective_from replaces the earlier one.
                Some(current) if mapping.effective_from >= current.effective_from => {
                    selected = Some(mapping);
                }
                None => selected = Some(mapping),
                _ => {}
            }
        }
        selected
    }
}

/// The full set of agreements covering one worker.
///
/// Constructed through [`WorkerAgreementAssignment::new`], which enforces
/// the total-order priority invariant: duplicate priorities are rejected,
/// and links are kept sorted so the primary agreement is always first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerAgreementAssignment {
    /// The worker this assignment belongs to.
    pub worker_id: String,
    links: Vec<AgreementLink>,
}

impl WorkerAgreementAssignment {
    /// Creates an assignment, validating the priority invariant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicatePriority`] if two links share a
    /// priority, or [`EngineError::InvariantViolation`] if the link list is
    /// empty (every worker must have a primary agreement).
    pub fn new(worker_id: impl Into<String>, links: Vec<AgreementLink>) -> EngineResult<Self> {
        let worker_id = worker_id.into();

        if links.is_empty() {
            return Err(EngineError::InvariantViolation {
                message: format!("worker '{worker_id}' has no agreements assigned"),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for link in &links {
            if !seen.insert(link.priority) {
                return Err(EngineError::DuplicatePriority {
                    worker_id,
                    priority: link.priority,
                });
            }
        }

        let mut links = links;
        links.sort_by_key(|l| l.priority);

        Ok(Self { worker_id, links })
    }

    /// Returns the links in priority order (primary first).
    pub fn links(&self) -> &[AgreementLink] {
        &self.links
    }

    /// Returns the primary agreement link (the priority-lowest).
    pub fn primary(&self) -> &AgreementLink {
        // Non-empty by construction.
        &self.links[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn link(agreement_id: &str, priority: u32, mappings: Vec<(&str, &str)>) -> AgreementLink {
        AgreementLink {
            agreement_id: agreement_id.to_string(),
            priority,
            mappings: mappings
                .into_iter()
                .map(|(code, from)| ClassificationMapping {
                    classification_code: code.to_string(),
                    effective_from: date(from),
                })
                .collect(),
        }
    }

    #[test]
    fn test_assignment_rejects_duplicate_priorities() {
        let result = WorkerAgreementAssignment::new(
            "w_001",
            vec![
                link("ea_acme", 1, vec![("level_3", "2025-01-01")]),
                link("ma000018", 1, vec![("level_3", "2025-01-01")]),
            ],
        );

        match result {
            Err(EngineError::DuplicatePriority {
                worker_id,
                priority,
            }) => {
                assert_eq!(worker_id, "w_001");
                assert_eq!(priority, 1);
            }
            other => panic!("expected DuplicatePriority, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_rejects_empty_links() {
        let result = WorkerAgreementAssignment::new("w_001", vec![]);
        assert!(matches!(
            result,
            Err(EngineError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_primary_is_priority_lowest() {
        let assignment = WorkerAgreementAssignment::new(
            "w_001",
            vec![
                link("ma000018", 2, vec![("level_3", "2025-01-01")]),
                link("ea_acme", 1, vec![("grade_b", "2025-01-01")]),
            ],
        )
        .unwrap();

        assert_eq!(assignment.primary().agreement_id, "ea_acme");
        assert_eq!(assignment.links()[1].agreement_id, "ma000018");
    }

    #[test]
    fn test_mapping_for_picks_latest_effective_mapping() {
        let link = link(
            "ma000018",
            1,
            vec![("level_2", "2024-01-01"), ("level_3", "2025-06-01")],
        );

        let before = link.mapping_for(date("2025-01-15")).unwrap();
        assert_eq!(before.classification_code, "level_2");

        let after = link.mapping_for(date("2025-07-01")).unwrap();
        assert_eq!(after.classification_code, "level_3");
    }

    #[test]
    fn test_mapping_for_returns_none_before_first_mapping() {
        let link = link("ma000018", 1, vec![("level_2", "2024-01-01")]);
        assert!(link.mapping_for(date("2023-12-31")).is_none());
    }

    #[test]
    fn test_mapping_tie_break_last_inserted_wins() {
        // Two mappings share an effective date; the later insertion wins.
        let link = link(
            "ma000018",
            1,
            vec![("level_2", "2025-01-01"), ("level_3", "2025-01-01")],
        );

        let selected = link.mapping_for(date("2025-02-01")).unwrap();
        assert_eq!(selected.classification_code, "level_3");
    }

    #[test]
    fn test_assignment_serialization_round_trip() {
        let assignment = WorkerAgreementAssignment::new(
            "w_001",
            vec![link("ma000018", 1, vec![("level_3", "2025-01-01")])],
        )
        .unwrap();

        let json = serde_json::to_string(&assignment).unwrap();
        let back: WorkerAgreementAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(assignment, back);
    }
}
