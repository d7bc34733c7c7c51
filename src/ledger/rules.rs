//! Fixed rule table mapping audit event types to alert templates.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AlertPriority, AlertStatus, AlertType, AuditEventType, EntityRef, RateChangeAlert,
};

/// Days allowed to act on an expired-agreement alert before its deadline.
const EXPIRY_REVIEW_DAYS: i64 = 14;

/// Evaluates the rule table for one event, returning the alerts to raise.
///
/// Most event types raise nothing. The table is deliberately fixed: alert
/// policy is engine behavior, not configuration.
pub(super) fn evaluate(
    event_type: AuditEventType,
    entity: &EntityRef,
) -> EngineResult<Vec<RateChangeAlert>> {
    let alerts = match event_type {
        AuditEventType::RateOverrideCreated => vec![template(
            AlertType::OverrideReview,
            AlertPriority::Medium,
            format!("Review rate override for {}", entity.entity_name),
            "A manual rate override was created and should be reviewed against the \
             agreement minimum."
                .to_string(),
            entity,
            None,
        )],
        AuditEventType::RateOverrideUpdated => vec![template(
            AlertType::OverrideReview,
            AlertPriority::Medium,
            format!("Review updated rate override for {}", entity.entity_name),
            "A manual rate override was changed and should be re-reviewed.".to_string(),
            entity,
            None,
        )],
        AuditEventType::EbaExpired => {
            let deadline = Utc::now()
                .date_naive()
                .checked_add_signed(Duration::days(EXPIRY_REVIEW_DAYS))
                .ok_or_else(|| EngineError::InvariantViolation {
                    message: "deadline computation overflowed".to_string(),
                })?;
            vec![template(
                AlertType::AgreementExpired,
                AlertPriority::High,
                format!("{} has expired", entity.entity_name),
                "The enterprise agreement has passed its nominal expiry date. Affected \
                 workers may need to revert to the underlying award."
                    .to_string(),
                entity,
                Some(deadline),
            )]
        }
        AuditEventType::FwcRateUpdate => vec![template(
            AlertType::RateUpdateReview,
            AlertPriority::High,
            format!("FWC rate update applied to {}", entity.entity_name),
            "A regulator minimum-wage update was ingested. Review workers whose actual \
             rates may now sit below the new minimums."
                .to_string(),
            entity,
            None,
        )],
        _ => Vec::new(),
    };

    Ok(alerts)
}

fn template(
    alert_type: AlertType,
    priority: AlertPriority,
    title: String,
    message: String,
    entity: &EntityRef,
    deadline: Option<chrono::NaiveDate>,
) -> RateChangeAlert {
    RateChangeAlert {
        id: Uuid::new_v4(),
        alert_type,
        priority,
        status: AlertStatus::Pending,
        title,
        message,
        deadline,
        affected_entities: vec![entity.clone()],
        created_at: Utc::now(),
        transitions: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> EntityRef {
        EntityRef {
            entity_type: "agreement".to_string(),
            entity_id: "ea_acme".to_string(),
            entity_name: "Acme Enterprise Agreement".to_string(),
        }
    }

    #[test]
    fn test_override_created_maps_to_medium_review() {
        let alerts = evaluate(AuditEventType::RateOverrideCreated, &entity()).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::OverrideReview);
        assert_eq!(alerts[0].priority, AlertPriority::Medium);
        assert_eq!(alerts[0].status, AlertStatus::Pending);
    }

    #[test]
    fn test_eba_expired_maps_to_high_with_deadline() {
        let alerts = evaluate(AuditEventType::EbaExpired, &entity()).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::AgreementExpired);
        assert_eq!(alerts[0].priority, AlertPriority::High);
        assert!(alerts[0].deadline.is_some());
        assert!(alerts[0].title.contains("Acme"));
    }

    #[test]
    fn test_fwc_update_maps_to_high_review() {
        let alerts = evaluate(AuditEventType::FwcRateUpdate, &entity()).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::RateUpdateReview);
        assert_eq!(alerts[0].priority, AlertPriority::High);
    }

    #[test]
    fn test_unmapped_event_types_raise_nothing() {
        for event_type in [
            AuditEventType::RateVersionCreated,
            AuditEventType::RateOverrideRemoved,
            AuditEventType::AgreementImported,
            AuditEventType::AlertTransition,
        ] {
            assert!(evaluate(event_type, &entity()).unwrap().is_empty());
        }
    }

    #[test]
    fn test_alert_references_the_entity() {
        let alerts = evaluate(AuditEventType::RateOverrideCreated, &entity()).unwrap();
        assert_eq!(alerts[0].affected_entities.len(), 1);
        assert_eq!(alerts[0].affected_entities[0].entity_id, "ea_acme");
    }
}
