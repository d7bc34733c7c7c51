//! CSV export of audit events.
//!
//! The export is the only persisted format this engine specifies. One row
//! per event; field-level changes are rendered as `field: old → new` and
//! joined with `; `.

use crate::models::AuditEvent;

/// The fixed header row of the export.
const HEADER: &str = "Date,Event Type,Entity Type,Entity Name,Action,Performed By,Source,Changes";

/// Renders the given events as a CSV document.
///
/// # Example
///
/// ```
/// use agreement_engine::ledger::export_csv;
///
/// let csv = export_csv(&[]);
/// assert!(csv.starts_with("Date,Event Type,"));
/// ```
pub fn export_csv(events: &[AuditEvent]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for event in events {
        let changes = event
            .changes
            .iter()
            .map(|c| format!("{}: {} → {}", c.field, c.previous_value, c.new_value))
            .collect::<Vec<_>>()
            .join("; ");

        let action = event.reason.clone().unwrap_or_default();

        let row = [
            event.timestamp.date_naive().to_string(),
            event.event_type.label().to_string(),
            event.entity.entity_type.clone(),
            event.entity.entity_name.clone(),
            action,
            event.actor.clone(),
            event.source.label().to_string(),
            changes,
        ];

        let rendered: Vec<String> = row.iter().map(|field| escape(field)).collect();
        out.push_str(&rendered.join(","));
        out.push('\n');
    }

    out
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditEventType, EntityRef, EventSource, FieldChange};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample_event() -> AuditEvent {
        AuditEvent {
            id: Uuid::nil(),
            event_type: AuditEventType::RateVersionCreated,
            entity: EntityRef {
                entity_type: "agreement".to_string(),
                entity_id: "ma000018".to_string(),
                entity_name: "Aged Care Award".to_string(),
            },
            changes: vec![
                FieldChange {
                    field: "rates.level_3.hourly".to_string(),
                    previous_value: "27.17".to_string(),
                    new_value: "28.00".to_string(),
                },
                FieldChange {
                    field: "rates.level_4.hourly".to_string(),
                    previous_value: "29.55".to_string(),
                    new_value: "30.45".to_string(),
                },
            ],
            actor: "import_job".to_string(),
            source: EventSource::Import,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            reason: Some("2025 annual wage review".to_string()),
            triggered_alert_ids: vec![],
        }
    }

    #[test]
    fn test_header_row() {
        let csv = export_csv(&[]);
        assert_eq!(
            csv,
            "Date,Event Type,Entity Type,Entity Name,Action,Performed By,Source,Changes\n"
        );
    }

    #[test]
    fn test_one_row_per_event() {
        let csv = export_csv(&[sample_event()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("2026-01-15,rate_version_created,agreement,Aged Care Award"));
    }

    #[test]
    fn test_changes_joined_with_semicolons() {
        let csv = export_csv(&[sample_event()]);
        // The changes field contains a comma-free join, so it is unquoted.
        assert!(csv.contains("rates.level_3.hourly: 27.17 → 28.00; rates.level_4.hourly: 29.55 → 30.45"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut event = sample_event();
        event.entity.entity_name = "Acme, Pty Ltd Agreement".to_string();
        event.changes.clear();

        let csv = export_csv(&[event]);
        assert!(csv.contains("\"Acme, Pty Ltd Agreement\""));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("plain"), "plain");
    }
}
