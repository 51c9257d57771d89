//! Architecture event list (`{"events": [{"name": ..., "code": ...}]}`).

use pmu_model::{Event, RecordKind};
use serde_json::Value;
use tracing::warn;

use crate::diagnostic::Diagnostic;
use crate::value::{as_object, event_code, required_text, type_name};

/// Architecture events in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchEvents {
    pub events: Vec<Event>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read the architecture event list of `document`.
///
/// `source` names the document in diagnostics. Entries without a usable name
/// or code are skipped and reported; entries are identified by index when the
/// name itself is unusable.
#[must_use]
pub fn normalize_arch_events(source: &str, document: &Value) -> ArchEvents {
    let mut diagnostics = Vec::new();
    let mut skip = |record: String, reason: String| {
        warn!(
            product = source,
            kind = %RecordKind::Event,
            record = %record,
            reason = %reason,
            "skipping record"
        );
        diagnostics.push(Diagnostic::new(source, RecordKind::Event, record, reason));
    };

    let entries: &[Value] = match document.get("events") {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(other) => {
            skip(
                "events".to_string(),
                format!("section expected an array, found {}", type_name(other)),
            );
            &[]
        }
        None => &[],
    };

    let mut events = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let record = match as_object(entry) {
            Ok(record) => record,
            Err(reason) => {
                skip(format!("#{index}"), reason);
                continue;
            }
        };
        let name = match required_text(record, "name") {
            Ok(name) if !name.is_empty() => name,
            Ok(_) => {
                skip(format!("#{index}"), "record name is empty".to_string());
                continue;
            }
            Err(reason) => {
                skip(format!("#{index}"), reason);
                continue;
            }
        };
        match event_code(record) {
            Ok(code) => events.push(Event {
                name,
                code,
                title: String::new(),
                description: String::new(),
            }),
            Err(reason) => skip(name, reason),
        }
    }
    ArchEvents {
        events,
        diagnostics,
    }
}
