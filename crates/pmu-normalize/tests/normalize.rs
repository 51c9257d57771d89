//! Normalization of whole product documents.

use insta::assert_snapshot;
use pmu_model::{AttributeValue, RecordKind};
use pmu_normalize::{COLUMN_GUTTER, normalize};
use serde_json::{Map, Value, json};

fn document(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn sample() -> Map<String, Value> {
    document(json!({
        "product_configuration": {
            "pmu_architecture": "armv8.4",
            "num_slots": 8,
            "architecture": "armv8.4-a",
            "major_revision": 1,
        },
        "events": {
            "STALL_BACKEND": {"code": "0x0024", "title": "Backend stall", "description": "Cycles stalled in the backend"},
            "CPU_CYCLES": {"code": "0x0011", "title": "Cycle", "description": "Counts CPU clock cycles"},
        },
        "metrics": {
            "backend_stalled_cycles": {
                "formula": "((stall_backend / cpu_cycles) * 100)",
                "events": ["cpu_cycles", "stall_backend"],
                "units": "percent of cycles",
                "title": "Backend Stalled Cycles"
            },
            "ipc": {
                "formula": "INST_RETIRED / CPU_CYCLES",
                "events": ["INST_RETIRED", "CPU_CYCLES"],
                "units": "per cycle",
                "title": "Instructions Per Cycle"
            }
        },
        "groups": {
            "function": {},
            "metrics": {
                "Cycle_Accounting": {
                    "metrics": ["backend_stalled_cycles", "IPC"],
                    "title": "Cycle Accounting",
                    "description": "Where the cycles go"
                }
            }
        }
    }))
}

#[test]
fn backend_stalled_cycles_compiles_to_postfix() {
    let normalized = normalize("neoverse-v1", &sample());
    let metric = &normalized.tables.metrics[0];
    assert_eq!(metric.name, "backend_stalled_cycles");
    assert_eq!(
        metric.formula_compiled_text(),
        "stall_backend cpu_cycles / 100 *"
    );
    assert_eq!(metric.events_csv(), "cpu_cycles,stall_backend");
    assert_eq!(metric.units, "percent of cycles");
    assert_eq!(metric.title, "Backend Stalled Cycles");

    let value = pmu_formula::evaluate(&metric.formula_compiled, |name| match name {
        "stall_backend" => Some(25.0),
        "cpu_cycles" => Some(200.0),
        _ => None,
    })
    .unwrap();
    assert!((value - 12.5).abs() < f64::EPSILON);
}

#[test]
fn declaration_order_is_kept_and_config_keys_are_sorted() {
    let normalized = normalize("neoverse-v1", &sample());
    let tables = &normalized.tables;

    let events: Vec<&str> = tables.events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(events, vec!["STALL_BACKEND", "CPU_CYCLES"]);

    let metrics: Vec<&str> = tables.metrics.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(metrics, vec!["backend_stalled_cycles", "ipc"]);

    let config = tables.config.as_ref().unwrap();
    let keys: Vec<&str> = config.keys().collect();
    assert_eq!(
        keys,
        vec!["architecture", "major_revision", "num_slots", "pmu_architecture"]
    );
    assert_eq!(
        config.attributes.get("num_slots"),
        Some(&AttributeValue::Integer(8))
    );
    assert_eq!(tables.groups[0].metrics_csv(), "backend_stalled_cycles,ipc");
    assert!(normalized.is_clean());
}

#[test]
fn widths_are_measured_per_column() {
    let widths = normalize("neoverse-v1", &sample()).widths;
    assert_eq!(widths.events.name, "STALL_BACKEND".len() + COLUMN_GUTTER);
    assert_eq!(
        widths.metrics.name,
        "backend_stalled_cycles".len() + COLUMN_GUTTER
    );
    assert_eq!(
        widths.metrics.formula_source,
        "((stall_backend / cpu_cycles) * 100)".len() + COLUMN_GUTTER
    );
    assert_eq!(
        widths.metrics.formula_compiled,
        "stall_backend cpu_cycles / 100 *".len() + COLUMN_GUTTER
    );
    assert_ne!(widths.metrics.formula_source, widths.metrics.formula_compiled);
    assert_eq!(widths.metrics.units, "percent of cycles".len() + COLUMN_GUTTER);
    assert_eq!(widths.groups.name, "Cycle_Accounting".len() + COLUMN_GUTTER);
}

#[test]
fn longer_metric_in_one_product_leaves_other_product_alone() {
    let baseline = normalize("neoverse-n1", &sample()).widths;

    let mut other = sample();
    other["metrics"].as_object_mut().unwrap().insert(
        "a_metric_with_a_much_longer_name_than_any_other".to_string(),
        json!({"formula": "a + b", "events": [], "units": "", "title": ""}),
    );
    let widened = normalize("neoverse-v2", &other).widths;
    let again = normalize("neoverse-n1", &sample()).widths;

    assert!(widened.metrics.name > baseline.metrics.name);
    assert_eq!(again, baseline);
}

#[test]
fn bad_formula_skips_only_that_metric() {
    let mut doc = sample();
    doc["metrics"].as_object_mut().unwrap().insert(
        "broken_metric_with_an_extremely_long_name".to_string(),
        json!({"formula": "(cpu_cycles + ", "events": ["cpu_cycles"]}),
    );
    let normalized = normalize("neoverse-v1", &doc);

    assert_eq!(normalized.tables.metrics.len(), 2);
    assert_eq!(normalized.tables.events.len(), 2);
    assert_eq!(normalized.tables.groups.len(), 1);
    assert_eq!(
        normalized.widths.metrics.name,
        "backend_stalled_cycles".len() + COLUMN_GUTTER
    );

    let diagnostic = &normalized.diagnostics[0];
    assert_eq!(diagnostic.kind, RecordKind::Metric);
    assert_snapshot!(diagnostic.to_string(), @"neoverse-v1: skipped metric 'broken_metric_with_an_extremely_long_name': invalid formula: unexpected end of formula at position 14");
}

#[test]
fn malformed_records_are_reported_in_document_order() {
    let normalized = normalize(
        "neoverse-n2",
        &document(json!({
            "product_configuration": {"num_slots": 5, "features": ["sve"]},
            "events": {
                "CPU_CYCLES": {"code": "0x11"},
                "NO_CODE": {"title": "missing"},
                "TOO_BIG": {"code": "0x1ffff"},
            },
            "metrics": {
                "no_formula": {"events": []},
                "ok": {"formula": "a * b"}
            },
            "groups": {"metrics": {"g": {"metrics": "ok"}}}
        })),
    );

    let tables = &normalized.tables;
    assert_eq!(tables.config.as_ref().unwrap().attributes.len(), 1);
    assert_eq!(tables.events.len(), 1);
    assert_eq!(tables.metrics.len(), 1);
    assert_eq!(tables.metrics[0].title, "");
    assert!(tables.groups.is_empty());

    let report: Vec<String> = normalized
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_snapshot!(report.join("\n"), @r"
    neoverse-n2: skipped product configuration 'features': attribute must be a scalar, found an array
    neoverse-n2: skipped event 'NO_CODE': missing field 'code'
    neoverse-n2: skipped event 'TOO_BIG': event code 131071 does not fit in 16 bits
    neoverse-n2: skipped metric 'no_formula': missing field 'formula'
    neoverse-n2: skipped metric group 'g': field 'metrics' must be an array, found a string
    ");
}
