//! Integration tests for the telemetry pipeline.

use std::fs;
use std::path::Path;

use pmu_cli::config::{ConfigOverrides, PipelineConfig, SourceConfig};
use pmu_cli::pipeline::{ProductStatus, run_arch_events, run_telemetry};
use pmu_ingest::{DirectorySource, ProductCatalog, ProductFamily};
use tempfile::TempDir;

const N1: &str = r#"{
    "product_configuration": {"num_slots": 4, "architecture": "armv8.2-a"},
    "events": {"CPU_CYCLES": {"code": "0x0011", "title": "Cycle", "description": "Counts CPU clock cycles"}},
    "metrics": {
        "backend_stalled_cycles": {
            "formula": "((stall_backend / cpu_cycles) * 100)",
            "events": ["cpu_cycles", "stall_backend"],
            "units": "percent of cycles",
            "title": "Backend Stalled Cycles"
        },
        "broken": {"formula": "(cpu_cycles +", "events": []}
    },
    "groups": {"metrics": {"Cycle_Accounting": {"metrics": ["backend_stalled_cycles"], "title": "Cycle Accounting", "description": ""}}}
}"#;

fn write(root: &Path, family: &str, document: &str, content: &str) {
    let dir = root.join(family);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(document), content).unwrap();
}

fn directory_config(root: &Path, documents: &[&str]) -> PipelineConfig {
    PipelineConfig {
        source: SourceConfig::Directory {
            root: Some(root.to_path_buf()),
        },
        catalog: ProductCatalog {
            families: vec![ProductFamily {
                name: "neoverse".to_string(),
                documents: documents.iter().map(ToString::to_string).collect(),
            }],
        },
        ..PipelineConfig::default()
    }
}

#[test]
fn runs_structured_alias_and_missing_products_in_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "neoverse", "neoverse-n1.json", N1);
    write(dir.path(), "neoverse", "neoverse-n2.json", "neoverse-n2-r0p3.json");

    let config = directory_config(
        dir.path(),
        &["neoverse-n1.json", "neoverse-v9.json", "neoverse-n2.json"],
    );
    let source = DirectorySource::new(dir.path());
    let mut out = Vec::new();
    let report = run_telemetry(&config, &source, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let statuses: Vec<&ProductStatus> = report.products.iter().map(|p| &p.status).collect();
    assert_eq!(statuses[0], &ProductStatus::Emitted);
    assert!(matches!(statuses[1], ProductStatus::Failed { .. }));
    assert_eq!(
        statuses[2],
        &ProductStatus::Alias {
            target: "neoverse-n2-r0p3".to_string()
        }
    );
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.skipped_count(), 1);
    assert!(report.has_problems());

    let n1 = &report.products[0];
    assert_eq!((n1.events, n1.metrics, n1.groups), (1, 1, 1));
    assert_eq!(n1.diagnostics[0].record, "broken");

    let n1_at = text.find("// Product configuration for: neoverse-n1").unwrap();
    let v9_at = text.find("neoverse-v9.json").unwrap();
    let alias_at = text
        .find("WPERF_TS_ALIAS(\"neoverse-n2\",\"neoverse-n2-r0p3\")\n\n")
        .unwrap();
    assert!(n1_at < v9_at && v9_at < alias_at);
    assert!(text.contains("\"stall_backend cpu_cycles / 100 *\""));
    assert!(!text.contains("broken"));
}

#[test]
fn output_is_byte_stable_across_runs() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "neoverse", "neoverse-n1.json", N1);
    let config = directory_config(dir.path(), &["neoverse-n1.json"]);
    let source = DirectorySource::new(dir.path());

    let mut first = Vec::new();
    let mut second = Vec::new();
    run_telemetry(&config, &source, &mut first).unwrap();
    run_telemetry(&config, &source, &mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn license_header_comes_first() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "neoverse", "neoverse-n1.json", N1);
    let license = dir.path().join("LICENSE");
    fs::write(&license, "BSD 3-Clause License\n\nCopyright (c) 2024\n").unwrap();

    let mut config = directory_config(dir.path(), &["neoverse-n1.json"]);
    config.license = Some(license);
    let source = DirectorySource::new(dir.path());
    let mut out = Vec::new();
    run_telemetry(&config, &source, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("// BSD 3-Clause License\n//\n// Copyright (c) 2024\n\n// "));
}

#[test]
fn cpu_filter_selects_one_product() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "neoverse", "neoverse-n1.json", N1);
    let config = directory_config(dir.path(), &["neoverse-v1.json", "neoverse-n1.json"])
        .with_overrides(ConfigOverrides {
            cpu: Some("neoverse-n1".to_string()),
            ..ConfigOverrides::default()
        })
        .unwrap();
    let source = DirectorySource::new(dir.path());
    let mut out = Vec::new();
    let report = run_telemetry(&config, &source, &mut out).unwrap();
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].product, "neoverse-n1");
}

#[test]
fn config_file_sets_source_and_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pmu-tables.toml");
    fs::write(
        &path,
        r#"
        cpu = "cortex-a78"

        [source]
        mode = "directory"
        root = "data/pmu/cpu"

        [[catalog.families]]
        name = "cortex"
        documents = ["cortex-a78.json"]
        "#,
    )
    .unwrap();

    let config = PipelineConfig::load(&path).unwrap();
    assert_eq!(config.source.label(), "data/pmu/cpu");
    assert_eq!(config.entries().unwrap()[0].family, "cortex");

    let overridden = config
        .with_overrides(ConfigOverrides {
            url: true,
            base_url: Some("https://example.com/pmu/".to_string()),
            ..ConfigOverrides::default()
        })
        .unwrap();
    assert_eq!(
        overridden.source,
        SourceConfig::Url {
            base_url: "https://example.com/pmu/".to_string()
        }
    );
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[source]\nmode = \"ftp\"\n").unwrap();
    let err = PipelineConfig::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("invalid config file"));
}

#[test]
fn arch_events_table_from_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("armv8.json");
    fs::write(
        &input,
        r#"{"events": [{"name": "SW_INCR", "code": 0}, {"name": "CPU_CYCLES", "code": 17}, {"code": 3}]}"#,
    )
    .unwrap();

    let mut out = Vec::new();
    let diagnostics = run_arch_events(input.to_str().unwrap(), None, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(diagnostics.len(), 1);
    insta::assert_snapshot!(text.trim_end(), @r#"
    WPERF_ARMV8_ARCH_EVENTS(SW_INCR,                                          0x0000, "sw_incr")
    WPERF_ARMV8_ARCH_EVENTS(CPU_CYCLES,                                       0x0011, "cpu_cycles")
    "#);
}
