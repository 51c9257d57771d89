use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pmu_ingest::ProductEntry;
use pmu_normalize::Diagnostic;
use tracing::info;

use pmu_cli::config::{ConfigOverrides, PipelineConfig};
use pmu_cli::pipeline::{RunReport, run_arch_events, run_telemetry};

use crate::cli::{ArchEventsArgs, ListArgs, TelemetryArgs};

pub fn run_telemetry_command(args: &TelemetryArgs) -> Result<RunReport> {
    let config = load_config(args.config.as_deref())?.with_overrides(ConfigOverrides {
        url: args.url,
        file: args.file,
        source_root: args.source_root.clone(),
        base_url: args.base_url.clone(),
        cpu: args.cpu.clone(),
        output: args.output.clone(),
        license: args.license.clone(),
    })?;
    config.validate()?;
    info!(source = %config.source.label(), "starting telemetry run");

    let source = config.document_source()?;
    let out = open_output(config.output.as_deref())?;
    run_telemetry(&config, source.as_ref(), out)
}

pub fn run_list(args: &ListArgs) -> Result<Vec<ProductEntry>> {
    let config = load_config(args.config.as_deref())?;
    Ok(config.catalog.entries())
}

pub fn run_arch_events_command(args: &ArchEventsArgs) -> Result<Vec<Diagnostic>> {
    let out = open_output(args.output.as_deref())?;
    run_arch_events(&args.input, args.license.as_deref(), out)
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => Ok(PipelineConfig::load(path)?),
        None => Ok(PipelineConfig::default()),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
