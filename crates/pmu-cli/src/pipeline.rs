//! Telemetry pipeline with explicit stages.
//!
//! For every selected product, strictly in catalog order:
//! 1. **Load**: fetch the document and classify it (structured or alias)
//! 2. **Normalize**: extract typed records, compile formulas, measure widths
//! 3. **Emit**: write the product's macro lines to the output stream
//!
//! A product that cannot be retrieved is reported and skipped; only a failure
//! to write the output stream stops the run.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pmu_ingest::{DocumentSource, LoadedDocument, ProductEntry, load_document, read_location};
use pmu_normalize::{Diagnostic, normalize, normalize_arch_events};
use pmu_output::TableEmitter;
use tracing::{error, info, info_span};

use crate::config::PipelineConfig;

/// Outcome of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductStatus {
    /// Structured document emitted.
    Emitted,
    /// Alias line emitted.
    Alias { target: String },
    /// Document could not be retrieved; only the location line was written.
    Failed { reason: String },
}

/// Per-product summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReport {
    pub product: String,
    pub location: String,
    pub status: ProductStatus,
    pub events: usize,
    pub metrics: usize,
    pub groups: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProductReport {
    fn new(entry: &ProductEntry, location: String, status: ProductStatus) -> Self {
        Self {
            product: entry.product.clone(),
            location,
            status,
            events: 0,
            metrics: 0,
            groups: 0,
            diagnostics: Vec::new(),
        }
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub products: Vec<ProductReport>,
}

impl RunReport {
    /// Products whose document could not be retrieved.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.products
            .iter()
            .filter(|p| matches!(p.status, ProductStatus::Failed { .. }))
            .count()
    }

    /// Records left out across all products.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.products.iter().map(|p| p.diagnostics.len()).sum()
    }

    /// True when any product failed or any record was skipped.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.failed_count() > 0 || self.skipped_count() > 0
    }
}

/// Read the license header file, if configured.
///
/// # Errors
///
/// Fails when the file cannot be read.
pub fn read_license(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|path| {
        fs::read_to_string(path).with_context(|| format!("read license file {}", path.display()))
    })
    .transpose()
}

/// Run the telemetry pipeline over every selected product.
///
/// # Errors
///
/// Fails on configuration problems detected up front and on any write error.
pub fn run_telemetry<W: Write>(
    config: &PipelineConfig,
    source: &dyn DocumentSource,
    out: W,
) -> Result<RunReport> {
    let entries = config.entries()?;
    let license = read_license(config.license.as_deref())?;

    let mut emitter = TableEmitter::new(out);
    if let Some(text) = &license {
        emitter.license(text).context("write license header")?;
    }

    let mut report = RunReport::default();
    for entry in &entries {
        let span = info_span!("product", product = %entry.product);
        let _guard = span.enter();
        let product = process_product(&mut emitter, source, entry)
            .with_context(|| format!("write tables for {}", entry.product))?;
        report.products.push(product);
    }
    emitter.flush().context("flush output")?;

    info!(
        products = report.products.len(),
        failed = report.failed_count(),
        skipped = report.skipped_count(),
        "telemetry run complete"
    );
    Ok(report)
}

fn process_product<W: Write>(
    emitter: &mut TableEmitter<W>,
    source: &dyn DocumentSource,
    entry: &ProductEntry,
) -> std::io::Result<ProductReport> {
    let location = source.locate(entry);
    emitter.location(&location)?;

    let document = match load_document(source, entry) {
        Ok(document) => document,
        Err(err) => {
            if err.is_retrieval_failure() {
                error!(%location, error = %err, "document unavailable");
            } else {
                error!(%location, error = %err, "document unreadable");
            }
            let status = ProductStatus::Failed {
                reason: err.to_string(),
            };
            return Ok(ProductReport::new(entry, location, status));
        }
    };

    match document {
        LoadedDocument::Alias { target } => {
            info!(%target, "alias");
            emitter.alias(&entry.product, &target)?;
            Ok(ProductReport::new(
                entry,
                location,
                ProductStatus::Alias { target },
            ))
        }
        LoadedDocument::Structured(map) => {
            let normalized = normalize(&entry.product, &map);
            emitter.product(&normalized)?;
            let tables = &normalized.tables;
            info!(
                events = tables.events.len(),
                metrics = tables.metrics.len(),
                groups = tables.groups.len(),
                "emitted"
            );
            let mut report = ProductReport::new(entry, location, ProductStatus::Emitted);
            report.events = tables.events.len();
            report.metrics = tables.metrics.len();
            report.groups = tables.groups.len();
            report.diagnostics = normalized.diagnostics;
            Ok(report)
        }
    }
}

/// Render the architecture events table from a local file or URL.
///
/// Returns the skipped-entry diagnostics.
///
/// # Errors
///
/// Fails when the input cannot be read or parsed, or on any write error.
pub fn run_arch_events<W: Write>(
    input: &str,
    license: Option<&Path>,
    out: W,
) -> Result<Vec<Diagnostic>> {
    let license = read_license(license)?;
    let bytes = read_location(input).with_context(|| format!("read {input}"))?;
    let document: serde_json::Value =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {input} as JSON"))?;
    let arch = normalize_arch_events(input, &document);

    let mut emitter = TableEmitter::new(out);
    if let Some(text) = &license {
        emitter.license(text).context("write license header")?;
    }
    emitter
        .arch_events(&arch.events)
        .context("write architecture events")?;
    emitter.flush().context("flush output")?;

    info!(
        events = arch.events.len(),
        skipped = arch.diagnostics.len(),
        "architecture events written"
    );
    Ok(arch.diagnostics)
}
