//! Streaming macro-table writer.

use std::io::{self, Write};

use pmu_model::{Event, Metric, MetricGroup, ProductConfig};
use pmu_normalize::{EventWidths, GroupWidths, MetricWidths, NormalizedProduct};
use tracing::trace;

use crate::format::{align, config_field, macro_line, quote};
use crate::macros::{
    ALIAS_MACRO, ARCH_EVENTS_MACRO, ARCH_NAME_WIDTH, EVENTS_MACRO, EVENT_CODE_DIGITS,
    GROUPS_MACRO, METRICS_MACRO, PRODUCT_CONFIGURATION_MACRO,
};

/// Writes macro-table text to any [`Write`] destination.
///
/// The emitter holds no state besides the writer, so emitting the same
/// tables twice yields the same bytes.
#[derive(Debug)]
pub struct TableEmitter<W: Write> {
    out: W,
}

impl<W: Write> TableEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn comment(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "// {text}")
    }

    fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn line(&mut self, name: &str, fields: &[String]) -> io::Result<()> {
        writeln!(self.out, "{}", macro_line(name, fields))
    }

    /// Header block: every line commented, then a blank line.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn license(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            if line.is_empty() {
                writeln!(self.out, "//")?;
            } else {
                self.comment(line)?;
            }
        }
        self.blank()
    }

    /// `// <location>` line naming where a product came from.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn location(&mut self, location: &str) -> io::Result<()> {
        self.comment(location)
    }

    /// Alias line for a product whose document points at another product.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn alias(&mut self, product: &str, target: &str) -> io::Result<()> {
        self.line(ALIAS_MACRO, &[quote(product), quote(target)])?;
        self.blank()
    }

    /// All four sections of one product.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn product(&mut self, normalized: &NormalizedProduct) -> io::Result<()> {
        let tables = &normalized.tables;
        let product = tables.product.as_str();
        trace!(product, "emitting product tables");

        self.comment(&format!("Product configuration for: {product}"))?;
        if let Some(config) = &tables.config {
            self.product_config(config)?;
        }
        self.blank()?;

        self.comment(&format!("Events for: {product}"))?;
        for event in &tables.events {
            self.event(product, event, normalized.widths.events)?;
        }
        self.blank()?;

        self.comment(&format!("Metrics for: {product}"))?;
        for metric in &tables.metrics {
            self.metric(product, metric, normalized.widths.metrics)?;
        }
        self.blank()?;

        self.comment(&format!("Metric Groups for: {product}"))?;
        for group in &tables.groups {
            self.group(product, group, normalized.widths.groups)?;
        }
        self.blank()
    }

    fn product_config(&mut self, config: &ProductConfig) -> io::Result<()> {
        let columns: Vec<&str> = std::iter::once("name").chain(config.keys()).collect();
        self.comment(&columns.join(","))?;

        let fields: Vec<String> = std::iter::once(quote(&config.product))
            .chain(config.attributes.values().map(config_field))
            .collect();
        self.line(PRODUCT_CONFIGURATION_MACRO, &fields)
    }

    fn event(&mut self, product: &str, event: &Event, widths: EventWidths) -> io::Result<()> {
        let fields = [
            quote(product),
            align(&event.upper_name(), widths.name),
            event.code.to_hex(EVENT_CODE_DIGITS),
            align(&quote(&event.lower_name()), widths.name),
            quote(&event.title),
            quote(&event.description),
        ];
        self.line(EVENTS_MACRO, &fields)
    }

    fn metric(&mut self, product: &str, metric: &Metric, widths: MetricWidths) -> io::Result<()> {
        let fields = [
            quote(product),
            align(&quote(&metric.name), widths.name),
            align(&quote(&metric.events_csv()), widths.events),
            align(&quote(&metric.formula_source_lower()), widths.formula_source),
            align(&quote(&metric.formula_compiled_text()), widths.formula_compiled),
            align(&quote(&metric.units), widths.units),
            quote(&metric.title),
        ];
        self.line(METRICS_MACRO, &fields)
    }

    fn group(&mut self, product: &str, group: &MetricGroup, widths: GroupWidths) -> io::Result<()> {
        let fields = [
            quote(product),
            align(&quote(&group.name), widths.name),
            align(&quote(&group.metrics_csv()), widths.members),
            quote(&group.title),
            quote(&group.description),
        ];
        self.line(GROUPS_MACRO, &fields)
    }

    /// Architecture events table, one line per event.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn arch_events(&mut self, events: &[Event]) -> io::Result<()> {
        for event in events {
            writeln!(
                self.out,
                "{ARCH_EVENTS_MACRO}({}{}, {})",
                align(&format!("{},", event.name), ARCH_NAME_WIDTH),
                event.code.to_hex(EVENT_CODE_DIGITS),
                quote(&event.lower_name()),
            )?;
        }
        Ok(())
    }
}

fn render(emit: impl FnOnce(&mut TableEmitter<Vec<u8>>) -> io::Result<()>) -> String {
    let mut emitter = TableEmitter::new(Vec::new());
    // Writing into a Vec cannot fail.
    let _ = emit(&mut emitter);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

/// Render one product's sections to a string.
#[must_use]
pub fn render_product(normalized: &NormalizedProduct) -> String {
    render(|emitter| emitter.product(normalized))
}

/// Render the architecture events table to a string.
#[must_use]
pub fn render_arch_events(events: &[Event]) -> String {
    render(|emitter| emitter.arch_events(events))
}
