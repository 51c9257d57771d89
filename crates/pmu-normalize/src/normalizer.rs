//! Document → typed tables.

use pmu_model::{Event, Metric, MetricGroup, ProductConfig, ProductTables, RecordKind};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::value::{
    FieldResult, as_object, attribute, event_code, optional_names, optional_text, required_text,
};
use crate::widths::ColumnWidths;

const PRODUCT_CONFIGURATION: &str = "product_configuration";
const EVENTS: &str = "events";
const METRICS: &str = "metrics";
const GROUPS: &str = "groups";
const GROUP_METRICS: &str = "metrics";

/// One product's tables, ready to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedProduct {
    pub tables: ProductTables,
    pub widths: ColumnWidths,
    /// Records left out of `tables`, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizedProduct {
    /// True when nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Extract every record of `document` for `product`.
///
/// Never fails as a whole: malformed records and sections become
/// [`Diagnostic`]s and the rest of the document is still processed.
#[must_use]
pub fn normalize(product: &str, document: &Map<String, Value>) -> NormalizedProduct {
    let mut normalizer = Normalizer::new(product);
    let tables = ProductTables {
        product: product.to_string(),
        config: normalizer.product_config(document.get(PRODUCT_CONFIGURATION)),
        events: normalizer.events(document.get(EVENTS)),
        metrics: normalizer.metrics(document.get(METRICS)),
        groups: normalizer.groups(document.get(GROUPS)),
    };
    let widths = ColumnWidths::measure(&tables);
    debug!(
        product,
        events = tables.events.len(),
        metrics = tables.metrics.len(),
        groups = tables.groups.len(),
        skipped = normalizer.diagnostics.len(),
        "normalized product"
    );
    NormalizedProduct {
        tables,
        widths,
        diagnostics: normalizer.diagnostics,
    }
}

struct Normalizer<'a> {
    product: &'a str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Normalizer<'a> {
    fn new(product: &'a str) -> Self {
        Self {
            product,
            diagnostics: Vec::new(),
        }
    }

    fn skip(&mut self, kind: RecordKind, record: &str, reason: String) {
        warn!(
            product = self.product,
            kind = %kind,
            record,
            reason = %reason,
            "skipping record"
        );
        self.diagnostics
            .push(Diagnostic::new(self.product, kind, record, reason));
    }

    /// Section as an object; `None` when absent or rejected.
    fn section<'v>(
        &mut self,
        kind: RecordKind,
        name: &str,
        value: Option<&'v Value>,
    ) -> Option<&'v Map<String, Value>> {
        match as_object(value?) {
            Ok(map) => Some(map),
            Err(reason) => {
                self.skip(kind, name, format!("section {reason}"));
                None
            }
        }
    }

    /// Collect records of one section, keeping declaration order.
    fn collect<T>(
        &mut self,
        kind: RecordKind,
        section: Option<&Map<String, Value>>,
        build: impl Fn(&str, &Map<String, Value>) -> FieldResult<T>,
    ) -> Vec<T> {
        let Some(section) = section else {
            return Vec::new();
        };
        let mut records = Vec::with_capacity(section.len());
        for (name, value) in section {
            let built = if name.is_empty() {
                Err("record name is empty".to_string())
            } else {
                as_object(value).and_then(|record| build(name, record))
            };
            match built {
                Ok(record) => records.push(record),
                Err(reason) => self.skip(kind, name, reason),
            }
        }
        records
    }

    fn product_config(&mut self, value: Option<&Value>) -> Option<ProductConfig> {
        let kind = RecordKind::ProductConfig;
        let section = self.section(kind, PRODUCT_CONFIGURATION, value)?;
        let mut config = ProductConfig::new(self.product);
        for (key, value) in section {
            match attribute(value) {
                Ok(value) => {
                    config.attributes.insert(key.clone(), value);
                }
                Err(reason) => self.skip(kind, key, reason),
            }
        }
        Some(config)
    }

    fn events(&mut self, value: Option<&Value>) -> Vec<Event> {
        let section = self.section(RecordKind::Event, EVENTS, value);
        self.collect(RecordKind::Event, section, |name, record| {
            Ok(Event {
                name: name.to_string(),
                code: event_code(record)?,
                title: optional_text(record, "title")?,
                description: optional_text(record, "description")?,
            })
        })
    }

    fn metrics(&mut self, value: Option<&Value>) -> Vec<Metric> {
        let section = self.section(RecordKind::Metric, METRICS, value);
        self.collect(RecordKind::Metric, section, |name, record| {
            let formula = required_text(record, "formula")?;
            Metric::new(
                name,
                formula,
                optional_names(record, "events")?,
                optional_text(record, "units")?,
                optional_text(record, "title")?,
            )
            .map_err(|err| format!("invalid formula: {err}"))
        })
    }

    fn groups(&mut self, value: Option<&Value>) -> Vec<MetricGroup> {
        let kind = RecordKind::MetricGroup;
        let groups = self.section(kind, GROUPS, value);
        let section = self.section(
            kind,
            "groups.metrics",
            groups.and_then(|g| g.get(GROUP_METRICS)),
        );
        self.collect(kind, section, |name, record| {
            Ok(MetricGroup {
                name: name.to_string(),
                metrics: optional_names(record, "metrics")?,
                title: optional_text(record, "title")?,
                description: optional_text(record, "description")?,
            })
        })
    }
}
