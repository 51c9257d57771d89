//! Product configuration and the per-product record set.

use std::collections::BTreeMap;
use std::fmt;

use crate::event::Event;
use crate::metric::{Metric, MetricGroup};

/// Scalar value of a product configuration attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Product-wide attributes (architecture, PMU counter count, ...).
///
/// Attributes are kept in a `BTreeMap`, so iteration is always in sorted key
/// order regardless of document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductConfig {
    pub product: String,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl ProductConfig {
    #[must_use]
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Attribute keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

/// Record kinds, in the order their sections are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    ProductConfig,
    Event,
    Metric,
    MetricGroup,
}

impl RecordKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProductConfig => "product configuration",
            Self::Event => "event",
            Self::Metric => "metric",
            Self::MetricGroup => "metric group",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// All records for one product, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductTables {
    pub product: String,
    /// `None` when the document has no product configuration section.
    pub config: Option<ProductConfig>,
    pub events: Vec<Event>,
    pub metrics: Vec<Metric>,
    pub groups: Vec<MetricGroup>,
}

impl ProductTables {
    #[must_use]
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            ..Self::default()
        }
    }

    /// Total number of records across all kinds.
    #[must_use]
    pub fn record_count(&self) -> usize {
        usize::from(self.config.is_some())
            + self.events.len()
            + self.metrics.len()
            + self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_iterate_sorted() {
        let config = ProductConfig::new("neoverse-n1")
            .with_attribute("pmu_architecture", "armv8.2")
            .with_attribute("architecture", "armv8.2-a")
            .with_attribute("num_slots", 8_i64);
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["architecture", "num_slots", "pmu_architecture"]);
    }

    #[test]
    fn test_attribute_display() {
        assert_eq!(AttributeValue::from(8_i64).to_string(), "8");
        assert_eq!(AttributeValue::from("armv8").to_string(), "armv8");
    }

    #[test]
    fn test_record_count() {
        let mut tables = ProductTables::new("neoverse-v1");
        assert_eq!(tables.record_count(), 0);
        tables.config = Some(ProductConfig::new("neoverse-v1"));
        assert_eq!(tables.record_count(), 1);
    }
}
