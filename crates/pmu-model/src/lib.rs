//! Typed records for one product's PMU description.
//!
//! A product's tables are built together in one normalization pass and are
//! never mutated afterwards:
//!
//! - [`ProductConfig`]: product name plus sorted scalar attributes
//! - [`Event`]: named PMU event with a 16-bit event code
//! - [`Metric`]: derived value with its source and compiled formula
//! - [`MetricGroup`]: named set of related metrics
//!
//! References between records (metric → event, group → metric) are by name
//! only and are not checked here.

mod event;
mod metric;
mod product;

pub use event::{Event, EventCode, EventCodeError};
pub use metric::{Metric, MetricGroup, join_lower};
pub use product::{AttributeValue, ProductConfig, ProductTables, RecordKind};
