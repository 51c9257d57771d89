//! Entity normalization for PMU description documents.
//!
//! Walks one product's generic JSON document and extracts the four record
//! kinds of [`pmu_model`], then measures per-column widths so the emitter can
//! align every line of a section on the same boundaries.
//!
//! # Overview
//!
//! - **Sections**: `product_configuration`, `events`, `metrics` and
//!   `groups.metrics` are all optional; a missing section is an empty table
//! - **Formulas**: each metric formula is compiled; a bad formula drops that
//!   metric only and is reported as a [`Diagnostic`]
//! - **Widths**: measured after extraction, fresh for every product, so one
//!   product's data never moves another product's columns
//!
//! # Example
//!
//! ```ignore
//! use pmu_normalize::normalize;
//!
//! let normalized = normalize("neoverse-n1", &document);
//! for diagnostic in &normalized.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

mod arch;
mod diagnostic;
mod normalizer;
mod value;
mod widths;

pub use arch::{ArchEvents, normalize_arch_events};
pub use diagnostic::Diagnostic;
pub use normalizer::{NormalizedProduct, normalize};
pub use widths::{
    COLUMN_GUTTER, ColumnWidths, EventWidths, GroupWidths, MetricWidths, column_width, escaped_len,
};
