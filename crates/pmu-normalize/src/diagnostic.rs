//! Skipped-record reports.

use std::fmt;

use pmu_model::RecordKind;

/// A record (or attribute) that was left out of a product's tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub product: String,
    pub kind: RecordKind,
    /// Record name, or the section name when a whole section was rejected.
    pub record: String,
    pub reason: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        product: impl Into<String>,
        kind: RecordKind,
        record: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            kind,
            record: record.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: skipped {} '{}': {}",
            self.product, self.kind, self.record, self.reason
        )
    }
}
