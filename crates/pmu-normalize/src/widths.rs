//! Column widths for aligned table output.

use pmu_model::{Metric, MetricGroup, ProductTables};

/// Spaces added after the widest value of a column.
pub const COLUMN_GUTTER: usize = 4;

/// Characters `text` occupies between its quotes once `\`, `"` and newlines
/// are escaped.
#[must_use]
pub fn escaped_len(text: &str) -> usize {
    text.chars()
        .map(|ch| if matches!(ch, '\\' | '"' | '\n') { 2 } else { 1 })
        .sum()
}

/// Widest value (in escaped characters, unquoted) plus [`COLUMN_GUTTER`].
///
/// An empty column is just the gutter.
pub fn column_width<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    values.into_iter().map(escaped_len).max().unwrap_or(0) + COLUMN_GUTTER
}

/// Aligned columns of the events section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventWidths {
    /// Shared by the upper-case and lower-case name columns.
    pub name: usize,
}

/// Aligned columns of the metrics section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricWidths {
    pub name: usize,
    pub events: usize,
    pub formula_source: usize,
    pub formula_compiled: usize,
    pub units: usize,
}

/// Aligned columns of the metric groups section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupWidths {
    pub name: usize,
    pub members: usize,
}

/// Column widths for every aligned section of one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub events: EventWidths,
    pub metrics: MetricWidths,
    pub groups: GroupWidths,
}

impl ColumnWidths {
    /// Measure the finished tables of one product.
    #[must_use]
    pub fn measure(tables: &ProductTables) -> Self {
        let event_names: Vec<String> = tables
            .events
            .iter()
            .flat_map(|event| [event.upper_name(), event.lower_name()])
            .collect();

        let metric_events: Vec<String> = tables.metrics.iter().map(Metric::events_csv).collect();
        let sources: Vec<String> = tables
            .metrics
            .iter()
            .map(Metric::formula_source_lower)
            .collect();
        let compiled: Vec<String> = tables
            .metrics
            .iter()
            .map(Metric::formula_compiled_text)
            .collect();

        let members: Vec<String> = tables.groups.iter().map(MetricGroup::metrics_csv).collect();

        Self {
            events: EventWidths {
                name: column_width(event_names.iter().map(String::as_str)),
            },
            metrics: MetricWidths {
                name: column_width(tables.metrics.iter().map(|m| m.name.as_str())),
                events: column_width(metric_events.iter().map(String::as_str)),
                formula_source: column_width(sources.iter().map(String::as_str)),
                formula_compiled: column_width(compiled.iter().map(String::as_str)),
                units: column_width(tables.metrics.iter().map(|m| m.units.as_str())),
            },
            groups: GroupWidths {
                name: column_width(tables.groups.iter().map(|g| g.name.as_str())),
                members: column_width(members.iter().map(String::as_str)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_width_counts_characters() {
        assert_eq!(column_width(["ab", "abcd", "a"]), 8);
        assert_eq!(column_width(["µs"]), 6);
        assert_eq!(column_width(std::iter::empty()), COLUMN_GUTTER);
    }

    #[test]
    fn test_column_width_counts_escapes() {
        assert_eq!(escaped_len(r#"a"""b"#), 8);
        assert_eq!(escaped_len("a\\b\nc"), 7);
        assert_eq!(column_width([r#"a"""b"#, "abcdef"]), 12);
    }
}
