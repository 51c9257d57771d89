//! Metrics and metric groups.

use pmu_formula::{FormulaSyntaxError, Postfix, compile};

/// Join names with `,` after lower-casing each one.
#[must_use]
pub fn join_lower(names: &[String]) -> String {
    names
        .iter()
        .map(|name| name.to_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

/// A derived metric.
///
/// `formula_compiled` is always the compiler's output for `formula_source`;
/// [`Metric::new`] is the only way to obtain a [`Postfix`] for it.
/// `events` is the document's declared event list, not re-derived from the
/// formula text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub name: String,
    pub formula_source: String,
    pub formula_compiled: Postfix,
    pub events: Vec<String>,
    pub units: String,
    pub title: String,
}

impl Metric {
    /// Build a metric, compiling its formula.
    ///
    /// # Errors
    ///
    /// Returns the compiler's [`FormulaSyntaxError`] for a malformed formula.
    pub fn new(
        name: impl Into<String>,
        formula: impl Into<String>,
        events: Vec<String>,
        units: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, FormulaSyntaxError> {
        let formula_source = formula.into();
        let formula_compiled = compile(&formula_source)?;
        Ok(Self {
            name: name.into(),
            formula_source,
            formula_compiled,
            events,
            units: units.into(),
            title: title.into(),
        })
    }

    /// Declared events, lower-cased and comma-joined.
    #[must_use]
    pub fn events_csv(&self) -> String {
        join_lower(&self.events)
    }

    /// Formula source, lower-cased.
    #[must_use]
    pub fn formula_source_lower(&self) -> String {
        self.formula_source.to_lowercase()
    }

    /// Compiled postfix formula as a space-separated token string.
    #[must_use]
    pub fn formula_compiled_text(&self) -> String {
        self.formula_compiled.to_string()
    }
}

/// A named collection of metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricGroup {
    pub name: String,
    pub metrics: Vec<String>,
    pub title: String,
    pub description: String,
}

impl MetricGroup {
    /// Member metric names, lower-cased and comma-joined.
    #[must_use]
    pub fn metrics_csv(&self) -> String {
        join_lower(&self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_compiles_formula() {
        let metric = Metric::new(
            "backend_stalled_cycles",
            "((stall_backend / cpu_cycles) * 100)",
            vec!["CPU_CYCLES".to_string(), "STALL_BACKEND".to_string()],
            "percent of cycles",
            "Backend Stalled Cycles",
        )
        .unwrap();
        assert_eq!(
            metric.formula_compiled_text(),
            "stall_backend cpu_cycles / 100 *"
        );
        assert_eq!(metric.events_csv(), "cpu_cycles,stall_backend");
    }

    #[test]
    fn test_metric_rejects_bad_formula() {
        let err = Metric::new("broken", "(a + b", Vec::new(), "", "").unwrap_err();
        assert_eq!(err, FormulaSyntaxError::UnbalancedParentheses { position: 0 });
    }

    #[test]
    fn test_declared_events_are_kept_verbatim() {
        // Aliases in the declared list need not appear in the formula.
        let metric = Metric::new(
            "ipc",
            "INST_RETIRED / CPU_CYCLES",
            vec!["INST_RETIRED".to_string(), "CYCLES_ALIAS".to_string()],
            "per cycle",
            "IPC",
        )
        .unwrap();
        assert_eq!(metric.events_csv(), "inst_retired,cycles_alias");
        assert_eq!(metric.formula_source_lower(), "inst_retired / cpu_cycles");
    }

    #[test]
    fn test_group_csv() {
        let group = MetricGroup {
            name: "Topdown_L1".to_string(),
            metrics: vec!["Frontend_Bound".to_string(), "backend_bound".to_string()],
            title: String::new(),
            description: String::new(),
        };
        assert_eq!(group.metrics_csv(), "frontend_bound,backend_bound");
    }
}
