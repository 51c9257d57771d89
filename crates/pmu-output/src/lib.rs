//! Macro-table rendering.
//!
//! Turns normalized product tables into the line-oriented macro table read
//! by the downstream build. Every record is one `NAME(field,field,...)` line;
//! aligned fields are padded with trailing spaces to the widths measured by
//! the normalizer, so output for the same tables is byte-identical on every
//! run.
//!
//! # Per-product layout
//!
//! ```text
//! // <location>
//! // Product configuration for: <product>
//! // name,<sorted keys>
//! WPERF_TS_PRODUCT_CONFIGURATION(...)
//!
//! // Events for: <product>
//! WPERF_TS_EVENTS(...)
//!
//! // Metrics for: <product>
//! WPERF_TS_METRICS(...)
//!
//! // Metric Groups for: <product>
//! WPERF_TS_GROUPS_METRICS(...)
//!
//! ```

mod emitter;
mod format;
mod macros;

pub use emitter::{TableEmitter, render_arch_events, render_product};
pub use format::{align, config_field, macro_line, quote};
pub use macros::{
    ALIAS_MACRO, ARCH_EVENTS_MACRO, ARCH_NAME_WIDTH, EVENTS_MACRO, EVENT_CODE_DIGITS,
    GROUPS_MACRO, METRICS_MACRO, PRODUCT_CONFIGURATION_MACRO,
};
