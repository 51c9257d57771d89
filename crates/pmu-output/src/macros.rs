//! Macro names and fixed layout constants.

pub const ALIAS_MACRO: &str = "WPERF_TS_ALIAS";
pub const PRODUCT_CONFIGURATION_MACRO: &str = "WPERF_TS_PRODUCT_CONFIGURATION";
pub const EVENTS_MACRO: &str = "WPERF_TS_EVENTS";
pub const METRICS_MACRO: &str = "WPERF_TS_METRICS";
pub const GROUPS_MACRO: &str = "WPERF_TS_GROUPS_METRICS";
pub const ARCH_EVENTS_MACRO: &str = "WPERF_ARMV8_ARCH_EVENTS";

/// Minimum hex digits of an event code.
pub const EVENT_CODE_DIGITS: usize = 4;

/// Column width of `NAME,` in the architecture events table.
pub const ARCH_NAME_WIDTH: usize = 50;
