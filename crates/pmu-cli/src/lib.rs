//! CLI library components for the PMU table generator.

pub mod config;
pub mod logging;
pub mod pipeline;
