//! CLI library components for the campaign KPI tool.

pub mod input;
pub mod logging;
