//! Service coordination for a complete rating run
//!
//! Wires the engine, table and view builder together from configuration.

pub mod report;

pub use report::{ReportService, RunReport};
