//! Reporting Engine
//!
//! Health, architecture, executive-summary and migration reports over the
//! results of the other engines.
//!
//! ## Pipeline
//!
//! ```text
//! AnalysisResult / MigrationResult
//!        |
//!        v
//! ReportDocument (sections + data)
//!        |
//!        +-- plain / markdown / html -> layout template (html values escaped)
//!        +-- json                    -> serde_json pretty output
//! ```
//!
//! Rendering never fails from the caller's point of view: the `generate_*`
//! methods return an error report instead. `export_report` is the exception
//! and surfaces I/O errors.

mod charts;
mod context;
mod engine;
mod smells;
mod templates;
mod types;

pub use charts::{
    ChartPoint, accessibility_distribution, complexity_distribution, dependency_distribution,
    score_bar, type_distribution,
};
pub use context::recommendations;
pub use engine::ReportingEngine;
pub use smells::detect_smells;
pub use templates::{ERROR_HEADING, builtin as builtin_templates, error_report, escape_html};
pub use types::*;
