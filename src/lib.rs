//! uiforge - Frontend Project Analysis, Generation and Migration
//!
//! Inspects JavaScript/TypeScript UI projects, scaffolds new components and
//! pages, runs phased framework migrations with backup and rollback, and
//! renders reports about what it found.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use uiforge::{AnalysisEngine, LocalFileSystem, ReportingEngine};
//! use uiforge::reporting::{ReportInput, ReportKind};
//!
//! let fs = Arc::new(LocalFileSystem::new());
//! let analysis = AnalysisEngine::new(&root, fs.clone(), config.analysis.clone())
//!     .analyze_project()
//!     .await?;
//! let reports = ReportingEngine::new(&root, fs, config.reporting.clone())?;
//! println!("{}", reports.generate(ReportKind::Health, ReportInput::Analysis(&analysis)));
//! ```
//!
//! ## Modules
//!
//! - [`analysis`]: manifest parsing, framework detection, quality scoring
//! - [`heuristics`]: source-level component heuristics
//! - [`template`]: the `{{...}}` template language
//! - [`generation`]: component, page and project scaffolding
//! - [`migration`]: phased migrations with backup and rollback
//! - [`reporting`]: health, architecture, executive and migration reports
//! - [`fs`]: file system abstraction shared by all engines

pub mod analysis;
pub mod cli;
pub mod config;
pub mod constants;
pub mod fs;
pub mod generation;
pub mod heuristics;
pub mod migration;
pub mod reporting;
pub mod template;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ReportFormat};

// Error Types
pub use types::error::{ErrorCategory, ForgeError, Result, ResultExt};

// File System
pub use fs::{FileSystem, LocalFileSystem, MemoryFileSystem, SharedFileSystem};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use analysis::AnalysisEngine;
pub use generation::GenerationEngine;
pub use migration::{MigrationEngine, MigrationPlan, MigrationResult};
pub use reporting::ReportingEngine;
pub use template::TemplateRegistry;
