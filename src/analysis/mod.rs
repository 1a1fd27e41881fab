//! Analysis Engine
//!
//! Static, heuristic analysis of a React code base:
//!
//! 1. Read and parse the manifest (`package.json`)
//! 2. Detect the framework from its dependency signature
//! 3. Discover source files through the [`FileSystem`](crate::fs::FileSystem) boundary
//! 4. Run the source heuristics over every readable file
//! 5. Infer architecture facts and score project quality
//!
//! A missing or malformed manifest is fatal. Unreadable files are recorded
//! and skipped.

mod architecture;
mod engine;
mod framework;
mod manifest;
mod quality;

pub use architecture::detect_architecture;
pub use engine::AnalysisEngine;
pub use framework::{categorize, collect_dependencies, detect_framework};
pub use manifest::{Manifest, is_unpinned, normalize_version};
pub use quality::{QualityInputs, assess};
