//! Migration Engine
//!
//! Applies a [`MigrationPlan`] of text transformations to component files.
//!
//! ## Run Lifecycle
//!
//! ```text
//! idle -> backing-up -> executing-phases -> completed
//!                  \                  \
//!                   +-> aborted        +-> aborted (high-risk phase failed)
//! ```
//!
//! - Phases run in dependency order, ties broken by priority
//! - A phase's writes are staged and committed only when every
//!   transformation succeeded on every target
//! - Dry runs skip the backup and write nothing; later phases see the
//!   previewed content of earlier ones
//! - Rollback verifies each file's checksum before restoring it

mod backup;
mod engine;
mod mapping;
mod ordering;
mod transform;
mod types;

pub use backup::BACKUP_NOT_FOUND;
pub use engine::{
    DEPENDENCIES_NOT_SATISFIED, DRY_RUN_WARNING, MigrationEngine, TARGET_OUTSIDE_ROOT, VALIDATION_FAILED,
};
pub use mapping::{ComponentMapping, generate_component_mapping};
pub use ordering::order_phases;
pub use transform::apply as apply_transformation;
pub use types::*;
