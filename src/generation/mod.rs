//! Generation Engine
//!
//! Produces React components, pages and project skeletons from either a
//! free-text description or a structured [`GenerationSpec`].
//!
//! ## Policy
//!
//! - Generated files are returned as values; the engine never writes them
//! - Vague or empty descriptions still yield a scaffold plus a warning
//! - Missing names and template failures come back as `success: false`
//!
//! ## Template Selection
//!
//! | Target | Variant |
//! |--------|---------|
//! | component | styling approach, or `native` on the native platform |
//! | page | layout (`default`, `dashboard`, `landing`, `auth`) |
//! | project | file kind (`readme`, `tailwind`, `types`) |
//!
//! Unknown variants fall back to `<target>.default`.

mod description;
mod engine;
mod templates;
mod types;

pub use description::{DescriptionAnalysis, parse_description};
pub use engine::{GenerationEngine, NO_REQUIREMENTS_WARNING};
pub use templates::builtin as builtin_templates;
pub use types::*;
