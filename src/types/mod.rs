pub mod analysis;
pub mod component;
pub mod error;
pub mod project;
pub mod utils;

pub use analysis::*;
pub use component::*;
pub use error::{
    EngineError, EngineErrorKind, ErrorCategory, ForgeError, Result, ResultExt, ValidationError,
    ValidationErrorKind,
};
pub use project::*;
pub use utils::{
    camel_case, capitalize_first, clamp_score, enum_to_str, kebab_case, pascal_case,
};
