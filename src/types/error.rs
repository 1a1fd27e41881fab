//! Unified Error Type System
//!
//! Centralized error types for every engine.
//!
//! ## Error Categories
//!
//! - **Fatal**: aborts the operation, no partial result (manifest missing or malformed)
//! - **Recorded**: logged into a result and processing continues (unreadable file, skipped target)
//! - **Escalating**: stops the remainder of a run but still yields a result (high-risk phase)
//! - **Validation**: input rejected, surfaced as a result field
//! - **Io**: write-boundary failures that must reach the caller
//!
//! ## Design Principles
//!
//! - Single error type (`ForgeError`) for fallible operations
//! - `EngineError` values for errors carried inside engine results
//! - No panic/unwrap - all errors are recoverable

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories mirroring how each engine reacts to a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Aborts the whole operation
    Fatal,
    /// Recorded in the result, processing continues
    Recorded,
    /// Stops remaining work, a result is still returned
    Escalating,
    /// Rejected input
    Validation,
    /// Raw I/O failure at a write boundary
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fatal => write!(f, "FATAL"),
            Self::Recorded => write!(f, "RECORDED"),
            Self::Escalating => write!(f, "ESCALATING"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Io => write!(f, "IO"),
        }
    }
}

impl ErrorCategory {
    /// Whether an error of this category ends the current operation
    pub fn is_aborting(&self) -> bool {
        matches!(self, Self::Fatal | Self::Escalating | Self::Io)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Shorthand for a missing required field
    pub fn missing_field(field: &str, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::MissingField, message).with_field(field)
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing
    MissingField,
    /// Invalid format
    Format,
    /// Value out of range
    Range,
    /// General validation error
    General,
}

// =============================================================================
// Engine Error (carried inside results)
// =============================================================================

/// Kind of an error recorded inside an engine result
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineErrorKind {
    Validation,
    Template,
    Io,
    Transformation,
    Dependency,
    Backup,
}

/// Error value stored in `GenerationResult` / `MigrationResult`
///
/// Displays as its bare message so callers can match on the exact text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineError {
    pub kind: EngineErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            EngineErrorKind::Validation => ErrorCategory::Validation,
            EngineErrorKind::Io | EngineErrorKind::Backup => ErrorCategory::Io,
            EngineErrorKind::Template
            | EngineErrorKind::Transformation
            | EngineErrorKind::Dependency => ErrorCategory::Recorded,
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EngineError {}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        Self::new(EngineErrorKind::Validation, err.message)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ForgeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Analysis Errors
    // -------------------------------------------------------------------------
    #[error("Manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse manifest {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Template error: {0}")]
    Template(String),

    #[error("{0}")]
    Validation(ValidationError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Migration error in phase {phase}: {message}")]
    Migration { phase: String, message: String },

    #[error("Report error: {0}")]
    Report(String),
}

impl From<ValidationError> for ForgeError {
    fn from(err: ValidationError) -> Self {
        ForgeError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;

impl ForgeError {
    /// Create a migration error for a phase
    pub fn migration(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Migration {
            phase: phase.into(),
            message: message.into(),
        }
    }

    /// Classify this error per the engine error taxonomy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestNotFound { .. } | Self::ManifestParse { .. } | Self::Config(_) => {
                ErrorCategory::Fatal
            }
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Migration { .. } => ErrorCategory::Escalating,
            Self::Io(_) => ErrorCategory::Io,
            Self::Json(_) | Self::Yaml(_) | Self::Template(_) | Self::Report(_) => {
                ErrorCategory::Recorded
            }
        }
    }

    /// Convert into an error value recorded inside an engine result
    pub fn to_engine_error(&self) -> EngineError {
        let kind = match self {
            Self::Validation(_) => EngineErrorKind::Validation,
            Self::Template(_) => EngineErrorKind::Template,
            Self::Io(_) => EngineErrorKind::Io,
            _ => EngineErrorKind::Transformation,
        };
        let message = match self {
            Self::Template(msg) => msg.clone(),
            other => other.to_string(),
        };
        EngineError::new(kind, message)
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            ForgeError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", context.into(), e),
            ))
        })
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            ForgeError::Io(std::io::Error::new(e.kind(), format!("{}: {}", f().into(), e)))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Fatal.to_string(), "FATAL");
        assert_eq!(ErrorCategory::Escalating.to_string(), "ESCALATING");
        assert_eq!(ErrorCategory::Io.to_string(), "IO");
    }

    #[test]
    fn test_error_category_aborting() {
        assert!(ErrorCategory::Fatal.is_aborting());
        assert!(ErrorCategory::Escalating.is_aborting());
        assert!(!ErrorCategory::Recorded.is_aborting());
        assert!(!ErrorCategory::Validation.is_aborting());
    }

    #[test]
    fn test_manifest_errors_are_fatal() {
        let not_found = ForgeError::ManifestNotFound {
            path: PathBuf::from("/tmp/app/package.json"),
        };
        let parse = ForgeError::ManifestParse {
            path: PathBuf::from("package.json"),
            message: "expected value".to_string(),
        };
        assert_eq!(not_found.category(), ErrorCategory::Fatal);
        assert_eq!(parse.category(), ErrorCategory::Fatal);
        assert!(not_found.to_string().contains("Manifest not found"));
        assert!(parse.to_string().contains("expected value"));
    }

    #[test]
    fn test_validation_error_displays_bare_message() {
        let err = ValidationError::missing_field("name", "Component name is required");
        assert_eq!(err.to_string(), "Component name is required");
        assert_eq!(err.field.as_deref(), Some("name"));

        let engine: EngineError = err.into();
        assert_eq!(engine.kind, EngineErrorKind::Validation);
        assert_eq!(engine.to_string(), "Component name is required");
    }

    #[test]
    fn test_template_error_to_engine_error_keeps_message() {
        let err = ForgeError::Template("Unclosed block '#each' at 12".to_string());
        let engine = err.to_engine_error();
        assert_eq!(engine.kind, EngineErrorKind::Template);
        assert_eq!(engine.message, "Unclosed block '#each' at 12");
    }

    #[test]
    fn test_io_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.with_context("reading Button.tsx").unwrap_err();
        assert!(err.to_string().contains("reading Button.tsx"));
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
