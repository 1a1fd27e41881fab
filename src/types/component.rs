//! Component-level type definitions
//!
//! Facts derived from the static text of a single source file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Classification of a source file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Page,
    Component,
    Hook,
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page => write!(f, "page"),
            Self::Component => write!(f, "component"),
            Self::Hook => write!(f, "hook"),
        }
    }
}

/// A declared prop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
    pub optional: bool,
}

impl PropInfo {
    pub fn new(name: impl Into<String>, prop_type: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            prop_type: prop_type.into(),
            optional,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComplexityMetrics {
    pub cyclomatic: u32,
    /// Normalized to 0-100
    pub maintainability_index: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessibilityReport {
    pub score: u8,
    pub issues: Vec<String>,
}

/// Everything the analysis knows about one component file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentInfo {
    pub name: String,
    pub file_path: PathBuf,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub props: Vec<PropInfo>,
    pub state: Vec<String>,
    pub dependencies: Vec<String>,
    pub complexity: ComplexityMetrics,
    pub accessibility: AccessibilityReport,
    pub lines_of_code: usize,
    pub has_documentation: bool,
    pub has_tests: bool,
}
