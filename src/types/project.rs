//! Project-level type definitions
//!
//! Contains types used for project detection and classification.

use serde::{Deserialize, Serialize};

/// Name and version declared by the project manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectMeta {
    pub name: String,
    pub version: String,
}

/// Rendering model of a detected framework
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkKind {
    /// Server-side rendering capable
    Ssr,
    /// Single-page application
    Spa,
    /// Static site generator
    Static,
    #[default]
    Unknown,
}

impl std::fmt::Display for FrameworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssr => write!(f, "ssr"),
            Self::Spa => write!(f, "spa"),
            Self::Static => write!(f, "static"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Detected framework information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameworkInfo {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: FrameworkKind,
}

impl FrameworkInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: FrameworkKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
        }
    }

    pub fn unknown() -> Self {
        Self::new("Unknown", "", FrameworkKind::Unknown)
    }

    pub fn is_known(&self) -> bool {
        self.kind != FrameworkKind::Unknown
    }
}

/// Architecture pattern classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitecturePattern {
    /// atoms / molecules / organisms directories
    AtomicDesign,
    /// features/<name>/... directories
    FeatureBased,
    /// components + hooks + pages split by role
    Layered,
    #[default]
    Flat,
}

impl std::fmt::Display for ArchitecturePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtomicDesign => write!(f, "Atomic Design"),
            Self::FeatureBased => write!(f, "Feature-based"),
            Self::Layered => write!(f, "Layered"),
            Self::Flat => write!(f, "Flat"),
        }
    }
}

/// Architectural facts inferred from paths and dependencies
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchitectureInfo {
    pub pattern: ArchitecturePattern,
    pub state_management: Option<String>,
    pub styling: Vec<String>,
    pub routing: Option<String>,
    pub testing: Vec<String>,
    pub typescript: bool,
}

/// Coarse purpose of a declared dependency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DependencyCategory {
    Framework,
    Ui,
    State,
    Styling,
    Testing,
    Build,
    Other,
}

impl std::fmt::Display for DependencyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Framework => write!(f, "framework"),
            Self::Ui => write!(f, "ui"),
            Self::State => write!(f, "state"),
            Self::Styling => write!(f, "styling"),
            Self::Testing => write!(f, "testing"),
            Self::Build => write!(f, "build"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// One manifest dependency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyInfo {
    pub name: String,
    pub version: String,
    pub is_dev: bool,
    pub category: DependencyCategory,
}
