//! Project analysis result types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::component::ComponentInfo;
use super::project::{ArchitectureInfo, DependencyInfo, FrameworkInfo, ProjectMeta};

/// Project-wide quality scores, each in 0..=100
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityScores {
    pub overall: u8,
    pub code_quality: u8,
    pub security: u8,
    pub performance: u8,
    pub accessibility: u8,
    pub maintainability: u8,
    pub test_coverage: u8,
    pub documentation: u8,
}

impl QualityScores {
    /// Named view of every score except `overall`, in display order
    pub fn categories(&self) -> [(&'static str, u8); 7] {
        [
            ("Code Quality", self.code_quality),
            ("Security", self.security),
            ("Performance", self.performance),
            ("Accessibility", self.accessibility),
            ("Maintainability", self.maintainability),
            ("Test Coverage", self.test_coverage),
            ("Documentation", self.documentation),
        ]
    }

    /// Letter grade of the overall score
    pub fn grade(&self) -> char {
        match self.overall {
            90..=100 => 'A',
            80..=89 => 'B',
            70..=79 => 'C',
            60..=69 => 'D',
            _ => 'F',
        }
    }
}

/// Immutable snapshot produced by one `analyze_project()` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub root: PathBuf,
    pub project: ProjectMeta,
    pub framework: FrameworkInfo,
    pub architecture: ArchitectureInfo,
    pub components: Vec<ComponentInfo>,
    pub dependencies: Vec<DependencyInfo>,
    pub quality: QualityScores,
    /// Discovered files that could not be read
    pub skipped_files: Vec<PathBuf>,
}

impl AnalysisResult {
    pub fn production_dependencies(&self) -> impl Iterator<Item = &DependencyInfo> {
        self.dependencies.iter().filter(|d| !d.is_dev)
    }

    pub fn dev_dependencies(&self) -> impl Iterator<Item = &DependencyInfo> {
        self.dependencies.iter().filter(|d| d.is_dev)
    }

    pub fn component(&self, name: &str) -> Option<&ComponentInfo> {
        self.components.iter().find(|c| c.name == name)
    }
}
