//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/uiforge/) and project (.uiforge/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{discovery, migration, reporting};
use crate::generation::GenerationContext;
use crate::types::{ForgeError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Project-specific settings
    pub project: ProjectConfig,

    /// Project discovery and analysis settings
    pub analysis: AnalysisConfig,

    /// Code generation context
    pub generation: GenerationContext,

    /// Migration execution settings
    pub migration: MigrationConfig,

    /// Report rendering settings
    pub reporting: ReportingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            project: ProjectConfig::default(),
            analysis: AnalysisConfig::default(),
            generation: GenerationContext::default(),
            migration: MigrationConfig::default(),
            reporting: ReportingConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ForgeError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.include.is_empty() {
            return Err(ForgeError::Config(
                "analysis.include must contain at least one pattern".to_string(),
            ));
        }

        if self.analysis.manifest_file.trim().is_empty() {
            return Err(ForgeError::Config(
                "analysis.manifest_file must not be empty".to_string(),
            ));
        }

        if self.analysis.max_file_size == 0 {
            return Err(ForgeError::Config(
                "analysis.max_file_size must be greater than 0".to_string(),
            ));
        }

        if self.reporting.summarize_threshold == 0 {
            return Err(ForgeError::Config(
                "reporting.summarize_threshold must be greater than 0".to_string(),
            ));
        }

        if self.reporting.god_component_threshold == 0 {
            return Err(ForgeError::Config(
                "reporting.god_component_threshold must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Project Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name (defaults to the manifest name)
    pub name: Option<String>,

    /// Project root the engines operate on
    pub root: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            root: PathBuf::from("."),
        }
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Component file patterns (root-relative globs)
    pub include: Vec<String>,

    /// Excluded patterns
    pub exclude: Vec<String>,

    /// Manifest file name, relative to the root
    pub manifest_file: String,

    /// Files larger than this are not analyzed (bytes)
    pub max_file_size: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            include: discovery::DEFAULT_INCLUDE
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude: discovery::DEFAULT_EXCLUDE
                .iter()
                .map(|s| s.to_string())
                .collect(),
            manifest_file: discovery::MANIFEST_FILE.to_string(),
            max_file_size: discovery::DEFAULT_MAX_FILE_SIZE,
        }
    }
}

// =============================================================================
// Migration Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MigrationConfig {
    /// Backup directory, relative to the project root
    pub backup_dir: PathBuf,

    /// Preview changes without writing
    pub dry_run: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            backup_dir: PathBuf::from(migration::DEFAULT_BACKUP_DIR),
            dry_run: false,
        }
    }
}

// =============================================================================
// Reporting Configuration
// =============================================================================

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Plain,
    #[default]
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    /// File extension for exported reports
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Plain => "txt",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Plain => write!(f, "plain"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" | "txt" => Ok(ReportFormat::Plain),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown report format: {}. Valid options: plain, markdown, html, json",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportingConfig {
    pub format: ReportFormat,

    /// Export directory, relative to the project root
    pub output_dir: PathBuf,

    /// Component count above which reports summarize instead of enumerating
    pub summarize_threshold: usize,

    /// Dependency count above which a component is flagged as a God Component
    pub god_component_threshold: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            output_dir: PathBuf::from("reports"),
            summarize_threshold: reporting::DEFAULT_SUMMARIZE_THRESHOLD,
            god_component_threshold: reporting::DEFAULT_GOD_COMPONENT_THRESHOLD,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.analysis.manifest_file, "package.json");
        assert_eq!(config.reporting.format, ReportFormat::Markdown);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_report_format() {
        assert_eq!(ReportFormat::Html.to_string(), "html");
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Plain);
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Plain.extension(), "txt");
    }

    #[test]
    fn test_validate_rejects_zero_thresholds() {
        let mut config = Config::default();
        config.reporting.summarize_threshold = 0;
        assert!(matches!(config.validate(), Err(ForgeError::Config(_))));

        let mut config = Config::default();
        config.reporting.god_component_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_include() {
        let mut config = Config::default();
        config.analysis.include.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("analysis.include"));
    }
}
