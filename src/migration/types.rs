//! Migration plan and result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::MigrationConfig;
use crate::constants::migration::DEFAULT_BACKUP_DIR;
use crate::types::{AnalysisResult, EngineError, ForgeError, Result};

// =============================================================================
// Transformations
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransformationKind {
    Replace,
    /// Leaves content unchanged
    Modify,
    Add,
    Remove,
    Rename,
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Replace => "replace",
            Self::Modify => "modify",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Rename => "rename",
        };
        write!(f, "{}", name)
    }
}

/// Post-transformation content check; a `false` result is recorded but the
/// file is still written
#[derive(Clone)]
pub struct ContentValidator(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl ContentValidator {
    pub fn new(check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(check))
    }

    pub fn check(&self, content: &str) -> bool {
        (self.0)(content)
    }
}

impl fmt::Debug for ContentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentValidator(..)")
    }
}

/// One text rewrite applied to every target file of a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transformation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransformationKind,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    /// Regex used by `replace` instead of the literal `source`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(skip)]
    pub validator: Option<ContentValidator>,
}

impl Transformation {
    pub fn new(
        id: impl Into<String>,
        kind: TransformationKind,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            source: source.into(),
            target: target.into(),
            pattern: None,
            replacement: None,
            validator: None,
        }
    }

    pub fn replace(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(id, TransformationKind::Replace, source, target)
    }

    /// Global regex substitution; `$1`-style group references are expanded
    pub fn regex(
        id: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        let mut t = Self::new(id, TransformationKind::Replace, "", "");
        t.pattern = Some(pattern.into());
        t.replacement = Some(replacement.into());
        t
    }

    /// Whole-word substitution: `ref` -> `useState` leaves `href` alone
    pub fn word(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        let (from, to) = (from.into(), to.into());
        let mut t = Self::new(id, TransformationKind::Replace, from.clone(), to.clone());
        t.pattern = Some(format!(r"\b{}\b", regex::escape(&from)));
        t.replacement = Some(to.replace('$', "$$"));
        t
    }

    pub fn add(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, TransformationKind::Add, "", text)
    }

    pub fn remove(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, TransformationKind::Remove, text, "")
    }

    pub fn rename(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(id, TransformationKind::Rename, from, to)
    }

    pub fn with_validator(mut self, check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(ContentValidator::new(check));
        self
    }
}

// =============================================================================
// Phases and Plans
// =============================================================================

/// Serialized in camelCase; snake_case keys are accepted on input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPhase {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Lower runs first among phases whose dependencies are met
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, alias = "risk_level")]
    pub risk_level: RiskLevel,
    /// Component names or root-relative paths; `*` selects every known component
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}

impl MigrationPhase {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority: 0,
            dependencies: Vec::new(),
            risk_level: RiskLevel::Low,
            components: Vec::new(),
            transformations: Vec::new(),
        }
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    pub fn risk(mut self, level: RiskLevel) -> Self {
        self.risk_level = level;
        self
    }

    pub fn target(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn transform(mut self, transformation: Transformation) -> Self {
        self.transformations.push(transformation);
        self
    }
}

/// A complete migration: phases, component locations and run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MigrationPlan {
    pub id: String,
    #[serde(alias = "source_framework")]
    pub source_framework: String,
    #[serde(alias = "target_framework")]
    pub target_framework: String,
    pub phases: Vec<MigrationPhase>,
    /// Component name -> root-relative file path
    pub components: BTreeMap<String, PathBuf>,
    #[serde(alias = "dry_run")]
    pub dry_run: bool,
    /// Backup directory, relative to the project root
    #[serde(alias = "backup_dir")]
    pub backup_dir: PathBuf,
}

impl Default for MigrationPlan {
    fn default() -> Self {
        Self {
            id: "migration".to_string(),
            source_framework: String::new(),
            target_framework: String::new(),
            phases: Vec::new(),
            components: BTreeMap::new(),
            dry_run: false,
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        }
    }
}

impl MigrationPlan {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse by file extension: `.yaml`/`.yml` as YAML, anything else as JSON
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(text),
            Some("json") | None => Self::from_json(text),
            Some(other) => Err(ForgeError::Config(format!(
                "Unsupported migration plan format: .{}",
                other
            ))),
        }
    }

    /// Plan with a single rename phase built from the idiom mapping table
    pub fn from_component_mapping(source: &str, target: &str) -> Self {
        let mut plan = Self::new(format!(
            "{}-to-{}",
            source.to_lowercase(),
            target.to_lowercase()
        ));
        plan.source_framework = source.to_string();
        plan.target_framework = target.to_string();
        plan.phases.extend(super::mapping::rename_phase(source, target));
        plan
    }

    pub fn phase(mut self, phase: MigrationPhase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_component(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.components.insert(name.into(), path.into());
        self
    }

    /// Register every analyzed component; the first file of a name wins
    pub fn with_components_from(mut self, analysis: &AnalysisResult) -> Self {
        for component in &analysis.components {
            self.components
                .entry(component.name.clone())
                .or_insert_with(|| component.file_path.clone());
        }
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Take backup directory and dry-run flag from configuration
    pub fn with_config(mut self, config: &MigrationConfig) -> Self {
        self.backup_dir = config.backup_dir.clone();
        self.dry_run |= config.dry_run;
        self
    }
}

// =============================================================================
// Results
// =============================================================================

/// Lifecycle of one `execute_migration` run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationState {
    #[default]
    Idle,
    BackingUp,
    ExecutingPhases,
    Completed,
    Aborted,
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::BackingUp => "backing-up",
            Self::ExecutingPhases => "executing-phases",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MigrationResult {
    pub success: bool,
    #[serde(alias = "final_state")]
    pub final_state: MigrationState,
    #[serde(alias = "completed_phases")]
    pub completed_phases: Vec<String>,
    #[serde(alias = "failed_phases")]
    pub failed_phases: Vec<String>,
    /// Root-relative paths written by completed phases
    #[serde(alias = "modified_files")]
    pub modified_files: Vec<PathBuf>,
    /// Targets that did not exist
    #[serde(alias = "skipped_files")]
    pub skipped_files: Vec<PathBuf>,
    /// Files a dry run would have written
    #[serde(alias = "previewed_files")]
    pub previewed_files: Vec<PathBuf>,
    #[serde(alias = "backup_location")]
    pub backup_location: Option<PathBuf>,
    pub warnings: Vec<String>,
    pub errors: Vec<EngineError>,
}

impl MigrationResult {
    pub(crate) fn record_file(list: &mut Vec<PathBuf>, path: &Path) {
        if !list.iter().any(|p| p == path) {
            list.push(path.to_path_buf());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RollbackResult {
    pub success: bool,
    #[serde(alias = "restored_files")]
    pub restored_files: Vec<PathBuf>,
    pub errors: Vec<EngineError>,
}

/// Written next to backed-up files as `manifest.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupManifest {
    pub plan_id: String,
    pub created_at: DateTime<Utc>,
    pub files: Vec<BackupEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupEntry {
    /// Root-relative path, also the path inside the backup directory
    pub path: PathBuf,
    pub sha256: String,
}
