//! CLI Common Utilities
//!
//! Shared context for command handlers: project root, merged configuration
//! and the file system every engine runs against.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::AnalysisEngine;
use crate::config::{Config, ConfigLoader, ReportFormat};
use crate::fs::{LocalFileSystem, SharedFileSystem};
use crate::generation::GenerationEngine;
use crate::reporting::ReportingEngine;
use crate::types::{AnalysisResult, ForgeError, Result};

/// Command execution context
#[derive(Clone)]
pub struct CommandContext {
    /// Project root directory
    pub root: PathBuf,
    /// Loaded configuration
    pub config: Config,
    pub fs: SharedFileSystem,
}

impl CommandContext {
    /// Resolve the project root and load its configuration
    ///
    /// An explicit `root` wins; otherwise the current directory is used.
    pub fn load(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        if !root.is_dir() {
            return Err(ForgeError::Config(format!(
                "Project root is not a directory: {}",
                root.display()
            )));
        }

        let config = ConfigLoader::load_for(&root)?;
        let fs = LocalFileSystem::new().with_max_file_size(config.analysis.max_file_size);
        Ok(Self {
            root,
            config,
            fs: Arc::new(fs),
        })
    }

    pub fn analysis_engine(&self) -> AnalysisEngine {
        AnalysisEngine::new(&self.root, self.fs.clone(), self.config.analysis.clone())
    }

    pub fn generation_engine(&self) -> Result<GenerationEngine> {
        GenerationEngine::new(self.config.generation.clone())
    }

    /// Reporting engine, optionally overriding the configured format
    pub fn reporting_engine(&self, format: Option<ReportFormat>) -> Result<ReportingEngine> {
        let mut config = self.config.reporting.clone();
        if let Some(format) = format {
            config.format = format;
        }
        ReportingEngine::new(&self.root, self.fs.clone(), config)
    }

    pub async fn analyze(&self) -> Result<AnalysisResult> {
        self.analysis_engine().analyze_project().await
    }

    /// Path shown to the user, relative to the root when possible
    pub fn display_path<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.root).unwrap_or(path).display()
    }
}

/// Read a structured input file (JSON or YAML by extension)
pub fn read_structured<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ForgeError::Config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&text)?),
        _ => Ok(serde_json::from_str(&text)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationSpec;

    #[test]
    fn test_load_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            CommandContext::load(Some(missing)),
            Err(ForgeError::Config(_))
        ));
    }

    #[test]
    fn test_load_reads_project_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".uiforge")).unwrap();
        std::fs::write(
            dir.path().join(".uiforge/config.toml"),
            "[reporting]\nformat = \"html\"\n",
        )
        .unwrap();
        let ctx = CommandContext::load(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ctx.config.reporting.format, ReportFormat::Html);
        assert_eq!(
            ctx.reporting_engine(Some(ReportFormat::Json)).unwrap().config().format,
            ReportFormat::Json
        );
    }

    #[test]
    fn test_read_structured_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.yaml");
        std::fs::write(&path, "target: component\nname: Badge\n").unwrap();
        let spec: GenerationSpec = read_structured(&path).unwrap();
        assert!(spec.validate().is_ok());
    }
}
