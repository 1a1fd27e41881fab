//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/uiforge/config.toml)
//! 3. Project config (.uiforge/config.toml)
//! 4. Environment variables (UIFORGE_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{ForgeError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_for(Path::new("."))
    }

    /// Same as [`load`](Self::load) with the project config looked up under `root`
    pub fn load_for(root: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = root.join(Self::project_config_path());
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g., UIFORGE_REPORTING__FORMAT -> reporting.format)
        figment = figment.merge(Env::prefixed("UIFORGE_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ForgeError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ForgeError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/uiforge/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("uiforge"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file (relative to the project root)
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".uiforge/config.toml")
    }

    /// Get project data directory (relative to the project root)
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".uiforge")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Describe config file locations, one `(label, path, exists)` per source
    pub fn paths(root: &Path) -> Vec<(&'static str, Option<PathBuf>, bool)> {
        let global = Self::global_config_path();
        let global_exists = global.as_ref().is_some_and(|p| p.exists());
        let project = root.join(Self::project_config_path());
        let project_exists = project.exists();
        vec![
            ("Global", global, global_exists),
            ("Project", Some(project), project_exists),
        ]
    }

    /// Render the effective configuration as `toml`, `json` or `yaml`
    pub fn render(config: &Config, format: &str) -> Result<String> {
        match format {
            "json" => Ok(serde_json::to_string_pretty(config)?),
            "yaml" | "yml" => Ok(serde_yaml::to_string(config)?),
            "toml" => {
                toml::to_string_pretty(config).map_err(|e| ForgeError::Config(e.to_string()))
            }
            other => Err(ForgeError::Config(format!(
                "Unknown config format: {}. Valid options: toml, json, yaml",
                other
            ))),
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            ForgeError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir)?;

        let config_path = global_dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_global_config())?;
            info!("Created global config: {}", config_path.display());
        } else {
            info!("Global config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Initialize project configuration under `root`
    pub fn init_project(root: &Path, name: Option<&str>, force: bool) -> Result<PathBuf> {
        let project_dir = root.join(Self::project_dir());

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(project_dir.join("backups"))?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_project_config(name))?;
            info!("Created project config: {}", config_path.display());
        } else {
            info!("Project config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default global config content (TOML)
    fn default_global_config() -> String {
        r#"# uiforge Global Configuration
# User-wide defaults. Project settings in .uiforge/config.toml override these.

version = "1.0"

[generation]
typescript = true
styling = "css-modules"
include_tests = true

[reporting]
format = "markdown"
"#
        .to_string()
    }

    /// Generate default project config content (TOML)
    fn default_project_config(name: Option<&str>) -> String {
        let project_name = name.unwrap_or("project");
        format!(
            r#"# uiforge Project Configuration
# Project-specific settings that override global defaults.

version = "1.0"

[project]
name = "{}"

[analysis]
manifest_file = "package.json"
include = ["**/*.tsx", "**/*.jsx", "**/use*.ts", "**/use*.js"]
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
    "**/.next/**",
]

[generation]
components_dir = "src/components"
pages_dir = "src/pages"

[migration]
backup_dir = ".uiforge/backups"
dry_run = false

[reporting]
format = "markdown"
output_dir = "reports"
summarize_threshold = 50
god_component_threshold = 10
"#,
            project_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_for(temp_dir.path()).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_init_project_and_load() {
        let temp_dir = TempDir::new().unwrap();

        let path = ConfigLoader::init_project(temp_dir.path(), Some("demo"), false).unwrap();
        assert!(path.exists());
        assert!(temp_dir.path().join(".uiforge/backups").exists());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.project.name.as_deref(), Some("demo"));
        assert_eq!(config.reporting.summarize_threshold, 50);
        assert_eq!(config.generation.components_dir, PathBuf::from("src/components"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(".uiforge");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "[reporting]\nformat = \"html\"\ngod_component_threshold = 3\n",
        )
        .unwrap();

        let config = ConfigLoader::load_for(temp_dir.path()).unwrap();
        assert_eq!(config.reporting.format, ReportFormat::Html);
        assert_eq!(config.reporting.god_component_threshold, 3);
        // untouched values keep their defaults
        assert_eq!(config.reporting.summarize_threshold, 50);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[reporting]\nsummarize_threshold = 0\n").unwrap();
        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(ForgeError::Config(_))
        ));
    }

    #[test]
    fn test_render_formats() {
        let config = Config::default();
        let toml = ConfigLoader::render(&config, "toml").unwrap();
        assert!(toml.contains("[reporting]"));
        let json = ConfigLoader::render(&config, "json").unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
        assert!(ConfigLoader::render(&config, "ini").is_err());
    }
}
