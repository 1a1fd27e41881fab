use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::instrument;

use super::context;
use super::templates::{self, error_report, escape_values, template_key};
use super::types::{ReportDocument, ReportInput, ReportKind};
use crate::config::{ReportFormat, ReportingConfig};
use crate::fs::{SharedFileSystem, is_contained};
use crate::migration::MigrationResult;
use crate::template::TemplateRegistry;
use crate::types::{AnalysisResult, ForgeError, Result, ResultExt};

/// Renders analysis and migration results as reports
pub struct ReportingEngine {
    root: PathBuf,
    fs: SharedFileSystem,
    config: ReportingConfig,
    templates: TemplateRegistry,
}

impl ReportingEngine {
    pub fn new(root: impl AsRef<Path>, fs: SharedFileSystem, config: ReportingConfig) -> Result<Self> {
        Ok(Self::with_registry(root, fs, config, templates::builtin()?))
    }

    /// Use a caller-supplied template registry
    pub fn with_registry(
        root: impl AsRef<Path>,
        fs: SharedFileSystem,
        config: ReportingConfig,
        templates: TemplateRegistry,
    ) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            fs,
            config,
            templates,
        }
    }

    pub fn config(&self) -> &ReportingConfig {
        &self.config
    }

    pub fn generate_health_report(&self, analysis: &AnalysisResult) -> String {
        self.generate(ReportKind::Health, ReportInput::Analysis(analysis))
    }

    pub fn generate_architecture_report(&self, analysis: &AnalysisResult) -> String {
        self.generate(ReportKind::Architecture, ReportInput::Analysis(analysis))
    }

    pub fn generate_executive_summary(&self, analysis: &AnalysisResult) -> String {
        self.generate(ReportKind::ExecutiveSummary, ReportInput::Analysis(analysis))
    }

    pub fn generate_migration_report(&self, result: &MigrationResult) -> String {
        self.generate(ReportKind::Migration, ReportInput::Migration(result))
    }

    /// Render a report, degrading any failure to an error report
    pub fn generate(&self, kind: ReportKind, input: ReportInput<'_>) -> String {
        match self.render(kind, input) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Report: Rendering {} report failed: {}", kind, e);
                error_report(self.config.format, &e.to_string())
            }
        }
    }

    /// Render a report in the configured format
    #[instrument(skip(self, input), fields(format = %self.config.format))]
    pub fn render(&self, kind: ReportKind, input: ReportInput<'_>) -> Result<String> {
        let document = match (kind, input) {
            (ReportKind::Health, ReportInput::Analysis(a)) => context::health(a, &self.config),
            (ReportKind::Architecture, ReportInput::Analysis(a)) => {
                context::architecture(a, &self.config)
            }
            (ReportKind::ExecutiveSummary, ReportInput::Analysis(a)) => {
                context::executive_summary(a, &self.config)
            }
            (ReportKind::Migration, ReportInput::Migration(m)) => {
                context::migration(m, &self.config)
            }
            (kind, ReportInput::Analysis(_)) => {
                return Err(ForgeError::Report(format!(
                    "{} report requires a migration result",
                    kind
                )));
            }
            (kind, ReportInput::Migration(_)) => {
                return Err(ForgeError::Report(format!(
                    "{} report requires an analysis result",
                    kind
                )));
            }
        };

        let out = self.render_document(&document)?;
        tracing::debug!(
            "Report: Rendered {} ({} sections, {} bytes, summarized: {})",
            kind,
            document.sections.len(),
            out.len(),
            document.summarized
        );
        Ok(out)
    }

    fn render_document(&self, document: &ReportDocument) -> Result<String> {
        let Some(key) = template_key(self.config.format) else {
            let payload = json!({
                "report": document.kind,
                "title": document.title,
                "headline": document.headline,
                "generated_at": document.generated_at,
                "summarized": document.summarized,
                "data": document.data,
            });
            return Ok(serde_json::to_string_pretty(&payload)?);
        };

        let mut ctx = serde_json::to_value(document)?;
        if self.config.format == ReportFormat::Html {
            escape_values(&mut ctx);
        }
        self.templates.render(key, &ctx)
    }

    /// Default export path for a report kind: `<output_dir>/<kind>.<ext>`
    pub fn default_export_path(&self, kind: ReportKind) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.{}", kind, self.config.format.extension()))
    }

    /// Write `content` verbatim under the project root, creating parent
    /// directories. I/O failures are returned to the caller.
    #[instrument(skip_all, fields(path = %relative_path.as_ref().display()))]
    pub async fn export_report(
        &self,
        content: &str,
        relative_path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let relative = relative_path.as_ref();
        if !is_contained(relative) {
            return Err(ForgeError::Report(format!(
                "Export path must stay under the project root: {}",
                relative.display()
            )));
        }

        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .await
                .with_context_fn(|| format!("Failed to create {}", parent.display()))?;
        }
        self.fs
            .write(&path, content)
            .await
            .with_context_fn(|| format!("Failed to write report {}", path.display()))?;

        tracing::info!("Report: Exported {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}
