use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::instrument;

use super::architecture::detect_architecture;
use super::framework::{collect_dependencies, detect_framework};
use super::manifest::Manifest;
use super::quality::{QualityInputs, assess};
use crate::config::AnalysisConfig;
use crate::constants::discovery::{STORY_MARKER, TEST_MARKERS};
use crate::fs::SharedFileSystem;
use crate::heuristics::analyze_source;
use crate::types::{AnalysisResult, ComponentInfo, ForgeError, ProjectMeta, QualityScores, Result};

const README_FILES: &[&str] = &["README.md", "readme.md", "README"];

/// Heuristic analysis of one project root
///
/// Holds no state between calls; every `analyze_project()` produces a fresh
/// snapshot.
pub struct AnalysisEngine {
    root: PathBuf,
    fs: SharedFileSystem,
    config: AnalysisConfig,
}

/// Discovered files split by role
#[derive(Debug, Default)]
struct Discovery {
    sources: Vec<PathBuf>,
    tested: HashSet<String>,
    storied: HashSet<String>,
}

impl AnalysisEngine {
    pub fn new(root: impl AsRef<Path>, fs: SharedFileSystem, config: AnalysisConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            fs,
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the full analysis pipeline
    ///
    /// Fails only when the manifest is missing or malformed, or discovery
    /// itself fails. Unreadable source files are recorded in `skipped_files`.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn analyze_project(&self) -> Result<AnalysisResult> {
        tracing::info!("Analysis: Starting ({})", self.root.display());

        let manifest = self.read_manifest().await?;
        let framework = detect_framework(&manifest);
        tracing::debug!(
            "Analysis: Framework {} {} ({})",
            framework.name,
            framework.version,
            framework.kind
        );

        let discovery = self.discover().await?;
        tracing::info!(
            "Analysis: Discovered {} source files ({} tested, {} with stories)",
            discovery.sources.len(),
            discovery.tested.len(),
            discovery.storied.len()
        );

        let mut components: Vec<ComponentInfo> = Vec::with_capacity(discovery.sources.len());
        let mut skipped_files = Vec::new();

        for path in &discovery.sources {
            let relative = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
            let text = match self.fs.read_to_string(path).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Analysis: Cannot read {}: {}", relative.display(), e);
                    skipped_files.push(relative);
                    continue;
                }
            };

            if text.len() as u64 > self.config.max_file_size {
                tracing::warn!(
                    "Analysis: Skipping {} ({} bytes exceeds limit of {})",
                    relative.display(),
                    text.len(),
                    self.config.max_file_size
                );
                skipped_files.push(relative);
                continue;
            }

            let mut info = analyze_source(&text, &relative);
            let stem = base_stem(&relative);
            info.has_tests = discovery.tested.contains(&stem);
            info.has_documentation |= discovery.storied.contains(&stem);
            components.push(info);
        }

        let dependencies = collect_dependencies(&manifest);
        let architecture = detect_architecture(&manifest, &components);
        let has_readme = self.has_readme().await;

        let quality = assess(&QualityInputs {
            components: &components,
            dependencies: &dependencies,
            framework: &framework,
            architecture: &architecture,
            has_readme,
        });

        tracing::info!(
            "Analysis: Complete ({} components, {} skipped, overall quality {})",
            components.len(),
            skipped_files.len(),
            quality.overall
        );

        Ok(AnalysisResult {
            root: self.root.clone(),
            project: ProjectMeta {
                name: manifest.name.clone().unwrap_or_else(|| self.fallback_name()),
                version: manifest.version.clone().unwrap_or_default(),
            },
            framework,
            architecture,
            components,
            dependencies,
            quality,
            skipped_files,
        })
    }

    /// Same pipeline as `analyze_project`, keeping only the scores
    pub async fn assess_quality(&self) -> Result<QualityScores> {
        self.analyze_project().await.map(|result| result.quality)
    }

    async fn read_manifest(&self) -> Result<Manifest> {
        let path = self.root.join(&self.config.manifest_file);
        if !self.fs.exists(&path).await {
            return Err(ForgeError::ManifestNotFound { path });
        }
        let text = self.fs.read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ForgeError::ManifestNotFound { path: path.clone() }
            } else {
                ForgeError::Io(e)
            }
        })?;
        Manifest::parse(&path, &text)
    }

    async fn discover(&self) -> Result<Discovery> {
        let files = self
            .fs
            .glob(&self.root, &self.config.include, &self.config.exclude)
            .await?;

        let mut discovery = Discovery::default();
        for path in files {
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            let display = relative.to_string_lossy();
            if TEST_MARKERS.iter().any(|m| display.contains(m)) {
                discovery.tested.insert(base_stem(relative));
            } else if display.contains(STORY_MARKER) {
                discovery.storied.insert(base_stem(relative));
            } else {
                discovery.sources.push(path);
            }
        }
        Ok(discovery)
    }

    async fn has_readme(&self) -> bool {
        for name in README_FILES {
            if self.fs.exists(&self.root.join(name)).await {
                return true;
            }
        }
        false
    }

    fn fallback_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// File name up to the first dot: `Button.test.tsx` -> `Button`
fn base_stem(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use crate::types::{ComponentType, FrameworkKind};
    use std::sync::Arc;

    const NEXT_MANIFEST: &str = r#"{
        "name": "storefront",
        "version": "0.3.0",
        "dependencies": { "next": "^14.0.0", "react": "18.2.0" },
        "devDependencies": { "jest": "29.7.0", "typescript": "5.3.0" }
    }"#;

    const BUTTON: &str = r#"
import React from 'react';

export interface ButtonProps {
  label: string;
  onClick?: () => void;
}

export function Button({ label, onClick }: ButtonProps) {
  return <button onClick={onClick}>{label}</button>;
}
"#;

    fn engine(fs: MemoryFileSystem) -> AnalysisEngine {
        AnalysisEngine::new("/app", Arc::new(fs), AnalysisConfig::default())
    }

    #[tokio::test]
    async fn test_next_project_with_one_component() {
        let fs = MemoryFileSystem::new()
            .with_file("/app/package.json", NEXT_MANIFEST)
            .with_file("/app/src/components/Button.tsx", BUTTON);

        let result = engine(fs).analyze_project().await.unwrap();

        assert_eq!(result.framework.name, "Next.js");
        assert_eq!(result.framework.version, "14.0.0");
        assert_eq!(result.framework.kind, FrameworkKind::Ssr);
        assert_eq!(result.project.name, "storefront");
        assert_eq!(result.components.len(), 1);

        let button = &result.components[0];
        assert_eq!(button.name, "Button");
        assert_eq!(button.component_type, ComponentType::Component);
        assert_eq!(button.file_path, PathBuf::from("src/components/Button.tsx"));
        assert_eq!(button.props.len(), 2);
        assert_eq!(button.dependencies, vec!["react"]);
        assert!(!button.has_tests);

        assert_eq!(result.dependencies.len(), 4);
        assert_eq!(result.dev_dependencies().count(), 2);
        assert!(result.architecture.typescript);
        assert!(result.skipped_files.is_empty());
        assert!(result.quality.overall <= 100);
    }

    #[tokio::test]
    async fn test_missing_manifest_is_fatal() {
        let fs = MemoryFileSystem::new().with_file("/app/src/A.tsx", BUTTON);
        let err = engine(fs).analyze_project().await.unwrap_err();
        match err {
            ForgeError::ManifestNotFound { path } => {
                assert_eq!(path, PathBuf::from("/app/package.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_manifest_is_distinct() {
        let fs = MemoryFileSystem::new().with_file("/app/package.json", "{ \"name\": ");
        let err = engine(fs).assess_quality().await.unwrap_err();
        assert!(matches!(err, ForgeError::ManifestParse { .. }));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_skipped() {
        let fs = MemoryFileSystem::new()
            .with_file("/app/package.json", NEXT_MANIFEST)
            .with_file("/app/src/Broken.tsx", BUTTON)
            .with_file("/app/src/Button.tsx", BUTTON);
        fs.fail_reads_for("/app/src/Broken.tsx");

        let result = engine(fs).analyze_project().await.unwrap();
        assert_eq!(result.components.len(), 1);
        assert_eq!(result.skipped_files, vec![PathBuf::from("src/Broken.tsx")]);
    }

    #[tokio::test]
    async fn test_no_sources_yields_neutral_scores() {
        let fs = MemoryFileSystem::new().with_file("/app/package.json", "{}");
        let result = engine(fs).analyze_project().await.unwrap();
        assert!(result.components.is_empty());
        assert_eq!(result.framework.name, "Unknown");
        assert_eq!(result.quality.accessibility, 50);
        assert_eq!(result.project.name, "app");
    }

    #[tokio::test]
    async fn test_test_and_story_files_mark_components() {
        let fs = MemoryFileSystem::new()
            .with_file("/app/package.json", NEXT_MANIFEST)
            .with_file("/app/README.md", "# storefront")
            .with_file("/app/src/Button.tsx", BUTTON)
            .with_file("/app/src/Button.test.tsx", "test('renders', () => {});")
            .with_file("/app/src/Button.stories.tsx", "export default {};")
            .with_file("/app/src/Card.tsx", "export const Card = () => <div />;");

        let result = engine(fs).analyze_project().await.unwrap();
        let names: Vec<&str> = result.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Button", "Card"]);

        let button = result.component("Button").unwrap();
        assert!(button.has_tests);
        assert!(button.has_documentation);
        assert!(!result.component("Card").unwrap().has_tests);

        // one of two tested plus the framework bonus
        assert_eq!(result.quality.test_coverage, 60);
        // one of two documented plus the README
        assert_eq!(result.quality.documentation, 60);
    }

    #[tokio::test]
    async fn test_oversized_file_is_skipped() {
        let fs = MemoryFileSystem::new()
            .with_file("/app/package.json", "{}")
            .with_file("/app/src/Huge.tsx", "x".repeat(64));
        let config = AnalysisConfig {
            max_file_size: 16,
            ..Default::default()
        };
        let engine = AnalysisEngine::new("/app", Arc::new(fs), config);
        let result = engine.analyze_project().await.unwrap();
        assert!(result.components.is_empty());
        assert_eq!(result.skipped_files, vec![PathBuf::from("src/Huge.tsx")]);
    }

    #[test]
    fn test_base_stem() {
        assert_eq!(base_stem(Path::new("src/Button.test.tsx")), "Button");
        assert_eq!(base_stem(Path::new("src/__tests__/Card.tsx")), "Card");
    }
}
