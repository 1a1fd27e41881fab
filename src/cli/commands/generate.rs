//! Generate Command
//!
//! Generates files from a free-text description or a structured spec file and
//! writes them under the output directory.
//!
//! Usage:
//!   uiforge generate "create a LoginForm with email and password"
//!   uiforge generate --spec page.yaml [--out DIR] [--force] [--dry-run]

use std::path::{Path, PathBuf};

use crate::cli::{CommandContext, Output, read_structured};
use crate::fs::FileSystem;
use crate::generation::{GeneratedFile, GenerationResult, GenerationSpec};
use crate::types::{ForgeError, Result, ResultExt, enum_to_str};

pub struct GenerateOptions {
    pub description: Option<String>,
    pub spec: Option<PathBuf>,
    /// Output directory, relative to the project root
    pub out: Option<PathBuf>,
    pub force: bool,
    pub dry_run: bool,
}

pub async fn run(ctx: &CommandContext, options: GenerateOptions) -> Result<()> {
    let out = Output::new();
    let engine = ctx.generation_engine()?;

    let result = match (&options.spec, &options.description) {
        (Some(path), _) => {
            let spec: GenerationSpec = read_structured(path)?;
            engine.generate(&spec)
        }
        (None, Some(description)) => engine.generate_from_description(description),
        (None, None) => {
            return Err(ForgeError::Config(
                "Provide a description or --spec <file>".to_string(),
            ));
        }
    };

    for warning in &result.warnings {
        out.warning(warning);
    }
    if !result.success {
        out.engine_errors(&result.errors);
        return Err(ForgeError::Config(format!(
            "Generation failed with {} errors",
            result.errors.len()
        )));
    }

    let target = ctx.root.join(options.out.unwrap_or_default());
    if options.dry_run {
        out.section(&format!("Would write {} files", result.files.len()));
        for file in &result.files {
            out.field(&enum_to_str(&file.file_type), target.join(&file.path).display());
        }
        return Ok(());
    }

    let written = write_files(ctx.fs.as_ref(), &target, &result, options.force).await?;
    out.success(&format!(
        "Generated {} files in {}",
        written.len(),
        target.display()
    ));
    for path in &written {
        out.field("", ctx.display_path(path));
    }
    Ok(())
}

/// Write generated files under `target`; existing files are kept unless `force`
async fn write_files(
    fs: &dyn FileSystem,
    target: &Path,
    result: &GenerationResult,
    force: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(result.files.len());
    for GeneratedFile { path, content, .. } in &result.files {
        let dest = target.join(path);
        if !force && fs.exists(&dest).await {
            tracing::warn!("Generate: Keeping existing {}", dest.display());
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs.create_dir_all(parent).await?;
        }
        fs.write(&dest, content)
            .await
            .with_context_fn(|| format!("Failed to write {}", dest.display()))?;
        written.push(dest);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use crate::generation::{ComponentSpec, GenerationContext, GenerationEngine};

    #[tokio::test]
    async fn test_write_files_respects_existing() {
        let fs = MemoryFileSystem::new().with_file("/out/src/components/Card.tsx", "custom");
        let result = GenerationEngine::new(GenerationContext::default())
            .unwrap()
            .generate_component(&ComponentSpec::named("Card"));
        assert!(result.success);

        let written = write_files(&fs, Path::new("/out"), &result, false).await.unwrap();
        assert_eq!(written.len(), result.files.len() - 1);
        assert_eq!(fs.contents("/out/src/components/Card.tsx").unwrap(), "custom");

        let written = write_files(&fs, Path::new("/out"), &result, true).await.unwrap();
        assert_eq!(written.len(), result.files.len());
        assert_ne!(fs.contents("/out/src/components/Card.tsx").unwrap(), "custom");
    }
}
