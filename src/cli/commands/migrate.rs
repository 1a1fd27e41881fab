//! Migrate / Rollback / Mapping Commands
//!
//! Usage:
//!   uiforge migrate --plan plan.yaml [--dry-run] [--result result.json]
//!   uiforge migrate --from react --to vue [--dry-run]
//!   uiforge rollback <BACKUP_DIR>
//!   uiforge mapping <SOURCE> <TARGET>

use std::path::{Path, PathBuf};

use crate::cli::{CommandContext, Output};
use crate::migration::{MigrationEngine, MigrationPlan, MigrationResult, generate_component_mapping};
use crate::types::{ForgeError, Result};

pub struct MigrateOptions {
    pub plan: Option<PathBuf>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub dry_run: bool,
    /// Where to save the result for `uiforge report migration`
    pub result: Option<PathBuf>,
}

pub async fn run(ctx: &CommandContext, options: MigrateOptions) -> Result<()> {
    let out = Output::new();

    let plan = match (&options.plan, &options.from, &options.to) {
        (Some(path), _, _) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                ForgeError::Config(format!("Cannot read plan {}: {}", path.display(), e))
            })?;
            MigrationPlan::parse(path, &text)?
        }
        (None, Some(from), Some(to)) => MigrationPlan::from_component_mapping(from, to),
        _ => {
            return Err(ForgeError::Config(
                "Provide --plan <file> or both --from and --to".to_string(),
            ));
        }
    };
    if plan.phases.is_empty() {
        return Err(ForgeError::Config(format!(
            "Migration plan {} has no phases",
            plan.id
        )));
    }

    // Analysis supplies component locations for name-based targets
    let analysis = ctx.analyze().await?;
    let plan = plan
        .with_components_from(&analysis)
        .with_config(&ctx.config.migration)
        .with_dry_run(options.dry_run || ctx.config.migration.dry_run);

    out.header(&format!(
        "Migration {} ({} phases, {} components)",
        plan.id,
        plan.phases.len(),
        plan.components.len()
    ));
    let engine = MigrationEngine::new(&ctx.root, ctx.fs.clone(), plan);
    let result = engine.execute_migration().await;

    print_result(ctx, &out, &result);

    if let Some(path) = options.result {
        std::fs::write(&path, serde_json::to_string_pretty(&result)?)?;
        out.info(&format!("Result saved to {}", path.display()));
    }

    if result.success {
        Ok(())
    } else {
        Err(ForgeError::migration(
            result.failed_phases.join(", "),
            format!("{} errors", result.errors.len()),
        ))
    }
}

fn print_result(ctx: &CommandContext, out: &Output, result: &MigrationResult) {
    out.field("State", result.final_state);
    out.field("Completed", result.completed_phases.join(", "));
    if !result.failed_phases.is_empty() {
        out.field("Failed", result.failed_phases.join(", "));
    }
    out.field("Modified", result.modified_files.len());
    if !result.previewed_files.is_empty() {
        out.field("Would modify", result.previewed_files.len());
        for path in &result.previewed_files {
            out.field("", path.display());
        }
    }
    if let Some(location) = &result.backup_location {
        out.field("Backup", ctx.display_path(location));
    }
    for warning in &result.warnings {
        out.warning(warning);
    }
    out.engine_errors(&result.errors);
}

pub async fn rollback(ctx: &CommandContext, location: &Path) -> Result<()> {
    let out = Output::new();
    let engine = MigrationEngine::new(&ctx.root, ctx.fs.clone(), MigrationPlan::default());
    let result = engine.rollback(location).await;

    out.engine_errors(&result.errors);
    if result.success {
        out.success(&format!(
            "Restored {} files from {}",
            result.restored_files.len(),
            location.display()
        ));
        Ok(())
    } else {
        Err(ForgeError::migration(
            "rollback",
            format!(
                "{} of {} files restored",
                result.restored_files.len(),
                result.restored_files.len() + result.errors.len()
            ),
        ))
    }
}

pub fn mapping(source: &str, target: &str, format: &str) -> Result<()> {
    let mappings = generate_component_mapping(source, target);
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&mappings)?);
        return Ok(());
    }

    let out = Output::new();
    if mappings.is_empty() {
        out.warning(&format!("No mapping available for {} -> {}", source, target));
        return Ok(());
    }
    out.header(&format!("{} -> {}", source, target));
    for mapping in &mappings {
        println!("  {:<22} {:<22} {}", mapping.source, mapping.target, mapping.notes);
    }
    Ok(())
}
