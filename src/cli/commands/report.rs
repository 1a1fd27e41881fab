//! Report Command
//!
//! Usage:
//!   uiforge report <health|architecture|executive> [--format F] [--export [PATH]]
//!   uiforge report migration --input result.json [--format F] [--export [PATH]]

use std::path::PathBuf;

use crate::cli::{CommandContext, Output, read_structured};
use crate::config::ReportFormat;
use crate::migration::MigrationResult;
use crate::reporting::{ReportInput, ReportKind};
use crate::types::{ForgeError, Result};

pub struct ReportOptions {
    pub kind: ReportKind,
    pub format: Option<ReportFormat>,
    /// Migration result file for `migration` reports
    pub input: Option<PathBuf>,
    /// `Some(None)` exports to the default path
    pub export: Option<Option<PathBuf>>,
}

pub async fn run(ctx: &CommandContext, options: ReportOptions) -> Result<()> {
    let engine = ctx.reporting_engine(options.format)?;

    let report = match options.kind {
        ReportKind::Migration => {
            let path = options.input.ok_or_else(|| {
                ForgeError::Config("Migration reports need --input <result.json>".to_string())
            })?;
            let result: MigrationResult = read_structured(&path)?;
            engine.generate(ReportKind::Migration, ReportInput::Migration(&result))
        }
        kind => {
            let analysis = ctx.analyze().await?;
            engine.generate(kind, ReportInput::Analysis(&analysis))
        }
    };

    match options.export {
        None => println!("{}", report),
        Some(target) => {
            let target = target.unwrap_or_else(|| engine.default_export_path(options.kind));
            let path = engine.export_report(&report, &target).await?;
            Output::new().success(&format!(
                "Exported {} report to {}",
                options.kind,
                ctx.display_path(&path)
            ));
        }
    }
    Ok(())
}
