//! Analyze Command
//!
//! Runs the analysis engine over the project root and prints a summary.
//!
//! Usage:
//!   uiforge analyze [--format text|json]

use crate::cli::{CommandContext, Output};
use crate::types::{AnalysisResult, ForgeError, Result};

pub async fn run(ctx: &CommandContext, format: &str) -> Result<()> {
    let analysis = ctx.analyze().await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&analysis)?),
        "text" => print_summary(ctx, &analysis),
        other => {
            return Err(ForgeError::Config(format!(
                "Unknown output format: {}. Valid options: text, json",
                other
            )));
        }
    }
    Ok(())
}

fn print_summary(ctx: &CommandContext, analysis: &AnalysisResult) {
    let out = Output::new();

    out.header(&format!("{} {}", analysis.project.name, analysis.project.version));
    out.field("Root", ctx.root.display());
    out.field(
        "Framework",
        format!("{} {}", analysis.framework.name, analysis.framework.version),
    );
    out.field("Architecture", analysis.architecture.pattern);
    out.field("Components", analysis.components.len());
    out.field(
        "Dependencies",
        format!(
            "{} production, {} dev",
            analysis.production_dependencies().count(),
            analysis.dev_dependencies().count()
        ),
    );

    out.section(&format!(
        "Quality {} (grade {})",
        analysis.quality.overall,
        analysis.quality.grade()
    ));
    for (name, score) in analysis.quality.categories() {
        out.score(name, score);
    }

    if !analysis.skipped_files.is_empty() {
        out.section("Skipped files");
        for path in &analysis.skipped_files {
            out.warning(&path.display().to_string());
        }
    }

    println!();
    out.info("Run 'uiforge report health' for the full report");
}
