//! Config Command
//!
//! Usage:
//!   uiforge config show [-f toml|json|yaml]
//!   uiforge config path
//!   uiforge config init [-g] [--force]

use crate::cli::{CommandContext, Output};
use crate::config::ConfigLoader;
use crate::types::Result;

/// Print the merged effective configuration
pub fn show(ctx: &CommandContext, format: &str) -> Result<()> {
    println!("{}", ConfigLoader::render(&ctx.config, format)?);
    Ok(())
}

/// Show configuration paths
pub fn path(ctx: &CommandContext) -> Result<()> {
    let out = Output::new();
    for (label, path, exists) in ConfigLoader::paths(&ctx.root) {
        let shown = match path {
            Some(path) if exists => path.display().to_string(),
            Some(path) => format!("{} (not found)", path.display()),
            None => "(unavailable)".to_string(),
        };
        out.field(label, shown);
    }
    Ok(())
}

pub fn init(ctx: &CommandContext, global: bool, force: bool) -> Result<()> {
    let out = Output::new();
    if global {
        let path = ConfigLoader::init_global(force)?;
        out.success(&format!("Global configuration: {}", path.display()));
    } else {
        let name = ctx.root.file_name().and_then(|n| n.to_str());
        let path = ConfigLoader::init_project(&ctx.root, name, force)?;
        out.success(&format!("Project configuration: {}", ctx.display_path(&path)));
    }
    Ok(())
}
