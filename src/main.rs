use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uiforge::cli::CommandContext;
use uiforge::cli::commands;
use uiforge::config::ReportFormat;
use uiforge::reporting::ReportKind;

#[derive(Parser)]
#[command(name = "uiforge")]
#[command(
    version,
    about = "Analyze, generate, migrate and report on frontend UI projects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (defaults to the current directory)
    #[arg(long, short = 'C', global = true, env = "UIFORGE_ROOT")]
    root: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the project: framework, components, dependencies, quality
    Analyze {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Produce a health, architecture, executive or migration report
    Report {
        #[arg(help = "Report kind: health, architecture, executive, migration")]
        kind: ReportKind,
        #[arg(short = 'f', long, help = "Output format: plain, markdown, html, json")]
        format: Option<ReportFormat>,
        #[arg(long, help = "Migration result file (JSON or YAML)")]
        input: Option<PathBuf>,
        #[arg(
            long,
            num_args = 0..=1,
            help = "Write the report under the project root instead of printing it"
        )]
        export: Option<Option<PathBuf>>,
    },

    /// Generate components, pages or project scaffolding
    Generate {
        #[arg(help = "Free-text description, e.g. \"a LoginForm with email and password\"")]
        description: Option<String>,
        #[arg(long, short, conflicts_with = "description", help = "Structured spec file")]
        spec: Option<PathBuf>,
        #[arg(long, short, help = "Output directory, relative to the project root")]
        out: Option<PathBuf>,
        #[arg(long, help = "Overwrite existing files")]
        force: bool,
        #[arg(long = "dry-run", help = "List files without writing them")]
        dry_run: bool,
    },

    /// Run a phased migration plan
    Migrate {
        #[arg(long, short, help = "Migration plan file (JSON or YAML)")]
        plan: Option<PathBuf>,
        #[arg(long, conflicts_with = "plan", requires = "to", help = "Source framework")]
        from: Option<String>,
        #[arg(long, conflicts_with = "plan", requires = "from", help = "Target framework")]
        to: Option<String>,
        #[arg(long = "dry-run", help = "Preview changes without modifying files")]
        dry_run: bool,
        #[arg(long, help = "Save the migration result as JSON")]
        result: Option<PathBuf>,
    },

    /// Restore files from a migration backup
    Rollback {
        #[arg(help = "Backup directory printed by `uiforge migrate`")]
        location: PathBuf,
    },

    /// Show the component mapping between two frameworks
    Mapping {
        source: String,
        target: String,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json, yaml"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31muiforge encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Mapping needs no project
    if let Commands::Mapping {
        source,
        target,
        format,
    } = &cli.command
    {
        commands::migrate::mapping(source, target, format)?;
        return Ok(());
    }

    let ctx = CommandContext::load(cli.root)?;

    match cli.command {
        Commands::Analyze { format } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::analyze::run(&ctx, &format))?;
        }
        Commands::Report {
            kind,
            format,
            input,
            export,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::report::run(
                &ctx,
                commands::report::ReportOptions {
                    kind,
                    format,
                    input,
                    export,
                },
            ))?;
        }
        Commands::Generate {
            description,
            spec,
            out,
            force,
            dry_run,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::generate::run(
                &ctx,
                commands::generate::GenerateOptions {
                    description,
                    spec,
                    out,
                    force,
                    dry_run,
                },
            ))?;
        }
        Commands::Migrate {
            plan,
            from,
            to,
            dry_run,
            result,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::migrate::run(
                &ctx,
                commands::migrate::MigrateOptions {
                    plan,
                    from,
                    to,
                    dry_run,
                    result,
                },
            ))?;
        }
        Commands::Rollback { location } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::migrate::rollback(&ctx, &location))?;
        }
        Commands::Mapping { .. } => {}
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(&ctx, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path(&ctx)?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(&ctx, global, force)?;
            }
        },
    }

    Ok(())
}
