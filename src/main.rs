/// A generated component ended up declaring the same hook state twice,
/// which breaks the rules of hooks at runtime. Moving hooks around needs
/// a real parser, but the repeated declaration itself is a plain text
/// problem: keep the first copy of the line, drop the rest, leave every
/// other byte of the file alone.
use anyhow::Result;
use clap::{Parser, Subcommand};
use fix_hooks::utils::{self, RunOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fix-hooks")]
#[command(about = "Remove repeated hook declaration lines from a generated source file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use (default: ./fix-hooks.toml, defaults if missing)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// File to repair, overriding the configured target
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Line pattern to dedup; `/.../` for a regex. Repeatable, replaces configured patterns
    #[arg(short, long = "pattern", global = true)]
    patterns: Vec<String>,

    /// Copy the original file to <file>.bak before rewriting
    #[arg(short, long, global = true)]
    backup: bool,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Show every removed line and enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove repeated lines from the target in place (default)
    Run,
    /// Report repeated lines without writing; fails if any are found
    Check,
    /// Write a default fix-hooks.toml
    Init,
    /// Validate the configuration
    Validate,
    /// Restore the target from its .bak backup
    Restore,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else warnings only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "fix_hooks=debug"
        } else {
            "fix_hooks=warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = RunOptions {
        config: cli.config,
        file: cli.file,
        patterns: cli.patterns,
        backup: cli.backup,
        json: cli.json,
        verbose: cli.verbose,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => utils::run_fix(&options),
        Commands::Check => utils::check(&options),
        Commands::Init => utils::initialize_config(&options),
        Commands::Validate => utils::validate_config(&options),
        Commands::Restore => utils::restore(&options),
    }
}
