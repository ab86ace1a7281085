//! brace: `{{ name }}` template rendering from the command line.
//!
//! # Usage
//!
//! ```text
//! brace render [FILE] [--template STR] [--data FILE]... [--set NAME=VALUE]...
//!              [--on-missing fail|empty-string] [--strict] [--output PATH]
//! brace tokens [FILE] [--template STR] [--json]
//! brace compile [FILE] [--template STR] [--program]
//! brace check FILE...
//! ```
//!
//! Every command accepts `--config PATH`; otherwise `~/.brace/config.yaml` is
//! used when present.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use brace_core::config::{self, Config};
use commands::{check::CheckArgs, compile::CompileArgs, render::RenderArgs, tokens::TokensArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "brace",
    version,
    about = "Render double-brace templates against JSON/YAML data",
    long_about = None,
)]
struct Cli {
    /// Config file to use instead of ~/.brace/config.yaml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template with data from files and --set pairs.
    Render(RenderArgs),

    /// Show how a template is split into literal and expression tokens.
    Tokens(TokensArgs),

    /// Print the compiled parts list of a template.
    Compile(CompileArgs),

    /// Compile templates and report malformed ones.
    Check(CheckArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config)?;
    match cli.command {
        Commands::Render(args) => args.run(&config),
        Commands::Tokens(args) => args.run(&config),
        Commands::Compile(args) => args.run(&config),
        Commands::Check(args) => args.run(&config),
    }
}

fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    match explicit {
        Some(path) => config::load_from(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => config::load().context("failed to load ~/.brace/config.yaml"),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
