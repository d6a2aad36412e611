//! Helix Golf CLI.
//!
//! Provides commands for:
//! - `build`: Build the static site
//! - `check`: Validate configuration and content
//! - `examples validate`: Validate golf examples and write the index page
//! - `examples generate-demos`: Record and verify a demo for each example
//! - `case`: Rename the keys of a JSON record

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CaseArgs, CheckArgs, ExamplesCommand};
use output::Output;

/// Helix Golf - static site builder for Helix editor examples.
#[derive(Parser)]
#[command(name = "golf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site.
    Build(BuildArgs),
    /// Validate configuration, content and sidebar.
    Check(CheckArgs),
    /// Golf example commands.
    #[command(subcommand)]
    Examples(ExamplesCommand),
    /// Convert the keys of a JSON record between camelCase and snake_case.
    Case(CaseArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose(),
            Self::Check(args) => args.verbose(),
            Self::Examples(cmd) => cmd.verbose(),
            Self::Case(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG (default WARN)
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Examples(cmd) => cmd.execute(),
        Commands::Case(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}
