//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod case;
pub(crate) mod check;
pub(crate) mod examples;

use std::path::PathBuf;

use clap::Args;
use golf_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use case::CaseArgs;
pub(crate) use check::CheckArgs;
pub(crate) use examples::ExamplesCommand;

/// Options shared by every command that reads `golf.toml`.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover golf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConfigArgs {
    /// Load `golf.toml` with `settings` plus the shared overrides applied.
    pub(crate) fn load(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            content_dir: self.content_dir.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}
