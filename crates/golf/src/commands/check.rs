//! `golf check` command implementation.

use clap::Args;
use golf_config::CliSettings;
use golf_site::{Layout, Scanner, Sidebar};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn verbose(&self) -> bool {
        self.config.verbose
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.config.load(CliSettings::default())?;
        if let Some(path) = &config.config_path {
            output.path("Config", path);
        }
        output.path("Content", &config.content_resolved.dir);

        let documents = Scanner::new(&config.content_resolved.dir).scan()?;
        let sidebar = Sidebar::resolve(config.theme(), &documents, &config);
        Layout::from_config(&config)?;

        output.warnings(&sidebar.warnings);
        output.done(&format!(
            "Configuration is valid: {} documents, {} sidebar groups, {} markdown steps",
            documents.len(),
            sidebar.groups.len(),
            config.pipeline().len()
        ));
        Ok(())
    }
}
