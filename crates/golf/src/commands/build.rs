//! `golf build` command implementation.

use std::path::PathBuf;

use clap::Args;
use golf_config::CliSettings;
use golf_site::StaticSiteBuilder;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output directory (overrides config, default: dist/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base path prefixed to every URL (overrides config).
    #[arg(long, env = "GOLF_BASE")]
    base: Option<String>,

    /// Site origin URL (overrides config).
    #[arg(long, env = "GOLF_SITE")]
    site: Option<String>,
}

impl BuildArgs {
    pub(crate) fn verbose(&self) -> bool {
        self.config.verbose
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            site: self.site,
            base: self.base,
            out_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = self.config.load(cli_settings)?;
        let out_dir = config.build_resolved.out_dir.clone();

        output.path("Content", &config.content_resolved.dir);
        output.path("Output", &out_dir);
        if let Some(base) = &config.base {
            output.info(&format!("Base: {base}"));
        }

        let report = StaticSiteBuilder::new(&config).build(&out_dir)?;

        output.warnings(&report.warnings);
        output.done(&format!(
            "Built {} pages to {}",
            report.pages,
            out_dir.display()
        ));
        Ok(())
    }
}
