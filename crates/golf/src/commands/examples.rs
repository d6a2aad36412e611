//! `golf examples` subcommand group.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use golf_config::{CliSettings, Config};
use golf_examples::{
    Example, ExampleError, INDEX_NAME, generate_demos, prune_generated, render_index,
};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Content subdirectory holding the examples.
const EXAMPLES_DIR: &str = "helix-golf";

/// Public subdirectory receiving the recorded demos.
const GENERATED_DIR: &str = "generated";

/// Golf example commands.
#[derive(Subcommand)]
pub(crate) enum ExamplesCommand {
    /// Validate every example and write the generated index page.
    Validate(ExamplesArgs),
    /// Validate, then record a demo of each example with VHS and check its result.
    GenerateDemos(ExamplesArgs),
}

/// Arguments shared by the example commands.
#[derive(Args)]
pub(crate) struct ExamplesArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Only process these examples (file names without `.md`).
    names: Vec<String>,
}

impl ExamplesCommand {
    pub(crate) fn verbose(&self) -> bool {
        match self {
            Self::Validate(args) | Self::GenerateDemos(args) => args.config.verbose,
        }
    }

    /// Execute the examples subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Validate(args) => {
                args.validate()?;
                Ok(())
            }
            Self::GenerateDemos(args) => args.generate_demos(),
        }
    }
}

impl ExamplesArgs {
    fn validate(&self) -> Result<(Config, Vec<Example>), CliError> {
        let output = Output::new();
        let config = self.config.load(CliSettings::default())?;
        let dir = examples_dir(&config);

        let filter: HashSet<String> = self.names.iter().cloned().collect();
        let examples = Example::parse_all(&dir, &filter).map_err(with_location)?;

        if filter.is_empty() {
            let index_path = dir.join(format!("{INDEX_NAME}.md"));
            let index = render_index(&examples, &config.with_base(&format!("/{GENERATED_DIR}")));
            fs::write(&index_path, index)?;
            output.path("Wrote", &index_path);

            let generated_dir = config.content_resolved.public_dir.join(GENERATED_DIR);
            for path in prune_generated(&generated_dir, &examples)? {
                output.path("Removed", &path);
            }
        } else {
            for name in filter.iter().filter(|n| !examples.iter().any(|e| &e.name == *n)) {
                output.warning(&format!("no example named `{name}`"));
            }
        }

        output.done(&format!("{} examples are valid", examples.len()));
        Ok((config, examples))
    }

    fn generate_demos(&self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, examples) = self.validate()?;
        let generated_dir = config.content_resolved.public_dir.join(GENERATED_DIR);

        output.info(&format!(
            "Recording {} demos into {}",
            examples.len(),
            generated_dir.display()
        ));
        generate_demos(&examples, &generated_dir)?;

        output.done(&format!("Recorded {} demos", examples.len()));
        Ok(())
    }
}

/// Point structure errors at `file:line:column`.
fn with_location(err: ExampleError) -> CliError {
    let ExampleError::InvalidStructure { file, reason, .. } = &err else {
        return err.into();
    };
    match read_location(file, &err) {
        Some((line, column)) => {
            CliError::Validation(format!("{}:{line}:{column}: {reason}", file.display()))
        }
        None => err.into(),
    }
}

fn read_location(file: &Path, err: &ExampleError) -> Option<(usize, usize)> {
    let source = fs::read_to_string(file).ok()?;
    err.location(&source)
}

fn examples_dir(config: &Config) -> PathBuf {
    config.content_resolved.dir.join(EXAMPLES_DIR)
}
