//! `golf case` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::Term;
use golf_examples::{Case, rename_keys};
use serde_json::Value;

use crate::error::CliError;

/// Target naming style for object keys.
#[derive(Clone, Copy, ValueEnum)]
enum Style {
    /// `firstName`
    Camel,
    /// `first_name`
    Snake,
}

impl From<Style> for Case {
    fn from(style: Style) -> Self {
        match style {
            Style::Camel => Self::Camel,
            Style::Snake => Self::Snake,
        }
    }
}

/// Arguments for the case command.
#[derive(Args)]
pub(crate) struct CaseArgs {
    /// Naming style to convert keys to.
    #[arg(value_enum)]
    style: Style,

    /// JSON file to convert.
    file: PathBuf,
}

impl CaseArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let json = fs::read_to_string(&self.file)?;
        let converted = convert(&json, self.style.into())?;
        Term::stdout().write_line(&converted)?;
        Ok(())
    }
}

/// Rename every key of a JSON document and pretty-print the result.
fn convert(json: &str, case: Case) -> Result<String, CliError> {
    let value: Value = serde_json::from_str(json)?;
    let renamed = rename_keys(&value, &|key: &str| case.convert(key));
    Ok(serde_json::to_string_pretty(&renamed)?)
}
