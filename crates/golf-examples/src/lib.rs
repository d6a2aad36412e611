//! Helix Golf example tooling.
//!
//! Every golf example is a markdown page with a fixed structure (see
//! [`Example`]). This crate validates those pages, parses their Helix key
//! sequences, renders the generated index page, and records a demo video of
//! each command with [VHS](https://github.com/charmbracelet/vhs), checking
//! that the command really produces the expected result.
//!
//! It also carries the JSON key case conversion used by the example
//! fixtures ([`rename_keys`]).

mod case;
mod demos;
mod example;
pub mod helix_config;
mod index;
mod keys;
mod tape;

use std::ops::Range;
use std::path::{Path, PathBuf};

pub use case::{Case, rename_keys, to_camel_case, to_snake_case};
pub use demos::{DemoFiles, generate_demos, prepare_demos, prune_generated};
pub use example::{Example, INDEX_NAME, MAX_LINE_LEN};
pub use index::{GENERATED_MARKER, render_index};
pub use keys::{KeyCode, KeyEvent, KeyModifiers, KeyParseError, parse_keys};
pub use tape::{Tape, VhsKey};

/// Error returned by example validation and demo recording.
#[derive(Debug, thiserror::Error)]
pub enum ExampleError {
    /// I/O error on an example or generated file.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page does not follow the example structure.
    #[error("{}: {reason} (bytes {}..{})", file.display(), span.start, span.end)]
    InvalidStructure {
        file: PathBuf,
        reason: String,
        span: Range<usize>,
    },

    /// The command is not valid Helix key notation. `span` points into the
    /// command.
    #[error("{}: invalid command: {reason} (at {}..{})", file.display(), span.start, span.end)]
    ParseKeys {
        file: PathBuf,
        reason: String,
        span: Range<usize>,
    },

    /// `vhs` is required for recording demos.
    #[error("`vhs` was not found on PATH, install it from https://github.com/charmbracelet/vhs")]
    MissingVhs,

    /// Recording failed or produced the wrong result.
    #[error("demo `{name}`: {reason}")]
    Demo { name: String, reason: String },
}

impl ExampleError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Line and column (1-based) of a structure error in the page `source`.
    ///
    /// Key errors carry a span into the command, not the page, and give `None`.
    #[must_use]
    pub fn location(&self, source: &str) -> Option<(usize, usize)> {
        let Self::InvalidStructure { span, .. } = self else {
            return None;
        };
        let offset = span.start.min(source.len());
        let before = source.get(..offset)?;
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        Some((line, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location() {
        let err = ExampleError::InvalidStructure {
            file: PathBuf::from("x.md"),
            reason: "expected heading `## Before`".to_owned(),
            span: 5..13,
        };
        assert_eq!(err.location("# T\n\n## Setup\n"), Some((3, 1)));
        assert_eq!(ExampleError::MissingVhs.location(""), None);
    }
}
