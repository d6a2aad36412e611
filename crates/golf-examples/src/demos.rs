//! Demo recording with VHS.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::StrComparison;
use rayon::prelude::*;

use crate::ExampleError;
use crate::example::Example;
use crate::helix_config;
use crate::tape::Tape;

const VHS: &str = "vhs";

/// Files written for one example.
#[derive(Debug)]
pub struct DemoFiles {
    /// The VHS script.
    pub tape: PathBuf,
    /// The file Helix edits, initially holding `before`.
    pub file: PathBuf,
    /// The recording produced by VHS.
    pub video: PathBuf,
}

impl DemoFiles {
    fn new(example: &Example, generated_dir: &Path) -> Self {
        let file_name = if example.ext.is_empty() {
            example.name.clone()
        } else {
            format!("{}.{}", example.name, example.ext)
        };
        Self {
            tape: generated_dir.join(format!("{}.tape", example.name)),
            file: generated_dir.join(file_name),
            video: generated_dir.join(format!("{}.mp4", example.name)),
        }
    }
}

/// Write the Helix config plus a tape and before-file for each example.
///
/// This is everything [`generate_demos`] needs short of running VHS.
pub fn prepare_demos(
    examples: &[Example],
    generated_dir: &Path,
) -> Result<Vec<DemoFiles>, ExampleError> {
    fs::create_dir_all(generated_dir).map_err(|e| ExampleError::io(generated_dir, e))?;
    let config_path = generated_dir.join(helix_config::FILE_NAME);
    fs::write(&config_path, helix_config::render())
        .map_err(|e| ExampleError::io(&config_path, e))?;

    examples
        .iter()
        .map(|example| {
            let files = DemoFiles::new(example, generated_dir);
            let tape = Tape::new(example, generated_dir).to_string();
            fs::write(&files.tape, tape).map_err(|e| ExampleError::io(&files.tape, e))?;
            fs::write(&files.file, &example.before).map_err(|e| ExampleError::io(&files.file, e))?;
            Ok(files)
        })
        .collect()
}

/// Delete files in `generated_dir` that belong to no current example.
///
/// A file belongs to an example when it is named after it (`<name>` or
/// `<name>.<ext>`). The shared Helix config is kept. A missing directory is
/// not an error. Returns the removed paths, sorted.
pub fn prune_generated(
    generated_dir: &Path,
    examples: &[Example],
) -> Result<Vec<PathBuf>, ExampleError> {
    let entries = match fs::read_dir(generated_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ExampleError::io(generated_dir, e)),
    };

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ExampleError::io(generated_dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name == helix_config::FILE_NAME || belongs_to_example(&file_name, examples) {
            continue;
        }
        fs::remove_file(&path).map_err(|e| ExampleError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "Removed stale generated file");
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

fn belongs_to_example(file_name: &str, examples: &[Example]) -> bool {
    examples.iter().any(|example| {
        file_name
            .strip_prefix(example.name.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    })
}

/// Record a demo for every example and check each one ends in its `after`
/// state.
///
/// Recordings run in parallel, one `vhs` process per example.
///
/// # Errors
///
/// Returns `ExampleError::MissingVhs` if `vhs` is not on `PATH`, and
/// `ExampleError::Demo` if a recording fails or its result differs from the
/// expected contents.
pub fn generate_demos(examples: &[Example], generated_dir: &Path) -> Result<(), ExampleError> {
    let vhs = which::which(VHS).map_err(|_| ExampleError::MissingVhs)?;
    let files = prepare_demos(examples, generated_dir)?;

    examples
        .par_iter()
        .zip(files.par_iter())
        .try_for_each(|(example, files)| record(&vhs, example, files))
}

fn record(vhs: &Path, example: &Example, files: &DemoFiles) -> Result<(), ExampleError> {
    let demo_error = |reason: String| ExampleError::Demo {
        name: example.name.clone(),
        reason,
    };

    tracing::info!(example = %example.name, keys = %key_notation(example), "Recording demo");
    let output = Command::new(vhs)
        .arg(&files.tape)
        .output()
        .map_err(|e| demo_error(format!("failed to run {VHS}: {e}")))?;
    if !output.status.success() {
        return Err(demo_error(format!(
            "{VHS} exited with {}:\n{}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim_end()
        )));
    }

    let actual = fs::read_to_string(&files.file).map_err(|e| ExampleError::io(&files.file, e))?;
    check_result(example, &actual).map_err(demo_error)?;

    tracing::info!(example = %example.name, video = %files.video.display(), "Demo recorded");
    Ok(())
}

/// The parsed command written back in Helix notation.
fn key_notation(example: &Example) -> String {
    example.key_events.iter().map(ToString::to_string).collect()
}

/// Compare the edited file with the expected contents, ignoring surrounding
/// whitespace.
fn check_result(example: &Example, actual: &str) -> Result<(), String> {
    let actual = actual.trim();
    let expected = example.after.trim();
    if actual == expected {
        Ok(())
    } else {
        Err(format!(
            "the command does not produce the `## After` contents:\n{}",
            StrComparison::new(actual, expected)
        ))
    }
}
