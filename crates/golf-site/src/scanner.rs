//! Content discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::RenderError;
use crate::frontmatter::{FrontMatter, split_front_matter};

/// A markdown page found in the content directory.
#[derive(Clone, Debug)]
pub struct Document {
    /// Page slug without extension (`""` for the root index,
    /// `"helix-golf/text-into-array"` for a nested page).
    pub slug: String,
    /// Content subdirectory holding the file (`""` at the root).
    pub dir: String,
    /// Path to the markdown source.
    pub source_path: PathBuf,
    /// Parsed front matter (default when absent).
    pub front_matter: FrontMatter,
    /// Markdown body with the front matter stripped.
    pub body: String,
}

impl Document {
    /// File stem of the source (`index` for directory indexes).
    #[must_use]
    pub fn name(&self) -> &str {
        self.source_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }

    /// Page title: front matter `title`, else the first H1, else the file name.
    #[must_use]
    pub fn title(&self) -> String {
        if let Some(title) = &self.front_matter.title {
            return title.clone();
        }
        self.body
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .map_or_else(|| self.name().to_owned(), |title| title.trim().to_owned())
    }

    /// Label shown in autogenerated sidebar groups.
    #[must_use]
    pub fn sidebar_label(&self) -> String {
        self.front_matter
            .sidebar
            .label
            .clone()
            .unwrap_or_else(|| self.title())
    }

    /// Whether the page carries a `## Command` section (a golf example).
    #[must_use]
    pub fn is_golf_example(&self) -> bool {
        self.body.lines().any(|line| line.trim_end() == "## Command")
    }
}

/// Walks the content directory and loads every markdown page.
///
/// Hidden entries and entries starting with `_` are skipped. Entries of each
/// directory are visited in name order, so the result is deterministic.
pub struct Scanner {
    content_dir: PathBuf,
}

impl Scanner {
    /// Create a new Scanner rooted at `content_dir`.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Scan the content directory.
    ///
    /// Returns an empty Vec if the content directory doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Io` if a file cannot be read and
    /// `RenderError::FrontMatter` if its front matter is malformed.
    pub fn scan(&self) -> Result<Vec<Document>, RenderError> {
        let mut docs = Vec::new();
        if self.content_dir.is_dir() {
            self.scan_directory(&self.content_dir, "", &mut docs)?;
        } else {
            tracing::warn!(dir = %self.content_dir.display(), "Content directory not found");
        }
        tracing::debug!(count = docs.len(), "Scanned content");
        Ok(docs)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        prefix: &str,
        docs: &mut Vec<Document>,
    ) -> Result<(), RenderError> {
        let mut entries: Vec<_> = fs::read_dir(dir_path)
            .map_err(|e| RenderError::io(dir_path, e))?
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, name)
            })
            .filter(|(_, _, name)| !name.starts_with('.') && !name.starts_with('_'))
            .collect();
        entries.sort_by(|a, b| a.2.cmp(&b.2));

        for (path, is_dir, name) in entries {
            if is_dir {
                self.scan_directory(&path, &join_slug(prefix, &name), docs)?;
            } else if path.extension().is_some_and(|e| e == "md") {
                docs.push(load_document(path, prefix)?);
            }
        }
        Ok(())
    }
}

fn load_document(path: PathBuf, dir: &str) -> Result<Document, RenderError> {
    let content = fs::read_to_string(&path).map_err(|e| RenderError::io(&path, e))?;
    let (yaml, body) = split_front_matter(&content);
    let front_matter = match yaml {
        Some(yaml) => FrontMatter::from_yaml(yaml).map_err(|message| RenderError::FrontMatter {
            path: path.clone(),
            message,
        })?,
        None => FrontMatter::default(),
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug = if stem == "index" {
        dir.to_owned()
    } else {
        join_slug(dir, &stem)
    };

    Ok(Document {
        slug,
        dir: dir.to_owned(),
        front_matter,
        body: body.to_owned(),
        source_path: path,
    })
}

fn join_slug(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
