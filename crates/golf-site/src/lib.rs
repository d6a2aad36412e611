//! Content discovery, navigation and static output for the Helix Golf site.
//!
//! # Quick Start
//!
//! ```ignore
//! use golf_config::Config;
//! use golf_site::StaticSiteBuilder;
//!
//! let config = Config::load(None, None)?;
//! let out_dir = config.build_resolved.out_dir.clone();
//! let report = StaticSiteBuilder::new(&config).build(&out_dir)?;
//! println!("{} pages", report.pages);
//! ```

mod builder;
mod frontmatter;
mod preview;
mod scanner;
mod sidebar;
mod template;

use std::path::{Path, PathBuf};

use golf_config::{ConfigError, Slot};

pub use builder::{BuildReport, StaticSiteBuilder};
pub use frontmatter::{FrontMatter, SidebarMeta, split_front_matter};
pub use preview::insert_preview;
pub use scanner::{Document, Scanner};
pub use sidebar::{ResolvedGroup, Sidebar, SidebarEntry};
pub use template::{Layout, PageData, render_page};

/// Error returned when building the site fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// I/O error on a source or output path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A slot override references a file that does not exist.
    #[error("Override for slot `{slot:?}` not found: {}", path.display())]
    MissingOverride { slot: Slot, path: PathBuf },
    /// Malformed YAML front matter.
    #[error("Invalid front matter in {}: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },
    /// The output directory would contain (or be) a source directory, so
    /// cleaning it would delete sources.
    #[error(
        "Refusing to clean output directory {}: it contains {}",
        out_dir.display(),
        source_dir.display()
    )]
    UnsafeOutDir { out_dir: PathBuf, source_dir: PathBuf },
    /// Pages cannot be laid out (e.g. two sources map to one URL).
    #[error("Template error: {0}")]
    Template(String),
}

impl RenderError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
