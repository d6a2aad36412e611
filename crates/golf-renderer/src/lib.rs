//! Markdown rendering for the Helix Golf site.
//!
//! Documents are parsed with `pulldown-cmark`, rewritten by an ordered
//! [`Pipeline`] of [`Transform`] steps, and serialized to HTML. The steps
//! mirror the markdown pipeline declared in `golf.toml`:
//!
//! - [`HeadingIds`]: slug identifiers for headings
//! - [`ExternalLinks`]: attributes and trailing marker on off-site links
//! - [`AutolinkHeadings`]: self-links on headings
//!
//! [`LinkBase`] runs after every configured step when the site has a base
//! path.
//!
//! # Example
//!
//! ```
//! use golf_config::TransformStep;
//! use golf_renderer::{MarkdownRenderer, Pipeline};
//!
//! let renderer = MarkdownRenderer::new()
//!     .with_pipeline(Pipeline::from_steps(&[TransformStep::HeadingIds]))
//!     .with_base(Some("/helix-golf"));
//! let result = renderer.render("## Command\n\nSee [intro](/intro/).");
//!
//! assert!(result.html.contains(r#"<h2 id="command">"#));
//! assert!(result.html.contains(r#"href="/helix-golf/intro/""#));
//! ```

mod renderer;
mod state;
mod transform;

pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
pub use transform::{
    AutolinkHeadings, ExternalLinks, HeadingIds, LinkBase, Pipeline, Transform,
};
