//! Markdown to HTML rendering through a transformation pipeline.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

use crate::state::{TocEntry, heading_level_to_num, plain_text};
use crate::transform::{LinkBase, Pipeline, Transform};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from the first H1 heading.
    pub title: Option<String>,
    /// Table of contents entries (levels 2 and 3 with identifiers).
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer.
///
/// Parses with GitHub Flavored Markdown extensions, runs the configured
/// [`Pipeline`] over the event stream and serializes the result to HTML.
/// The first H1 heading is extracted as the title but still rendered.
///
/// ```
/// use golf_renderer::{HeadingIds, MarkdownRenderer, Pipeline};
///
/// let renderer = MarkdownRenderer::new().with_pipeline(Pipeline::new().with_step(HeadingIds));
/// let result = renderer.render("# Helix Golf\n\n## Text into Array\n");
///
/// assert_eq!(result.title.as_deref(), Some("Helix Golf"));
/// assert_eq!(result.toc[0].id, "text-into-array");
/// ```
#[derive(Default)]
pub struct MarkdownRenderer {
    pipeline: Pipeline,
    base: Option<String>,
}

impl MarkdownRenderer {
    /// Create a renderer with an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transformation pipeline.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Prefix root-relative links with `base` after the pipeline ran.
    #[must_use]
    pub fn with_base(mut self, base: Option<impl Into<String>>) -> Self {
        self.base = base.map(Into::into);
        self
    }

    /// Parser options: GFM tables, strikethrough, task lists, heading
    /// attributes and YAML front matter blocks.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
            | Options::ENABLE_GFM
    }

    /// Render markdown text.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, Self::parser_options()).collect();
        let mut events = self.pipeline.apply(events);
        if let Some(base) = &self.base {
            events = LinkBase::new(base.as_str()).apply(events);
        }

        let (title, toc) = collect_headings(&events);
        let mut html = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut html, events.into_iter());

        RenderResult { html, title, toc }
    }
}

/// Extract the title (first H1) and the level 2-3 table of contents.
fn collect_headings(events: &[Event<'_>]) -> (Option<String>, Vec<TocEntry>) {
    let mut title = None;
    let mut toc = Vec::new();

    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::Heading { level, id, .. }) = &events[i] {
            let end = events[i..]
                .iter()
                .position(|e| matches!(e, Event::End(TagEnd::Heading(_))))
                .map_or(events.len(), |offset| i + offset);
            let text = plain_text(&events[i + 1..end]);
            let level = heading_level_to_num(*level);

            if level == 1 && title.is_none() {
                title = Some(text.trim().to_owned());
            } else if (2..=3).contains(&level)
                && let Some(id) = id
            {
                toc.push(TocEntry {
                    level,
                    title: text.trim().to_owned(),
                    id: id.to_string(),
                });
            }
            i = end;
        }
        i += 1;
    }

    (title, toc)
}
