//! HTML page layout for static site generation.
//!
//! The layout is fixed: `<head>`, a header with the site title and social
//! links, the sidebar, the page content and an "On this page" list. Named
//! regions can be replaced through slot overrides (see [`Layout`]).

use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;

use golf_config::{Config, HeadTag, Slot, stylesheet_name};
use golf_renderer::{TocEntry, escape_html};

use crate::RenderError;
use crate::sidebar::Sidebar;

/// Output directory (under the site root) for copied stylesheets.
pub const ASSETS_DIR: &str = "_golf";

/// Site-wide layout data shared by every page.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub site_title: String,
    /// Href of the home page (base included).
    pub home_href: String,
    /// `(platform, url)` pairs in platform order.
    pub social: Vec<(String, String)>,
    /// Stylesheet hrefs in declared order.
    pub stylesheets: Vec<String>,
    pub head_tags: Vec<HeadTag>,
    /// Slot overrides with their file contents loaded.
    pub overrides: BTreeMap<Slot, String>,
}

impl Layout {
    /// Build the layout from configuration, loading override files.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::MissingOverride` if a slot override file does not
    /// exist and `RenderError::Io` if it cannot be read.
    pub fn from_config(config: &Config) -> Result<Self, RenderError> {
        let theme = config.theme();

        let mut overrides = BTreeMap::new();
        for (slot, path) in &theme.components {
            let resolved = config.resolve_asset(path);
            if !resolved.is_file() {
                return Err(RenderError::MissingOverride {
                    slot: *slot,
                    path: resolved,
                });
            }
            let markup = fs::read_to_string(&resolved).map_err(|e| RenderError::io(&resolved, e))?;
            tracing::debug!(slot = ?slot, path = %resolved.display(), "Loaded slot override");
            overrides.insert(*slot, markup);
        }

        let stylesheets = theme
            .custom_css
            .iter()
            .map(|css| config.with_base(&format!("/{ASSETS_DIR}/{}", stylesheet_name(css))))
            .collect();

        Ok(Self {
            site_title: theme.title.clone(),
            home_href: config.page_url(""),
            social: theme
                .social
                .iter()
                .map(|(platform, url)| (platform.clone(), url.clone()))
                .collect(),
            stylesheets,
            head_tags: theme.head.clone(),
            overrides,
        })
    }

    fn slot(&self, slot: Slot) -> Option<&str> {
        self.overrides.get(&slot).map(String::as_str)
    }
}

/// Per-page data.
pub struct PageData<'a> {
    pub title: String,
    pub description: Option<String>,
    /// Page URL (base included).
    pub url: String,
    /// Absolute URL, when `site` is configured.
    pub canonical: Option<String>,
    pub html_content: String,
    pub toc: Vec<TocEntry>,
    pub sidebar: &'a Sidebar,
}

/// Render a complete static HTML page.
pub fn render_page(layout: &Layout, page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(8192 + page.html_content.len());

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    match layout.slot(Slot::Head) {
        Some(markup) => push_region(&mut html, markup),
        None => render_head(&mut html, layout, page),
    }
    if let Some(markup) = layout.slot(Slot::ThemeProvider) {
        push_region(&mut html, markup);
    }
    html.push_str("</head>\n<body>\n");

    html.push_str("<header class=\"header\">\n");
    match layout.slot(Slot::Header) {
        Some(markup) => push_region(&mut html, markup),
        None => render_header(&mut html, layout),
    }
    if let Some(markup) = layout.slot(Slot::ThemeSelect) {
        push_region(&mut html, markup);
    }
    html.push_str("</header>\n");

    html.push_str("<div class=\"page\">\n");
    html.push_str("<nav class=\"sidebar\" aria-label=\"Main\">\n");
    match layout.slot(Slot::Sidebar) {
        Some(markup) => push_region(&mut html, markup),
        None => render_sidebar(&mut html, page.sidebar, &page.url),
    }
    html.push_str("</nav>\n");

    html.push_str("<main>\n<div class=\"content\">\n");
    if let Some(markup) = layout.slot(Slot::PageTitle) {
        push_region(&mut html, markup);
    }
    html.push_str("<article class=\"markdown\">\n");
    html.push_str(&page.html_content);
    html.push_str("</article>\n</div>\n");
    render_toc(&mut html, &page.toc);
    html.push_str("</main>\n</div>\n");

    if let Some(markup) = layout.slot(Slot::Footer) {
        html.push_str("<footer>\n");
        push_region(&mut html, markup);
        html.push_str("</footer>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_region(html: &mut String, markup: &str) {
    html.push_str(markup.trim_end());
    html.push('\n');
}

fn render_head(html: &mut String, layout: &Layout, page: &PageData<'_>) {
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let title = if page.title == layout.site_title {
        escape_html(&layout.site_title)
    } else {
        format!(
            "{} | {}",
            escape_html(&page.title),
            escape_html(&layout.site_title)
        )
    };
    let _ = writeln!(html, "<title>{title}</title>");
    if let Some(description) = &page.description {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape_html(description)
        );
    }
    if let Some(canonical) = &page.canonical {
        let _ = writeln!(
            html,
            "<link rel=\"canonical\" href=\"{}\">",
            escape_html(canonical)
        );
    }
    for href in &layout.stylesheets {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_html(href)
        );
    }
    for tag in &layout.head_tags {
        render_head_tag(html, tag);
    }
}

const VOID_TAGS: &[&str] = &["base", "link", "meta"];

fn render_head_tag(html: &mut String, tag: &HeadTag) {
    let _ = write!(html, "<{}", tag.tag);
    for (name, value) in &tag.attrs {
        let _ = write!(html, " {}=\"{}\"", escape_html(name), escape_html(value));
    }
    html.push('>');
    if !VOID_TAGS.contains(&tag.tag.as_str()) {
        if let Some(content) = &tag.content {
            html.push_str(content);
        }
        let _ = write!(html, "</{}>", tag.tag);
    }
    html.push('\n');
}

fn render_header(html: &mut String, layout: &Layout) {
    let _ = writeln!(
        html,
        "<a class=\"site-title\" href=\"{}\">{}</a>",
        escape_html(&layout.home_href),
        escape_html(&layout.site_title)
    );
    if layout.social.is_empty() {
        return;
    }
    html.push_str("<ul class=\"social-icons\">\n");
    for (platform, url) in &layout.social {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\" rel=\"me\" data-platform=\"{}\">{}</a></li>",
            escape_html(url),
            escape_html(platform),
            escape_html(platform)
        );
    }
    html.push_str("</ul>\n");
}

fn render_sidebar(html: &mut String, sidebar: &Sidebar, current_url: &str) {
    html.push_str("<ul class=\"top-level\">\n");
    for group in &sidebar.groups {
        html.push_str("<li>\n<details open>\n");
        let _ = writeln!(
            html,
            "<summary class=\"group-label\">{}</summary>",
            escape_html(&group.label)
        );
        html.push_str("<ul>\n");
        for entry in &group.entries {
            let current = if entry.link == current_url {
                " aria-current=\"page\""
            } else {
                ""
            };
            let _ = writeln!(
                html,
                "<li><a href=\"{}\"{current}>{}</a></li>",
                escape_html(&entry.link),
                escape_html(&entry.label)
            );
        }
        html.push_str("</ul>\n</details>\n</li>\n");
    }
    html.push_str("</ul>\n");
}

fn render_toc(html: &mut String, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    html.push_str("<aside class=\"toc\">\n<h2>On this page</h2>\n<ul>\n");
    for entry in toc {
        let indent = if entry.level >= 3 { " class=\"nested\"" } else { "" };
        let _ = writeln!(
            html,
            "<li{indent}><a href=\"#{}\">{}</a></li>",
            escape_html(&entry.id),
            escape_html(&entry.title)
        );
    }
    html.push_str("</ul>\n</aside>\n");
}
