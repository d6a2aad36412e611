//! Decoration of links that leave the site.

use std::fmt::Write;

use golf_config::ExternalLinksOptions;
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

use super::Transform;
use crate::state::escape_html;

/// Rewrites absolute `http(s)://` and protocol-relative links.
///
/// The opening tag gets the configured properties and `rel` values, and the
/// configured text content is appended inside the link. Relative links and
/// email autolinks pass through untouched.
#[derive(Debug, Clone)]
pub struct ExternalLinks {
    options: ExternalLinksOptions,
}

impl ExternalLinks {
    /// Create the step from its configured options.
    #[must_use]
    pub fn new(options: ExternalLinksOptions) -> Self {
        Self { options }
    }

    fn open_tag(&self, dest: &str, title: &str) -> String {
        let mut tag = format!(r#"<a href="{}""#, escape_html(dest));
        if !title.is_empty() {
            let _ = write!(tag, r#" title="{}""#, escape_html(title));
        }
        for (name, value) in &self.options.properties {
            if name == "rel" {
                continue;
            }
            let _ = write!(tag, r#" {}="{}""#, escape_html(name), escape_html(value));
        }
        if !self.options.rel.is_empty() {
            let _ = write!(tag, r#" rel="{}""#, escape_html(&self.options.rel.join(" ")));
        }
        tag.push('>');
        tag
    }
}

fn is_external(dest: &str) -> bool {
    dest.starts_with("http://") || dest.starts_with("https://") || dest.starts_with("//")
}

impl Transform for ExternalLinks {
    fn name(&self) -> &'static str {
        "externalLinks"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        // One entry per open link: whether it was rewritten.
        let mut open = Vec::new();

        for event in events {
            match event {
                Event::Start(Tag::Link {
                    link_type,
                    ref dest_url,
                    ref title,
                    ..
                }) if link_type != LinkType::Email && is_external(dest_url) => {
                    open.push(true);
                    out.push(Event::InlineHtml(CowStr::from(
                        self.open_tag(dest_url, title),
                    )));
                }
                Event::Start(Tag::Link { .. }) => {
                    open.push(false);
                    out.push(event);
                }
                Event::End(TagEnd::Link) => {
                    if open.pop().unwrap_or(false) {
                        if let Some(content) = &self.options.content {
                            out.push(Event::InlineHtml(CowStr::from(escape_html(
                                &content.value,
                            ))));
                        }
                        out.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                    } else {
                        out.push(event);
                    }
                }
                other => out.push(other),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use golf_config::{LinkContent, LinkContentKind};
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Parser, html};

    use super::*;

    fn render(step: &ExternalLinks, markdown: &str) -> String {
        let events = step.apply(Parser::new(markdown).collect());
        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn helix_golf_options() -> ExternalLinksOptions {
        ExternalLinksOptions {
            content: Some(LinkContent {
                kind: LinkContentKind::Text,
                value: " ↗".to_owned(),
            }),
            properties: BTreeMap::from([("target".to_owned(), "_blank".to_owned())]),
            rel: vec!["noopener".to_owned()],
        }
    }

    #[test]
    fn test_external_link_decorated() {
        let html = render(
            &ExternalLinks::new(helix_golf_options()),
            "See [Helix](https://helix-editor.com).",
        );
        assert_eq!(
            html,
            "<p>See <a href=\"https://helix-editor.com\" target=\"_blank\" rel=\"noopener\">Helix ↗</a>.</p>\n"
        );
    }

    #[test]
    fn test_relative_links_untouched() {
        let html = render(
            &ExternalLinks::new(helix_golf_options()),
            "[intro](/helix-golf/intro/) and [local](./other)",
        );
        assert_eq!(
            html,
            "<p><a href=\"/helix-golf/intro/\">intro</a> and <a href=\"./other\">local</a></p>\n"
        );
    }

    #[test]
    fn test_protocol_relative_is_external() {
        let html = render(&ExternalLinks::new(ExternalLinksOptions::default()), "[cdn](//cdn.example.com/x)");
        assert_eq!(
            html,
            "<p><a href=\"//cdn.example.com/x\" rel=\"nofollow\">cdn</a></p>\n"
        );
    }

    #[test]
    fn test_title_preserved_and_escaped() {
        let html = render(
            &ExternalLinks::new(ExternalLinksOptions {
                rel: Vec::new(),
                ..ExternalLinksOptions::default()
            }),
            "[x](https://example.com \"A \\\"quoted\\\" title\")",
        );
        assert_eq!(
            html,
            "<p><a href=\"https://example.com\" title=\"A &quot;quoted&quot; title\">x</a></p>\n"
        );
    }

    #[test]
    fn test_email_autolink_untouched() {
        let html = render(&ExternalLinks::new(helix_golf_options()), "<someone@example.com>");
        assert_eq!(
            html,
            "<p><a href=\"mailto:someone@example.com\">someone@example.com</a></p>\n"
        );
    }
}
