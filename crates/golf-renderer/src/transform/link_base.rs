//! Base path prefixing for root-relative links.

use golf_config::prefix_base;
use pulldown_cmark::{CowStr, Event, Tag};

use super::Transform;

/// Prefixes root-relative link and image destinations with the site base.
#[derive(Debug, Clone)]
pub struct LinkBase {
    base: String,
}

impl LinkBase {
    /// Create the step for a normalized base path (e.g. `/helix-golf`).
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn rewrite<'a>(&self, dest: CowStr<'a>) -> CowStr<'a> {
        let prefixed = prefix_base(Some(self.base.as_str()), &dest);
        if prefixed == *dest {
            dest
        } else {
            CowStr::from(prefixed)
        }
    }
}

impl Transform for LinkBase {
    fn name(&self) -> &'static str {
        "linkBase"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        events
            .into_iter()
            .map(|event| match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => Event::Start(Tag::Link {
                    link_type,
                    dest_url: self.rewrite(dest_url),
                    title,
                    id,
                }),
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => Event::Start(Tag::Image {
                    link_type,
                    dest_url: self.rewrite(dest_url),
                    title,
                    id,
                }),
                other => other,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Parser, html};

    use super::*;

    fn render(markdown: &str) -> String {
        let events = LinkBase::new("/helix-golf").apply(Parser::new(markdown).collect());
        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    #[test]
    fn test_root_relative_link_prefixed() {
        assert_eq!(
            render("[intro](/helix-golf-intro/)"),
            "<p><a href=\"/helix-golf/helix-golf-intro/\">intro</a></p>\n"
        );
    }

    #[test]
    fn test_image_prefixed() {
        assert_eq!(
            render("![demo](/generated/demo.gif)"),
            "<p><img src=\"/helix-golf/generated/demo.gif\" alt=\"demo\" /></p>\n"
        );
    }

    #[test]
    fn test_content_dir_named_like_base_prefixed() {
        assert_eq!(
            render("[upper](/helix-golf/uppercase-file/)"),
            "<p><a href=\"/helix-golf/helix-golf/uppercase-file/\">upper</a></p>\n"
        );
    }

    #[test]
    fn test_other_links_untouched() {
        assert_eq!(
            render("[a](./x) [b](https://example.com) [c](#top) [d](//cdn.example.com/x)"),
            "<p><a href=\"./x\">a</a> <a href=\"https://example.com\">b</a> \
             <a href=\"#top\">c</a> <a href=\"//cdn.example.com/x\">d</a></p>\n"
        );
    }
}
