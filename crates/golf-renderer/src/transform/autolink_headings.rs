//! Self-links on headings.

use golf_config::AutolinkBehavior;
use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use super::Transform;
use crate::state::escape_html;

/// Adds a link to each heading pointing at its own identifier.
///
/// Headings without an `id` are left alone, so this step only has an effect
/// after [`HeadingIds`](super::HeadingIds).
#[derive(Debug, Clone, Copy)]
pub struct AutolinkHeadings {
    behavior: AutolinkBehavior,
}

impl AutolinkHeadings {
    #[must_use]
    pub fn new(behavior: AutolinkBehavior) -> Self {
        Self { behavior }
    }
}

fn icon_link(id: &str) -> String {
    format!(
        r##"<a aria-hidden="true" tabindex="-1" href="#{}"><span class="icon icon-link"></span></a>"##,
        escape_html(id)
    )
}

impl Transform for AutolinkHeadings {
    fn name(&self) -> &'static str {
        "autolinkHeadings"
    }

    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut current: Option<String> = None;

        for event in events {
            match event {
                Event::Start(Tag::Heading { id: Some(ref id), .. }) => {
                    let id = id.to_string();
                    out.push(event);
                    match self.behavior {
                        AutolinkBehavior::Prepend => {
                            out.push(Event::InlineHtml(CowStr::from(icon_link(&id))));
                        }
                        AutolinkBehavior::Wrap => out.push(Event::InlineHtml(CowStr::from(
                            format!(r##"<a href="#{}">"##, escape_html(&id)),
                        ))),
                        AutolinkBehavior::Append => {}
                    }
                    current = Some(id);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(id) = current.take() {
                        match self.behavior {
                            AutolinkBehavior::Append => {
                                out.push(Event::InlineHtml(CowStr::from(icon_link(&id))));
                            }
                            AutolinkBehavior::Wrap => {
                                out.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                            }
                            AutolinkBehavior::Prepend => {}
                        }
                    }
                    out.push(event);
                }
                other => out.push(other),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Options, Parser, html};

    use super::*;

    fn render(behavior: AutolinkBehavior, markdown: &str) -> String {
        let events = Parser::new_ext(markdown, Options::ENABLE_HEADING_ATTRIBUTES).collect();
        let events = AutolinkHeadings::new(behavior).apply(events);
        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            render(AutolinkBehavior::Wrap, "## Command {#command}"),
            "<h2 id=\"command\"><a href=\"#command\">Command</a></h2>\n"
        );
    }

    #[test]
    fn test_prepend() {
        assert_eq!(
            render(AutolinkBehavior::Prepend, "## Command {#command}"),
            "<h2 id=\"command\"><a aria-hidden=\"true\" tabindex=\"-1\" href=\"#command\">\
             <span class=\"icon icon-link\"></span></a>Command</h2>\n"
        );
    }

    #[test]
    fn test_append() {
        assert_eq!(
            render(AutolinkBehavior::Append, "## Command {#command}"),
            "<h2 id=\"command\">Command<a aria-hidden=\"true\" tabindex=\"-1\" href=\"#command\">\
             <span class=\"icon icon-link\"></span></a></h2>\n"
        );
    }

    #[test]
    fn test_heading_without_id_untouched() {
        assert_eq!(
            render(AutolinkBehavior::Wrap, "## Command"),
            "<h2>Command</h2>\n"
        );
    }
}
