//! Stable heading identifiers.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use super::Transform;
use crate::state::{plain_text, slugify};

/// Assigns an `id` to every heading that lacks one.
///
/// Identifiers are slugs of the heading text. Repeated slugs get `-1`, `-2`,
/// ... suffixes in document order. Explicit `{#id}` attributes are kept and
/// reserved, so generated identifiers never collide with them.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingIds;

impl Transform for HeadingIds {
    fn name(&self) -> &'static str {
        "headingIds"
    }

    fn apply<'a>(&self, mut events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut slugger = Slugger::default();
        for event in &events {
            if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
                slugger.reserve(id);
            }
        }

        let mut i = 0;
        while i < events.len() {
            if matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
                let end = events[i..]
                    .iter()
                    .position(|e| matches!(e, Event::End(TagEnd::Heading(_))))
                    .map_or(events.len(), |offset| i + offset);
                let text = plain_text(&events[i + 1..end]);
                if let Some(slug) = slugger.slug(&text)
                    && let Event::Start(Tag::Heading { id, .. }) = &mut events[i]
                {
                    *id = Some(CowStr::from(slug));
                }
                i = end;
            }
            i += 1;
        }
        events
    }
}

/// Generates unique slugs within one document.
#[derive(Debug, Default)]
struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    fn reserve(&mut self, id: &str) {
        self.occurrences.entry(id.to_owned()).or_insert(0);
    }

    /// Next unique slug for `text`, or `None` when the text has no sluggable
    /// characters.
    fn slug(&mut self, text: &str) -> Option<String> {
        let base = slugify(text);
        if base.is_empty() {
            return None;
        }
        let mut slug = base.clone();
        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{base}-{count}");
        }
        self.occurrences.insert(slug.clone(), 0);
        Some(slug)
    }
}
