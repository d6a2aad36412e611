//! Ordered markdown transformation steps.
//!
//! A [`Transform`] receives the event sequence produced by the previous step
//! and returns a rewritten one. [`Pipeline`] applies its steps in declaration
//! order, so a step can rely on the output of every step before it (heading
//! self-links need the identifiers assigned by [`HeadingIds`]).

mod autolink_headings;
mod external_links;
mod heading_ids;
mod link_base;

use golf_config::TransformStep;
use pulldown_cmark::Event;

pub use autolink_headings::AutolinkHeadings;
pub use external_links::ExternalLinks;
pub use heading_ids::HeadingIds;
pub use link_base::LinkBase;

/// One stage of the markdown pipeline.
pub trait Transform: Send + Sync {
    /// Identifier for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Rewrite a document's events.
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>>;
}

/// Ordered sequence of transforms.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from configured steps, in order.
    #[must_use]
    pub fn from_steps(steps: &[TransformStep]) -> Self {
        steps.iter().fold(Self::new(), |pipeline, step| match step {
            TransformStep::HeadingIds => pipeline.with_step(HeadingIds),
            TransformStep::ExternalLinks(options) => {
                pipeline.with_step(ExternalLinks::new(options.clone()))
            }
            TransformStep::AutolinkHeadings(options) => {
                pipeline.with_step(AutolinkHeadings::new(options.behavior))
            }
        })
    }

    /// Append a step.
    #[must_use]
    pub fn with_step<T: Transform + 'static>(mut self, step: T) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Names of the steps, in order.
    pub fn step_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|step| step.name())
    }

    /// Run every step over `events`.
    pub fn apply<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        self.steps
            .iter()
            .fold(events, |events, step| step.apply(events))
    }
}
