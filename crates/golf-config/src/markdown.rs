//! Markdown transformation step declarations.
//!
//! Steps are declared in `golf.toml` as an ordered array of tables:
//!
//! ```toml
//! [[markdown.rehypePlugins]]
//! name = "headingIds"
//!
//! [[markdown.rehypePlugins]]
//! name = "externalLinks"
//! options = { content = { type = "text", value = " ↗" }, properties = { target = "_blank" }, rel = ["noopener"] }
//!
//! [[markdown.rehypePlugins]]
//! name = "autolinkHeadings"
//! options = { behavior = "wrap" }
//! ```
//!
//! Each declaration is converted into a typed [`TransformStep`]. Unknown step
//! names and unknown option keys are rejected.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ConfigError;

/// `[markdown]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub(crate) struct MarkdownConfig {
    pub rehype_plugins: Vec<StepDecl>,
}

/// One raw step declaration: identifier plus optional options table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StepDecl {
    pub name: String,
    #[serde(default)]
    pub options: Option<toml::Table>,
}

/// A typed markdown transformation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformStep {
    /// Assign stable `id`s to headings.
    HeadingIds,
    /// Decorate links that point outside the site.
    ExternalLinks(ExternalLinksOptions),
    /// Link headings to themselves.
    AutolinkHeadings(AutolinkHeadingsOptions),
}

impl TransformStep {
    /// Identifier used in `golf.toml`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::HeadingIds => HEADING_IDS,
            Self::ExternalLinks(_) => EXTERNAL_LINKS,
            Self::AutolinkHeadings(_) => AUTOLINK_HEADINGS,
        }
    }
}

const HEADING_IDS: &str = "headingIds";
const EXTERNAL_LINKS: &str = "externalLinks";
const AUTOLINK_HEADINGS: &str = "autolinkHeadings";

/// Options for [`TransformStep::ExternalLinks`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExternalLinksOptions {
    /// Content appended inside each external link.
    pub content: Option<LinkContent>,
    /// Extra attributes set on each external link (e.g. `target`).
    pub properties: BTreeMap<String, String>,
    /// Values joined into the `rel` attribute.
    pub rel: Vec<String>,
}

impl Default for ExternalLinksOptions {
    fn default() -> Self {
        Self {
            content: None,
            properties: BTreeMap::new(),
            rel: vec!["nofollow".to_owned()],
        }
    }
}

/// Node appended to external links.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkContent {
    #[serde(rename = "type")]
    pub kind: LinkContentKind,
    pub value: String,
}

/// Kind of appended node. Only text nodes are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkContentKind {
    Text,
}

/// Options for [`TransformStep::AutolinkHeadings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutolinkHeadingsOptions {
    pub behavior: AutolinkBehavior,
}

/// Where the self-link goes relative to the heading text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutolinkBehavior {
    /// Empty anchor before the heading text.
    #[default]
    Prepend,
    /// Empty anchor after the heading text.
    Append,
    /// Heading text wrapped in the anchor.
    Wrap,
}

impl StepDecl {
    /// Convert the raw declaration into a typed step.
    pub(crate) fn resolve(&self, index: usize) -> Result<TransformStep, ConfigError> {
        let field = format!("markdown.rehypePlugins[{index}]");
        match self.name.as_str() {
            HEADING_IDS => {
                if self.options.as_ref().is_some_and(|o| !o.is_empty()) {
                    return Err(ConfigError::Validation(format!(
                        "{field}: `{HEADING_IDS}` takes no options"
                    )));
                }
                Ok(TransformStep::HeadingIds)
            }
            EXTERNAL_LINKS => self
                .typed_options::<ExternalLinksOptions>(&field)
                .map(TransformStep::ExternalLinks),
            AUTOLINK_HEADINGS => self
                .typed_options::<AutolinkHeadingsOptions>(&field)
                .map(TransformStep::AutolinkHeadings),
            other => Err(ConfigError::Validation(format!(
                "{field}: unknown markdown step `{other}` \
                 (expected one of `{HEADING_IDS}`, `{EXTERNAL_LINKS}`, `{AUTOLINK_HEADINGS}`)"
            ))),
        }
    }

    fn typed_options<T>(&self, field: &str) -> Result<T, ConfigError>
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        match &self.options {
            None => Ok(T::default()),
            Some(table) => toml::Value::Table(table.clone())
                .try_into()
                .map_err(|e| ConfigError::Validation(format!("{field}.options: {e}"))),
        }
    }
}

/// Resolve all declarations and check their ordering.
///
/// `autolinkHeadings` links to heading identifiers, so `headingIds` must be
/// declared before it. Each step may appear at most once.
pub(crate) fn resolve_pipeline(decls: &[StepDecl]) -> Result<Vec<TransformStep>, ConfigError> {
    let steps = decls
        .iter()
        .enumerate()
        .map(|(i, decl)| decl.resolve(i))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, step) in steps.iter().enumerate() {
        if steps[..i].iter().any(|prev| prev.name() == step.name()) {
            return Err(ConfigError::Validation(format!(
                "markdown.rehypePlugins: `{}` is declared more than once",
                step.name()
            )));
        }
    }

    let position = |name: &str| steps.iter().position(|s| s.name() == name);
    if let Some(autolink) = position(AUTOLINK_HEADINGS) {
        match position(HEADING_IDS) {
            Some(ids) if ids < autolink => {}
            Some(_) => {
                return Err(ConfigError::Validation(format!(
                    "markdown.rehypePlugins: `{HEADING_IDS}` must come before `{AUTOLINK_HEADINGS}`"
                )));
            }
            None => {
                return Err(ConfigError::Validation(format!(
                    "markdown.rehypePlugins: `{AUTOLINK_HEADINGS}` requires `{HEADING_IDS}` earlier in the pipeline"
                )));
            }
        }
    }

    Ok(steps)
}
