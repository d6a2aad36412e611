//! Documentation theme options.
//!
//! The theme is declared as the single `starlight` integration:
//!
//! ```toml
//! [[integrations]]
//! name = "starlight"
//!
//! [integrations.options]
//! title = "Helix Golf"
//! customCss = ["./src/globals.css"]
//!
//! [integrations.options.social]
//! github = "https://github.com/nikitarevenco/helix-golf"
//!
//! [[integrations.options.sidebar]]
//! label = "Helix Golf"
//! autogenerate = { directory = "helix-golf" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::{ConfigError, require_http_url, require_non_empty};

/// Identifier of the documentation theme integration.
pub const THEME_INTEGRATION: &str = "starlight";

/// One raw `[[integrations]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct IntegrationDecl {
    pub name: String,
    #[serde(default)]
    pub options: toml::Table,
}

/// Theme configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ThemeOptions {
    /// Site title shown in the header and in every page `<title>`.
    pub title: String,
    /// Platform name to profile URL.
    #[serde(default)]
    pub social: BTreeMap<String, String>,
    /// Named layout regions replaced by custom markup files.
    #[serde(default)]
    pub components: BTreeMap<Slot, String>,
    /// Sidebar groups in display order.
    #[serde(default)]
    pub sidebar: Vec<SidebarGroup>,
    /// Stylesheets linked from every page, in order.
    #[serde(default)]
    pub custom_css: Vec<String>,
    /// Extra tags injected into `<head>`.
    #[serde(default)]
    pub head: Vec<HeadTag>,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            social: BTreeMap::new(),
            components: BTreeMap::new(),
            sidebar: Vec::new(),
            custom_css: Vec::new(),
            head: Vec::new(),
        }
    }
}

/// Layout regions that can be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Slot {
    Head,
    Header,
    Sidebar,
    Footer,
    PageTitle,
    ThemeProvider,
    ThemeSelect,
}

/// A sidebar group: a label plus either explicit links or a directory to list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    pub label: String,
    #[serde(default)]
    items: Option<Vec<SidebarLink>>,
    #[serde(default)]
    autogenerate: Option<Autogenerate>,
}

/// Explicit sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarLink {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct Autogenerate {
    directory: String,
}

/// Where a sidebar group's entries come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSource<'a> {
    /// Entries used verbatim.
    Items(&'a [SidebarLink]),
    /// Entries derived from the documents in this content subdirectory.
    Autogenerate(&'a str),
}

impl SidebarGroup {
    /// Build a group that lists a content directory.
    #[must_use]
    pub fn autogenerated(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            items: None,
            autogenerate: Some(Autogenerate {
                directory: directory.into(),
            }),
        }
    }

    /// Build a group with explicit links.
    #[must_use]
    pub fn with_items(label: impl Into<String>, items: Vec<SidebarLink>) -> Self {
        Self {
            label: label.into(),
            items: Some(items),
            autogenerate: None,
        }
    }

    /// Source of this group's entries.
    ///
    /// Only meaningful after [`ThemeOptions::validate`]; an invalid group with
    /// neither source yields empty items.
    #[must_use]
    pub fn source(&self) -> SidebarSource<'_> {
        match (&self.items, &self.autogenerate) {
            (_, Some(auto)) => SidebarSource::Autogenerate(auto.directory.trim_matches('/')),
            (Some(items), None) => SidebarSource::Items(items),
            (None, None) => SidebarSource::Items(&[]),
        }
    }
}

/// Tag injected into every page's `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub content: Option<String>,
}

const HEAD_TAGS: &[&str] = &[
    "title", "base", "link", "style", "meta", "script", "noscript", "template",
];

impl ThemeOptions {
    /// Validate theme options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "starlight.title")?;

        for (platform, url) in &self.social {
            require_http_url(url, &format!("starlight.social.{platform}"))?;
        }

        for (i, group) in self.sidebar.iter().enumerate() {
            let field = format!("starlight.sidebar[{i}]");
            require_non_empty(&group.label, &format!("{field}.label"))?;
            match (&group.items, &group.autogenerate) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Validation(format!(
                        "{field}: `items` and `autogenerate` are mutually exclusive"
                    )));
                }
                (None, None) => {
                    return Err(ConfigError::Validation(format!(
                        "{field}: one of `items` or `autogenerate` is required"
                    )));
                }
                (None, Some(auto)) => {
                    require_non_empty(&auto.directory, &format!("{field}.autogenerate.directory"))?;
                }
                (Some(items), None) => {
                    for (j, item) in items.iter().enumerate() {
                        require_non_empty(&item.label, &format!("{field}.items[{j}].label"))?;
                        require_non_empty(&item.link, &format!("{field}.items[{j}].link"))?;
                    }
                }
            }
        }

        let mut stylesheets = BTreeMap::new();
        for (i, css) in self.custom_css.iter().enumerate() {
            require_non_empty(css, &format!("starlight.customCss[{i}]"))?;
            if let Some(first) = stylesheets.insert(stylesheet_name(css), css) {
                return Err(ConfigError::Validation(format!(
                    "starlight.customCss[{i}]: `{css}` has the same file name as `{first}`"
                )));
            }
        }

        for (i, tag) in self.head.iter().enumerate() {
            if !HEAD_TAGS.contains(&tag.tag.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "starlight.head[{i}].tag: `{}` cannot be injected into <head>",
                    tag.tag
                )));
            }
        }

        for (slot, path) in &self.components {
            require_non_empty(path, &format!("starlight.components.{slot:?}"))?;
        }

        Ok(())
    }
}

/// File name under which a custom stylesheet is published.
///
/// ```
/// assert_eq!(golf_config::stylesheet_name("./src/globals.css"), "globals.css");
/// ```
#[must_use]
pub fn stylesheet_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_owned(), |name| name.to_string_lossy().into_owned())
}

/// Pick the theme out of the declared integrations.
///
/// Exactly one theme integration is required. A missing one, a repeated one
/// or an unknown integration name is an error.
pub(crate) fn resolve_theme(decls: &[IntegrationDecl]) -> Result<ThemeOptions, ConfigError> {
    let mut theme = None;
    for (i, decl) in decls.iter().enumerate() {
        if decl.name != THEME_INTEGRATION {
            return Err(ConfigError::Validation(format!(
                "integrations[{i}]: unknown integration `{}` (expected `{THEME_INTEGRATION}`)",
                decl.name
            )));
        }
        if theme.is_some() {
            return Err(ConfigError::Validation(format!(
                "integrations[{i}]: `{THEME_INTEGRATION}` is declared more than once"
            )));
        }
        let options: ThemeOptions = toml::Value::Table(decl.options.clone())
            .try_into()
            .map_err(|e| ConfigError::Validation(format!("integrations[{i}].options: {e}")))?;
        theme = Some(options);
    }
    theme.ok_or_else(|| {
        ConfigError::Validation(format!(
            "integrations: no `{THEME_INTEGRATION}` integration declared"
        ))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn theme(toml: &str) -> Result<ThemeOptions, ConfigError> {
        #[derive(Deserialize)]
        struct Wrapper {
            integrations: Vec<IntegrationDecl>,
        }
        let wrapper: Wrapper = toml::from_str(toml)?;
        let theme = resolve_theme(&wrapper.integrations)?;
        theme.validate()?;
        Ok(theme)
    }

    #[test]
    fn test_full_theme() {
        let theme = theme(
            r##"
[[integrations]]
name = "starlight"

[integrations.options]
title = "Helix Golf"
customCss = ["./src/globals.css"]

[integrations.options.social]
github = "https://github.com/nikitarevenco/helix-golf"

[integrations.options.components]
ThemeProvider = "./src/ThemeProvider.html"
ThemeSelect = "./src/ThemeSelect.html"

[[integrations.options.sidebar]]
label = "Helix Golf"
autogenerate = { directory = "helix-golf" }

[[integrations.options.head]]
tag = "meta"
attrs = { name = "theme-color", content = "#1e1e2e" }
"##,
        )
        .unwrap();

        assert_eq!(theme.title, "Helix Golf");
        assert_eq!(theme.custom_css, vec!["./src/globals.css".to_owned()]);
        assert_eq!(
            theme.social.get("github").map(String::as_str),
            Some("https://github.com/nikitarevenco/helix-golf")
        );
        assert_eq!(
            theme.components.keys().copied().collect::<Vec<_>>(),
            vec![Slot::ThemeProvider, Slot::ThemeSelect]
        );
        assert_eq!(
            theme.sidebar[0].source(),
            SidebarSource::Autogenerate("helix-golf")
        );
        assert_eq!(theme.head[0].attrs["name"], "theme-color");
    }

    #[test]
    fn test_no_integration_rejected() {
        let err = theme("integrations = []").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("no `starlight` integration declared"));
    }

    #[test]
    fn test_stylesheet_name() {
        assert_eq!(stylesheet_name("./src/globals.css"), "globals.css");
        assert_eq!(stylesheet_name("theme.css"), "theme.css");
    }

    #[test]
    fn test_stylesheets_with_same_file_name_rejected() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"
options = { title = "Helix Golf", customCss = ["./src/globals.css", "./theme/globals.css"] }
"#,
        )
        .unwrap_err();
        assert!(
            err.to_string()
                .contains("`./theme/globals.css` has the same file name as `./src/globals.css`"),
            "{err}"
        );
    }

    #[test]
    fn test_unknown_integration_rejected() {
        let err = theme(
            r#"
[[integrations]]
name = "tailwind"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown integration `tailwind`"));
    }

    #[test]
    fn test_duplicate_theme_rejected() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"
options = { title = "A" }

[[integrations]]
name = "starlight"
options = { title = "B" }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_unknown_theme_key_rejected() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"
options = { title = "A", customCSS = ["x.css"] }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("customCSS"), "{err}");
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"
options = { title = "A", components = { Banner = "./banner.html" } }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"
options = { social = {} }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("title"), "{err}");
    }

    #[test]
    fn test_sidebar_group_needs_exactly_one_source() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"

[integrations.options]
title = "A"

[[integrations.options.sidebar]]
label = "Empty"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("one of `items` or `autogenerate`"));

        let err = theme(
            r#"
[[integrations]]
name = "starlight"

[integrations.options]
title = "A"

[[integrations.options.sidebar]]
label = "Both"
items = [{ label = "Intro", link = "/intro/" }]
autogenerate = { directory = "guides" }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn test_explicit_items_source() {
        let theme = theme(
            r#"
[[integrations]]
name = "starlight"

[integrations.options]
title = "A"

[[integrations.options.sidebar]]
label = "Start"
items = [{ label = "Intro", link = "/intro/" }]
"#,
        )
        .unwrap();
        let SidebarSource::Items(items) = theme.sidebar[0].source() else {
            panic!("expected explicit items");
        };
        assert_eq!(items[0].link, "/intro/");
    }

    #[test]
    fn test_social_requires_http_url() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"
options = { title = "A", social = { github = "github.com/x" } }
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("starlight.social.github"));
    }

    #[test]
    fn test_head_tag_must_be_head_element() {
        let err = theme(
            r#"
[[integrations]]
name = "starlight"

[integrations.options]
title = "A"

[[integrations.options.head]]
tag = "div"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("`div`"));
    }
}
