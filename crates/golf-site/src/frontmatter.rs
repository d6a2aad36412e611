//! YAML front matter at the top of content pages.
//!
//! ```markdown
//! ---
//! title: Text into Array
//! description: Turn lines into a JSON array
//! sidebar:
//!   order: 2
//! ---
//! ```

use serde::Deserialize;

/// Front matter fields understood by the site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Page title (overrides H1 extraction).
    pub title: Option<String>,
    /// Short page description, emitted as `<meta name="description">`.
    pub description: Option<String>,
    /// Sidebar placement.
    pub sidebar: SidebarMeta,
    /// Drafts are neither emitted nor listed.
    pub draft: bool,
}

/// `sidebar` front matter table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SidebarMeta {
    /// Position within an autogenerated group (lower first).
    pub order: Option<i64>,
    /// Label used instead of the page title.
    pub label: Option<String>,
}

impl FrontMatter {
    /// Parse front matter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns the YAML error message if the content is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(trimmed).map_err(|e| format!("Invalid YAML: {e}"))
    }
}

/// Split a `---` delimited front matter block from the body.
///
/// Returns `(None, content)` when the document has no front matter.
#[must_use]
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, content)
}
