//! Sidebar navigation built from the theme configuration.

use golf_config::{Config, SidebarSource, ThemeOptions};

use crate::scanner::Document;

/// A link in the sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarEntry {
    pub label: String,
    /// Final href, base prefix included.
    pub link: String,
}

/// A labelled group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub label: String,
    pub entries: Vec<SidebarEntry>,
}

/// Resolved sidebar shared by every page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    pub groups: Vec<ResolvedGroup>,
    /// Non-fatal problems found while resolving (missing directories).
    pub warnings: Vec<String>,
}

impl Sidebar {
    /// Resolve the theme's sidebar groups against the scanned documents.
    ///
    /// Explicit items are used as declared, with root-relative links prefixed
    /// by the base path. Autogenerated groups list the non-draft documents
    /// directly inside the directory, ordered by `sidebar.order` (unordered
    /// pages last) and then by file name. A directory that does not exist
    /// yields an empty group and a warning.
    #[must_use]
    pub fn resolve(theme: &ThemeOptions, documents: &[Document], config: &Config) -> Self {
        let mut sidebar = Self::default();

        for group in &theme.sidebar {
            let entries = match group.source() {
                SidebarSource::Items(items) => items
                    .iter()
                    .map(|item| SidebarEntry {
                        label: item.label.clone(),
                        link: config.with_base(&item.link),
                    })
                    .collect(),
                SidebarSource::Autogenerate(directory) => {
                    if !config.content_resolved.dir.join(directory).is_dir() {
                        let warning = format!(
                            "sidebar group `{}`: directory `{directory}` not found in {}",
                            group.label,
                            config.content_resolved.dir.display()
                        );
                        tracing::warn!("{warning}");
                        sidebar.warnings.push(warning);
                    }
                    autogenerate(directory, documents, config)
                }
            };
            sidebar.groups.push(ResolvedGroup {
                label: group.label.clone(),
                entries,
            });
        }

        sidebar
    }
}

fn autogenerate(directory: &str, documents: &[Document], config: &Config) -> Vec<SidebarEntry> {
    let mut docs: Vec<&Document> = documents
        .iter()
        .filter(|doc| doc.dir == directory && !doc.front_matter.draft)
        .collect();
    docs.sort_by(|a, b| {
        let order = |doc: &Document| doc.front_matter.sidebar.order.unwrap_or(i64::MAX);
        order(a)
            .cmp(&order(b))
            .then_with(|| a.name().cmp(b.name()))
    });

    docs.into_iter()
        .map(|doc| SidebarEntry {
            label: doc.sidebar_label(),
            link: config.page_url(&doc.slug),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use golf_config::{SidebarGroup, SidebarLink};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::scanner::Scanner;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(content_dir: &Path, base: Option<&str>) -> Config {
        let mut config = Config::default();
        config.base = base.map(str::to_owned);
        config.content_resolved.dir = content_dir.to_path_buf();
        config
    }

    fn theme(groups: Vec<SidebarGroup>) -> ThemeOptions {
        ThemeOptions {
            sidebar: groups,
            ..ThemeOptions::default()
        }
    }

    #[test]
    fn test_autogenerate_orders_by_front_matter_then_name() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "helix-golf/zeta.md", "---\nsidebar:\n  order: 1\n---\n# Zeta");
        write(temp.path(), "helix-golf/alpha.md", "# Alpha");
        write(temp.path(), "helix-golf/beta.md", "---\ntitle: Beta Page\n---\n");
        write(temp.path(), "helix-golf/gamma.md", "---\nsidebar:\n  order: 0\n  label: G\n---\n");
        write(temp.path(), "helix-golf/nested/deep.md", "# Deep");
        write(temp.path(), "other.md", "# Other");
        let docs = Scanner::new(temp.path()).scan().unwrap();

        let sidebar = Sidebar::resolve(
            &theme(vec![SidebarGroup::autogenerated("Helix Golf", "helix-golf")]),
            &docs,
            &config(temp.path(), Some("/helix-golf")),
        );

        assert_eq!(
            sidebar.groups[0].entries,
            vec![
                SidebarEntry {
                    label: "G".to_owned(),
                    link: "/helix-golf/helix-golf/gamma/".to_owned(),
                },
                SidebarEntry {
                    label: "Zeta".to_owned(),
                    link: "/helix-golf/helix-golf/zeta/".to_owned(),
                },
                SidebarEntry {
                    label: "Alpha".to_owned(),
                    link: "/helix-golf/helix-golf/alpha/".to_owned(),
                },
                SidebarEntry {
                    label: "Beta Page".to_owned(),
                    link: "/helix-golf/helix-golf/beta/".to_owned(),
                },
            ]
        );
        assert!(sidebar.warnings.is_empty());
    }

    #[test]
    fn test_autogenerate_excludes_drafts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/a.md", "# A");
        write(temp.path(), "docs/b.md", "---\ndraft: true\n---\n# B");
        let docs = Scanner::new(temp.path()).scan().unwrap();

        let sidebar = Sidebar::resolve(
            &theme(vec![SidebarGroup::autogenerated("Docs", "/docs/")]),
            &docs,
            &config(temp.path(), None),
        );

        assert_eq!(sidebar.groups[0].entries.len(), 1);
        assert_eq!(sidebar.groups[0].entries[0].link, "/docs/a/");
    }

    #[test]
    fn test_missing_directory_gives_empty_group_and_warning() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "index.md", "# Home");
        let docs = Scanner::new(temp.path()).scan().unwrap();

        let sidebar = Sidebar::resolve(
            &theme(vec![SidebarGroup::autogenerated("Helix Golf", "helix-golf")]),
            &docs,
            &config(temp.path(), None),
        );

        assert_eq!(sidebar.groups.len(), 1);
        assert!(sidebar.groups[0].entries.is_empty());
        assert_eq!(sidebar.warnings.len(), 1);
        assert!(sidebar.warnings[0].contains("`helix-golf`"));
    }

    #[test]
    fn test_explicit_items_verbatim_with_base() {
        let temp = TempDir::new().unwrap();
        let sidebar = Sidebar::resolve(
            &theme(vec![SidebarGroup::with_items(
                "Links",
                vec![
                    SidebarLink {
                        label: "Intro".to_owned(),
                        link: "/intro/".to_owned(),
                    },
                    SidebarLink {
                        label: "Helix".to_owned(),
                        link: "https://helix-editor.com".to_owned(),
                    },
                ],
            )]),
            &[],
            &config(temp.path(), Some("/helix-golf")),
        );

        assert_eq!(
            sidebar.groups[0].entries,
            vec![
                SidebarEntry {
                    label: "Intro".to_owned(),
                    link: "/helix-golf/intro/".to_owned(),
                },
                SidebarEntry {
                    label: "Helix".to_owned(),
                    link: "https://helix-editor.com".to_owned(),
                },
            ]
        );
    }
}
