//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use golf_config::{Config, stylesheet_name};
use golf_renderer::{MarkdownRenderer, Pipeline};
use rayon::prelude::*;

use crate::RenderError;
use crate::preview::insert_preview;
use crate::scanner::{Document, Scanner};
use crate::sidebar::Sidebar;
use crate::template::{ASSETS_DIR, Layout, PageData, render_page};

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of pages written.
    pub pages: usize,
    /// URLs of the written pages, in content order.
    pub urls: Vec<String>,
    /// Non-fatal problems (missing sidebar directories).
    pub warnings: Vec<String>,
}

/// Builds the static site from the configured content directory.
pub struct StaticSiteBuilder<'a> {
    config: &'a Config,
}

impl<'a> StaticSiteBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build the site into `out_dir`.
    ///
    /// The directory is removed and recreated. Every non-draft page is
    /// rendered in parallel and written to `<slug>/index.html`; custom
    /// stylesheets are copied to `_golf/` and the public directory is copied
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be read, a slot override is
    /// missing, two pages map to the same URL, or output cannot be written.
    pub fn build(&self, out_dir: &Path) -> Result<BuildReport, RenderError> {
        let config = self.config;
        let documents = Scanner::new(&config.content_resolved.dir).scan()?;
        let sidebar = Sidebar::resolve(config.theme(), &documents, config);
        let layout = Layout::from_config(config)?;
        let pipeline = Pipeline::from_steps(config.pipeline());
        tracing::debug!(steps = ?pipeline.step_names().collect::<Vec<_>>(), "Markdown pipeline");
        let renderer = MarkdownRenderer::new()
            .with_pipeline(pipeline)
            .with_base(config.base.clone());

        let pages: Vec<&Document> = documents
            .iter()
            .filter(|doc| !doc.front_matter.draft)
            .collect();
        check_unique_slugs(&pages)?;

        if out_dir.exists() {
            self.check_out_dir(out_dir)?;
            fs::remove_dir_all(out_dir).map_err(|e| RenderError::io(out_dir, e))?;
        }
        fs::create_dir_all(out_dir).map_err(|e| RenderError::io(out_dir, e))?;

        tracing::info!(pages = pages.len(), out = %out_dir.display(), "Building site");

        let urls = pages
            .par_iter()
            .map(|doc| self.write_page(doc, &renderer, &layout, &sidebar, out_dir))
            .collect::<Result<Vec<_>, _>>()?;

        self.copy_stylesheets(out_dir)?;
        let public_dir = &config.content_resolved.public_dir;
        if public_dir.is_dir() {
            copy_dir_all(public_dir, out_dir)?;
        }

        Ok(BuildReport {
            pages: urls.len(),
            urls,
            warnings: sidebar.warnings,
        })
    }

    /// Refuse an output directory that is, or contains, the config, content
    /// or public directory.
    fn check_out_dir(&self, out_dir: &Path) -> Result<(), RenderError> {
        let out = out_dir
            .canonicalize()
            .map_err(|e| RenderError::io(out_dir, e))?;
        let content = &self.config.content_resolved;
        for source_dir in [&content.root_dir, &content.dir, &content.public_dir] {
            let Ok(source) = source_dir.canonicalize() else {
                continue;
            };
            if source.starts_with(&out) {
                return Err(RenderError::UnsafeOutDir {
                    out_dir: out_dir.to_path_buf(),
                    source_dir: source_dir.clone(),
                });
            }
        }
        Ok(())
    }

    fn write_page(
        &self,
        doc: &Document,
        renderer: &MarkdownRenderer,
        layout: &Layout,
        sidebar: &Sidebar,
        out_dir: &Path,
    ) -> Result<String, RenderError> {
        let body = if doc.is_golf_example() {
            let video = self
                .config
                .with_base(&format!("/generated/{}.mp4", doc.name()));
            insert_preview(&doc.body, &video)
        } else {
            doc.body.clone()
        };
        let result = renderer.render(&body);

        let url = self.config.page_url(&doc.slug);
        let title = doc
            .front_matter
            .title
            .clone()
            .or(result.title)
            .unwrap_or_else(|| doc.name().to_owned());
        let html = render_page(
            layout,
            &PageData {
                title,
                description: doc.front_matter.description.clone(),
                canonical: self.config.absolute_url(&doc.slug),
                url: url.clone(),
                html_content: result.html,
                toc: result.toc,
                sidebar,
            },
        );

        let page_dir = if doc.slug.is_empty() {
            out_dir.to_path_buf()
        } else {
            out_dir.join(&doc.slug)
        };
        fs::create_dir_all(&page_dir).map_err(|e| RenderError::io(&page_dir, e))?;
        let path = page_dir.join("index.html");
        fs::write(&path, html).map_err(|e| RenderError::io(&path, e))?;
        tracing::debug!(url = %url, path = %path.display(), "Wrote page");

        Ok(url)
    }

    fn copy_stylesheets(&self, out_dir: &Path) -> Result<(), RenderError> {
        let stylesheets = &self.config.theme().custom_css;
        if stylesheets.is_empty() {
            return Ok(());
        }
        let assets_dir = out_dir.join(ASSETS_DIR);
        fs::create_dir_all(&assets_dir).map_err(|e| RenderError::io(&assets_dir, e))?;
        for css in stylesheets {
            let source = self.config.resolve_asset(css);
            let target = assets_dir.join(stylesheet_name(css));
            fs::copy(&source, &target).map_err(|e| RenderError::io(&source, e))?;
        }
        Ok(())
    }
}

fn check_unique_slugs(pages: &[&Document]) -> Result<(), RenderError> {
    let mut seen = HashSet::new();
    for doc in pages {
        if !seen.insert(doc.slug.as_str()) {
            return Err(RenderError::Template(format!(
                "{} maps to `/{}`, which another page already uses",
                doc.source_path.display(),
                doc.slug
            )));
        }
    }
    Ok(())
}

fn copy_dir_all(src: &Path, dst: &Path) -> Result<(), RenderError> {
    fs::create_dir_all(dst).map_err(|e| RenderError::io(dst, e))?;
    for entry in fs::read_dir(src).map_err(|e| RenderError::io(src, e))? {
        let entry = entry.map_err(|e| RenderError::io(src, e))?;
        let path: PathBuf = entry.path();
        let target = dst.join(entry.file_name());
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            copy_dir_all(&path, &target)?;
        } else {
            fs::copy(&path, &target).map_err(|e| RenderError::io(&path, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const GOLF_TOML: &str = r#"
site = "https://nikitarevenco.github.io"
base = "/helix-golf"

[[markdown.rehypePlugins]]
name = "headingIds"

[[markdown.rehypePlugins]]
name = "externalLinks"
options = { content = { type = "text", value = " ↗" }, properties = { target = "_blank" }, rel = ["noopener"] }

[[markdown.rehypePlugins]]
name = "autolinkHeadings"
options = { behavior = "wrap" }

[[integrations]]
name = "starlight"

[integrations.options]
title = "Helix Golf"
customCss = ["./src/globals.css"]

[integrations.options.social]
github = "https://github.com/nikitarevenco/helix-golf"

[integrations.options.components]
ThemeSelect = "./src/ThemeSelect.html"

[[integrations.options.sidebar]]
label = "Helix Golf"
autogenerate = { directory = "helix-golf" }
"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site(toml: &str) -> (TempDir, Config) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "src/globals.css", "body { color: red; }");
        write(root, "src/ThemeSelect.html", "<select id=\"theme\"></select>");
        write(root, "public/generated/text-into-array.mp4", "video");
        write(
            root,
            "src/content/docs/index.md",
            "---\ntitle: Helix Golf\n---\nWelcome. See [Helix](https://helix-editor.com).\n",
        );
        write(
            root,
            "src/content/docs/helix-golf/text-into-array.md",
            "# Text into Array\n\n## Before\n\n```\na\n```\n\n## After\n\n```json\n[\"a\"]\n```\n\n\
             ## Command\n\n```\n%\n```\n\n1. `%` selects all\n",
        );
        write(
            root,
            "src/content/docs/helix-golf/wip.md",
            "---\ndraft: true\n---\n# WIP\n",
        );
        let config = Config::from_toml_str(toml, root).unwrap();
        (temp, config)
    }

    #[test]
    fn test_build_writes_pages_under_base() {
        let (temp, config) = site(GOLF_TOML);
        let out = temp.path().join("dist");

        let report = StaticSiteBuilder::new(&config).build(&out).unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(
            report.urls,
            vec!["/helix-golf/helix-golf/text-into-array/", "/helix-golf/"]
        );
        assert!(report.urls.iter().all(|url| url.starts_with("/helix-golf")));
        assert!(report.warnings.is_empty());
        assert!(out.join("index.html").is_file());
        assert!(out.join("helix-golf/text-into-array/index.html").is_file());
        assert!(!out.join("helix-golf/wip").exists());
    }

    #[test]
    fn test_build_page_contents() {
        let (temp, config) = site(GOLF_TOML);
        let out = temp.path().join("dist");
        StaticSiteBuilder::new(&config).build(&out).unwrap();

        let page = fs::read_to_string(out.join("helix-golf/text-into-array/index.html")).unwrap();
        assert!(page.contains("<title>Text into Array | Helix Golf</title>"));
        assert!(page.contains("<h2 id=\"command\"><a href=\"#command\">Command</a></h2>"));
        assert!(page.contains("<source src=\"/helix-golf/generated/text-into-array.mp4\""));
        assert!(page.find("id=\"preview\"") < page.find("id=\"command\""));
        assert!(page.contains("<select id=\"theme\"></select>"));
        assert!(page.contains(
            "<link rel=\"canonical\" href=\"https://nikitarevenco.github.io/helix-golf/helix-golf/text-into-array/\">"
        ));
        assert!(page.contains(
            "<a href=\"/helix-golf/helix-golf/text-into-array/\" aria-current=\"page\">Text into Array</a>"
        ));
        assert!(!page.contains("WIP"));

        let home = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(home.contains("<title>Helix Golf</title>"));
        assert!(home.contains(
            "<a href=\"https://helix-editor.com\" target=\"_blank\" rel=\"noopener\">Helix ↗</a>"
        ));
        assert!(!home.contains("## Preview"));
        assert!(!home.contains("<video"));
    }

    #[test]
    fn test_root_relative_links_point_at_emitted_pages() {
        let (temp, config) = site(GOLF_TOML);
        write(
            temp.path(),
            "src/content/docs/index.md",
            "# Home\n\nSee [the example](/helix-golf/text-into-array/).\n",
        );
        let out = temp.path().join("dist");

        let report = StaticSiteBuilder::new(&config).build(&out).unwrap();

        let home = fs::read_to_string(out.join("index.html")).unwrap();
        let href = "/helix-golf/helix-golf/text-into-array/";
        assert!(home.contains(&format!("<a href=\"{href}\">the example</a>")));
        assert!(report.urls.iter().any(|url| url == href));
    }

    #[test]
    fn test_build_copies_assets() {
        let (temp, config) = site(GOLF_TOML);
        let out = temp.path().join("dist");
        StaticSiteBuilder::new(&config).build(&out).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("_golf/globals.css")).unwrap(),
            "body { color: red; }"
        );
        assert!(out.join("generated/text-into-array.mp4").is_file());
        let home = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(home.contains("href=\"/helix-golf/_golf/globals.css\""));
    }

    #[test]
    fn test_build_without_base_has_no_prefix() {
        let toml = GOLF_TOML.replace("base = \"/helix-golf\"\n", "");
        let (temp, config) = site(&toml);
        let out = temp.path().join("dist");

        let report = StaticSiteBuilder::new(&config).build(&out).unwrap();

        assert_eq!(report.urls, vec!["/helix-golf/text-into-array/", "/"]);
        let page = fs::read_to_string(out.join("helix-golf/text-into-array/index.html")).unwrap();
        assert!(page.contains("<source src=\"/generated/text-into-array.mp4\""));
    }

    #[test]
    fn test_build_cleans_output_dir() {
        let (temp, config) = site(GOLF_TOML);
        let out = temp.path().join("dist");
        write(&out, "stale.html", "old");

        StaticSiteBuilder::new(&config).build(&out).unwrap();

        assert!(!out.join("stale.html").exists());
    }

    #[test]
    fn test_out_dir_containing_sources_is_refused() {
        let (temp, config) = site(GOLF_TOML);
        write(temp.path(), "golf.toml", GOLF_TOML);

        for out in [temp.path().to_path_buf(), temp.path().join("src")] {
            let err = StaticSiteBuilder::new(&config).build(&out).unwrap_err();
            assert!(matches!(err, RenderError::UnsafeOutDir { .. }), "{err:?}");
        }

        assert!(temp.path().join("golf.toml").is_file());
        assert!(temp.path().join("src/content/docs/index.md").is_file());
        assert!(temp.path().join("public/generated/text-into-array.mp4").is_file());
    }

    #[test]
    fn test_out_dir_inside_project_is_allowed() {
        let (temp, config) = site(GOLF_TOML);
        let out = temp.path().join("dist");
        fs::create_dir_all(&out).unwrap();

        assert!(StaticSiteBuilder::new(&config).build(&out).is_ok());
        assert!(temp.path().join("src/content/docs/index.md").is_file());
    }

    #[test]
    fn test_missing_override_is_error() {
        let toml = GOLF_TOML.replace("ThemeSelect.html", "Missing.html");
        let (temp, config) = site(&toml);

        let err = StaticSiteBuilder::new(&config)
            .build(&temp.path().join("dist"))
            .unwrap_err();

        assert!(matches!(
            err,
            RenderError::MissingOverride {
                slot: golf_config::Slot::ThemeSelect,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_sidebar_directory_is_warning() {
        let toml = GOLF_TOML.replace("directory = \"helix-golf\"", "directory = \"nope\"");
        let (temp, config) = site(&toml);

        let report = StaticSiteBuilder::new(&config)
            .build(&temp.path().join("dist"))
            .unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_duplicate_slug_is_error() {
        let (temp, config) = site(GOLF_TOML);
        write(
            temp.path(),
            "src/content/docs/helix-golf/text-into-array/index.md",
            "# Dup",
        );

        let err = StaticSiteBuilder::new(&config)
            .build(&temp.path().join("dist"))
            .unwrap_err();

        assert!(matches!(err, RenderError::Template(_)));
    }
}
