//! Site configuration for the Helix Golf documentation site.
//!
//! Parses `golf.toml` with serde and provides auto-discovery of the config
//! file in parent directories. Every table rejects unknown keys, so a typo
//! anywhere in the file is a load error rather than a silently ignored option.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `site` and `base` support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;
mod markdown;
mod theme;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use markdown::{
    AutolinkBehavior, AutolinkHeadingsOptions, ExternalLinksOptions, LinkContent,
    LinkContentKind, TransformStep,
};
pub use theme::{
    HeadTag, SidebarGroup, SidebarLink, SidebarSource, Slot, THEME_INTEGRATION, ThemeOptions,
    stylesheet_name,
};

use markdown::MarkdownConfig;
use theme::IntegrationDecl;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site origin URL.
    pub site: Option<String>,
    /// Override base path.
    pub base: Option<String>,
    /// Override content source directory.
    pub content_dir: Option<PathBuf>,
    /// Override build output directory.
    pub out_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "golf.toml";

/// Site configuration record.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site origin (e.g. `https://example.github.io`).
    pub site: Option<String>,
    /// URL path prefix for every page, normalized to `/prefix` or `None`.
    pub base: Option<String>,
    /// Markdown pipeline declarations.
    markdown: MarkdownConfig,
    /// Integration declarations.
    integrations: Vec<IntegrationDecl>,
    /// Content paths (relative strings from TOML).
    content: ContentConfigRaw,
    /// Build paths (relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Resolved markdown pipeline (set after loading).
    #[serde(skip)]
    pipeline: Vec<TransformStep>,
    /// Resolved theme (set after loading).
    #[serde(skip)]
    theme: ThemeOptions,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ContentConfigRaw {
    dir: Option<String>,
    public_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct ContentConfig {
    /// Directory holding the markdown documents.
    pub dir: PathBuf,
    /// Directory whose files are copied verbatim into the output.
    pub public_dir: PathBuf,
    /// Directory containing `golf.toml`; theme asset paths resolve against it.
    pub root_dir: PathBuf,
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct BuildConfigRaw {
    out_dir: Option<String>,
}

/// Resolved build configuration.
#[derive(Debug, Default, Clone)]
pub struct BuildConfig {
    /// Output directory for the static site.
    pub out_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error, including unknown keys.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`base`").
        field: String,
        /// Error message (e.g., "${`GOLF_BASE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Normalize a base path to `/segment/...` without a trailing slash.
///
/// Empty and `/` mean "no prefix".
fn normalize_base(base: &str) -> Option<String> {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}

/// Prefix a root-relative `path` with `base` (already normalized).
///
/// Root-relative paths name content paths, so they are always prefixed, even
/// when they happen to start with the base segment. Relative paths and
/// protocol-relative URLs are returned unchanged.
#[must_use]
pub fn prefix_base(base: Option<&str>, path: &str) -> String {
    match base {
        Some(base) if path.starts_with('/') && !path.starts_with("//") => {
            format!("{base}{path}")
        }
        _ => path.to_owned(),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `golf.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve(base_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(site) = &settings.site {
            self.site = Some(site.clone());
        }
        if let Some(base) = &settings.base {
            self.base = normalize_base(base);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.content_resolved.dir.clone_from(content_dir);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.build_resolved.out_dir.clone_from(out_dir);
        }
    }

    /// Ordered markdown transformation steps.
    #[must_use]
    pub fn pipeline(&self) -> &[TransformStep] {
        &self.pipeline
    }

    /// Validated theme options.
    #[must_use]
    pub fn theme(&self) -> &ThemeOptions {
        &self.theme
    }

    /// URL at which the page with `slug` is emitted.
    ///
    /// `slug` is the content path without extension (`""` for the home page).
    /// URLs use the directory format with a trailing slash.
    ///
    /// ```
    /// use golf_config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.page_url("helix-golf/intro"), "/helix-golf/intro/");
    /// assert_eq!(config.page_url(""), "/");
    /// ```
    #[must_use]
    pub fn page_url(&self, slug: &str) -> String {
        let slug = slug.trim_matches('/');
        let prefix = self.base.as_deref().unwrap_or("");
        if slug.is_empty() {
            format!("{prefix}/")
        } else {
            format!("{prefix}/{slug}/")
        }
    }

    /// Prefix a root-relative path with the base path.
    ///
    /// Paths that are not root-relative, or already carry the prefix, are
    /// returned unchanged.
    #[must_use]
    pub fn with_base(&self, path: &str) -> String {
        prefix_base(self.base.as_deref(), path)
    }

    /// Absolute URL of a page, when `site` is configured.
    #[must_use]
    pub fn absolute_url(&self, slug: &str) -> Option<String> {
        self.site
            .as_deref()
            .map(|site| format!("{}{}", site.trim_end_matches('/'), self.page_url(slug)))
    }

    /// Resolve a path from the theme options (e.g. `./src/globals.css`)
    /// against the directory containing `golf.toml`.
    #[must_use]
    pub fn resolve_asset(&self, path: &str) -> PathBuf {
        self.content_resolved.root_dir.join(path)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: None,
            base: None,
            markdown: MarkdownConfig::default(),
            integrations: Vec::new(),
            content: ContentConfigRaw::default(),
            build: BuildConfigRaw::default(),
            content_resolved: ContentConfig {
                dir: base.join("src/content/docs"),
                public_dir: base.join("public"),
                root_dir: base.to_path_buf(),
            },
            build_resolved: BuildConfig {
                out_dir: base.join("dist"),
            },
            pipeline: Vec::new(),
            theme: ThemeOptions::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] and [`Config::from_toml_str`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(site) = &self.site {
            require_http_url(site, "site")?;
        }
        if let Some(base) = &self.base
            && base.contains(['?', '#', ' '])
        {
            return Err(ConfigError::Validation(format!(
                "base `{base}` must be a plain URL path"
            )));
        }
        self.theme.validate()?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref site) = self.site {
            self.site = Some(expand::expand_env(site, "site")?);
        }
        if let Some(ref base) = self.base {
            self.base = Some(expand::expand_env(base, "base")?);
        }
        Ok(())
    }

    /// Resolve relative paths and typed declarations.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            dir: resolve(self.content.dir.as_deref(), "src/content/docs"),
            public_dir: resolve(self.content.public_dir.as_deref(), "public"),
            root_dir: config_dir.to_path_buf(),
        };
        self.build_resolved = BuildConfig {
            out_dir: resolve(self.build.out_dir.as_deref(), "dist"),
        };

        self.base = self.base.as_deref().and_then(normalize_base);
        self.pipeline = markdown::resolve_pipeline(&self.markdown.rehype_plugins)?;
        self.theme = theme::resolve_theme(&self.integrations)?;

        Ok(())
    }
}
