//! CLI error types.

use golf_config::ConfigError;
use golf_examples::ExampleError;
use golf_site::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Example(#[from] ExampleError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
