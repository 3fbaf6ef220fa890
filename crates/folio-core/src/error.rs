//! Error types for folio-core.

use std::path::PathBuf;

/// Errors surfaced by the theme engine and its configuration layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid theme JSON: {0}")]
    ThemeImport(#[from] serde_json::Error),

    #[error("theme validation failed:\n  - {}", .0.join("\n  - "))]
    ThemeValidation(Vec<String>),

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation failed:\n  - {}", .0.join("\n  - "))]
    ConfigValidation(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background renderer error: {0}")]
    Renderer(String),
}

pub type Result<T> = std::result::Result<T, Error>;
