//! Error types for atelier-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while building an [`crate::AtelierConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A required setting was found neither in the file nor in the environment.
    #[error("{key} is not set")]
    Missing { key: &'static str },

    /// `ATELIER_BIND` / `bind` did not parse as a socket address.
    #[error("invalid bind address '{value}'")]
    InvalidBind { value: String },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.atelier/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
