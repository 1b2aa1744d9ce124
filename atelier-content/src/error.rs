//! Error types for atelier-content.

use thiserror::Error;

use atelier_core::ConfigError;

/// All errors that can arise from talking to the content service.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset, …).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The embedded content model failed to parse.
    #[error("content model error: {0}")]
    Model(#[from] serde_yaml::Error),

    /// The content model parsed but is inconsistent.
    #[error("invalid content model: {0}")]
    InvalidModel(String),

    /// A fan-out task panicked or was cancelled.
    #[error("{task} task join failure: {message}")]
    Join { task: &'static str, message: String },
}

impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::Status { status: 404, .. })
    }
}

/// Map a ureq outcome into [`ContentError`], reading the error body when present.
pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> ContentError {
    match err {
        ureq::Error::Status(status, response) => ContentError::Status {
            url: url.to_string(),
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => ContentError::Transport {
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}
