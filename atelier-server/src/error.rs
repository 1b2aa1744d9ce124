use std::net::SocketAddr;

use thiserror::Error;

/// Error surface for the HTTP server lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error in {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("content error: {0}")]
    Content(#[from] atelier_content::ContentError),

    #[error("shutdown signal handler failed: {0}")]
    Signal(String),
}

pub(crate) fn io_err(context: &'static str, source: std::io::Error) -> ServerError {
    ServerError::Io { context, source }
}
