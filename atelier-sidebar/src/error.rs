//! Error types for atelier-sidebar.

use thiserror::Error;

/// Failure reported by the host environment for a field write or publish.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// All errors that can arise from an availability update.
///
/// The rendered message is what the sidebar shows. Write and publish
/// failures both display the host's message unchanged, so the widget text
/// does not tell a half-applied update (field saved, record unpublished) from
/// a rejected one; match on the variant to distinguish them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    /// The entry has no `availability` field. Terminal for the mounted widget.
    #[error("Availability field not found")]
    FieldAbsent,

    /// The host rejected the field write; nothing was published.
    #[error("{source}")]
    WriteFailed {
        #[source]
        source: HostError,
    },

    /// The field holds the new value but the record was not republished.
    #[error("{source}")]
    PublishFailed {
        #[source]
        source: HostError,
    },
}
