//! The read contract the façade needs from a content service.

use atelier_core::{ContentTypeDetails, ContentTypeId, ContentTypeSummary, Entry};

use crate::error::ContentError;

/// Entry listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub content_type: ContentTypeId,
    pub limit: u32,
}

/// Blocking read access to content types and entries.
///
/// Implementations are called from the blocking thread pool; they must not
/// assume an async context.
pub trait ContentService: Send + Sync + 'static {
    fn list_content_types(&self) -> Result<Vec<ContentTypeSummary>, ContentError>;

    /// `Ok(None)` when the service has no content type with this id.
    fn get_content_type(
        &self,
        id: &ContentTypeId,
    ) -> Result<Option<ContentTypeDetails>, ContentError>;

    fn get_entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, ContentError>;
}
