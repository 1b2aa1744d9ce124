//! Read façade over a [`ContentService`].
//!
//! Service errors stop here: list calls degrade to an empty list and single
//! lookups to `None`, with one `error` log line per failure. Callers cannot
//! tell "nothing there" from "fetch failed" through the return value.

use std::sync::Arc;

use atelier_core::{ContentTypeDetails, ContentTypeId, ContentTypeSummary, DetailedContentType, Entry};

use crate::error::ContentError;
use crate::service::{ContentService, EntryQuery};

/// Entry limit used when the caller passes none.
pub const DEFAULT_ENTRY_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct ContentFacade {
    service: Arc<dyn ContentService>,
}

impl ContentFacade {
    pub fn new(service: Arc<dyn ContentService>) -> Self {
        Self { service }
    }

    /// Every content type's id, name and description; `[]` on failure.
    pub async fn all_content_types(&self) -> Vec<ContentTypeSummary> {
        let service = self.service.clone();
        match tokio::task::spawn_blocking(move || list_or_empty(service.as_ref())).await {
            Ok(types) => types,
            Err(err) => {
                tracing::error!(error = %err, "content type listing task failed");
                Vec::new()
            }
        }
    }

    /// Full field schema of one content type; `None` when missing or on failure.
    pub async fn content_type_details(&self, id: &ContentTypeId) -> Option<ContentTypeDetails> {
        let service = self.service.clone();
        let id = id.clone();
        match tokio::task::spawn_blocking(move || details_or_none(service.as_ref(), &id)).await {
            Ok(details) => details,
            Err(err) => {
                tracing::error!(error = %err, "content type detail task failed");
                None
            }
        }
    }

    /// Up to `limit` (default [`DEFAULT_ENTRY_LIMIT`]) entries of one type; `[]` on failure.
    pub async fn entries_by_type(&self, id: &ContentTypeId, limit: Option<u32>) -> Vec<Entry> {
        let service = self.service.clone();
        let query = EntryQuery {
            content_type: id.clone(),
            limit: limit.unwrap_or(DEFAULT_ENTRY_LIMIT),
        };
        let task = tokio::task::spawn_blocking(move || match service.get_entries(&query) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    content_type = %query.content_type,
                    "failed to fetch entries"
                );
                Vec::new()
            }
        });
        match task.await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(error = %err, "entry listing task failed");
                Vec::new()
            }
        }
    }

    /// All content types enriched with their field schemas.
    ///
    /// Detail lookups run concurrently, one blocking task per type, and are
    /// joined in listing order. A failed lookup leaves that type
    /// with no fields. Only a task that cannot be joined is an error, and it
    /// is reported after every task has finished.
    pub async fn detailed_content_types(&self) -> Result<Vec<DetailedContentType>, ContentError> {
        let summaries = self.all_content_types().await;

        let tasks: Vec<_> = summaries
            .iter()
            .map(|summary| {
                let service = self.service.clone();
                let id = summary.id.clone();
                tokio::task::spawn_blocking(move || details_or_none(service.as_ref(), &id))
            })
            .collect();

        let mut joined = Vec::with_capacity(tasks.len());
        for task in tasks {
            joined.push(task.await);
        }

        let mut detailed = Vec::with_capacity(summaries.len());
        for (summary, details) in summaries.into_iter().zip(joined) {
            let details = details.map_err(|err| ContentError::Join {
                task: "content type detail",
                message: err.to_string(),
            })?;
            detailed.push(DetailedContentType::enrich(summary, details));
        }
        Ok(detailed)
    }
}

fn list_or_empty(service: &dyn ContentService) -> Vec<ContentTypeSummary> {
    match service.list_content_types() {
        Ok(types) => types,
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch content types");
            Vec::new()
        }
    }
}

fn details_or_none(service: &dyn ContentService, id: &ContentTypeId) -> Option<ContentTypeDetails> {
    match service.get_content_type(id) {
        Ok(details) => details,
        Err(err) => {
            tracing::error!(error = %err, content_type = %id, "failed to fetch content type");
            None
        }
    }
}
