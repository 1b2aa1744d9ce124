//! Push the embedded content model into a space.
//!
//! Each content type is upserted and then activated, in model order. The run
//! stops at the first failure; types already pushed stay pushed.

use atelier_core::ContentTypeId;

use crate::error::ContentError;
use crate::management::SchemaStore;
use crate::model::ContentModel;

/// What happened to one content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Upserted and activated at this version.
    Activated { version: u64 },
    /// Dry run: nothing sent.
    Planned { fields: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionResult {
    pub id: ContentTypeId,
    pub outcome: ProvisionOutcome,
}

/// What a run would do, without calling any store.
pub fn plan(model: &ContentModel) -> Vec<ProvisionResult> {
    model
        .content_types
        .iter()
        .map(|definition| ProvisionResult {
            id: definition.id.clone(),
            outcome: ProvisionOutcome::Planned {
                fields: definition.fields.len(),
            },
        })
        .collect()
}

/// Upsert and activate every content type of `model` in `store`.
pub fn provision(
    store: &dyn SchemaStore,
    model: &ContentModel,
) -> Result<Vec<ProvisionResult>, ContentError> {
    let mut results = Vec::with_capacity(model.content_types.len());

    for definition in &model.content_types {
        let version = store.upsert_content_type(definition).map_err(|err| {
            tracing::error!(content_type = %definition.id, error = %err, "upsert failed");
            err
        })?;
        store
            .activate_content_type(&definition.id, version)
            .map_err(|err| {
                tracing::error!(content_type = %definition.id, error = %err, "activation failed");
                err
            })?;
        tracing::info!(content_type = %definition.id, version, "content type provisioned");

        results.push(ProvisionResult {
            id: definition.id.clone(),
            outcome: ProvisionOutcome::Activated { version },
        });
    }

    Ok(results)
}
