//! Declarative content model, embedded at compile time.
//!
//! The YAML lives next to this file (`content_model.yaml`) and is the single
//! source for `atelier provision` and `atelier model`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use atelier_core::{ContentTypeId, FieldSchema};

use crate::error::ContentError;

const EMBEDDED_MODEL: &str = include_str!("content_model.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModel {
    pub content_types: Vec<ContentTypeDefinition>,
}

/// A content type as it should exist in the space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDefinition {
    pub id: ContentTypeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_field: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl ContentTypeDefinition {
    /// Request body for the management API's content type upsert.
    pub fn body(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "displayField": self.display_field,
            "fields": self.fields,
        })
    }
}

impl ContentModel {
    /// The model shipped with the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::parse(EMBEDDED_MODEL)
    }

    pub fn parse(yaml: &str) -> Result<Self, ContentError> {
        let model: ContentModel = serde_yaml::from_str(yaml)?;
        model.validate()?;
        Ok(model)
    }

    pub fn get(&self, id: &str) -> Option<&ContentTypeDefinition> {
        self.content_types.iter().find(|ct| ct.id.0 == id)
    }

    fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for ct in &self.content_types {
            if !seen.insert(&ct.id) {
                return Err(ContentError::InvalidModel(format!(
                    "duplicate content type '{}'",
                    ct.id
                )));
            }
            let mut field_ids = HashSet::new();
            for field in &ct.fields {
                if !field_ids.insert(field.id.as_str()) {
                    return Err(ContentError::InvalidModel(format!(
                        "duplicate field '{}' in '{}'",
                        field.id, ct.id
                    )));
                }
            }
            if let Some(display) = &ct.display_field {
                if !field_ids.contains(display.as_str()) {
                    return Err(ContentError::InvalidModel(format!(
                        "display field '{display}' is not a field of '{}'",
                        ct.id
                    )));
                }
            }
        }
        Ok(())
    }
}
