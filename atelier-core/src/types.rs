//! Domain types shared by the sidebar widget, the content façade and the
//! HTTP surface.
//!
//! JSON shapes follow the content service's wire format (camelCase keys);
//! field validations are kept as opaque JSON because the service owns them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Sale status of an artwork. The wire labels are the exact strings stored
/// in the `availability` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    Available,
    Sold,
    #[serde(rename = "Not for Sale")]
    NotForSale,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 3] = [
        AvailabilityStatus::Available,
        AvailabilityStatus::Sold,
        AvailabilityStatus::NotForSale,
    ];

    /// The label stored in the remote field.
    pub fn label(self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Sold => "Sold",
            AvailabilityStatus::NotForSale => "Not for Sale",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A label outside the closed availability set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown availability status '{0}'; expected: Available, Sold, Not for Sale")]
pub struct UnknownStatus(pub String);

impl FromStr for AvailabilityStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AvailabilityStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

/// Identifier of a content type (`artwork`, `artistProfile`, …).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTypeId(pub String);

impl fmt::Display for ContentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ContentTypeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ContentTypeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// One field of a content type schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub validations: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Element schema for `Array` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
}

/// Content type as returned by the list call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSummary {
    pub id: ContentTypeId,
    pub name: String,
    pub description: Option<String>,
}

/// Content type with its full field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeDetails {
    pub id: ContentTypeId,
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
}

/// Summary enriched with field metadata; `fields` is empty when the detail
/// lookup produced nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedContentType {
    pub id: ContentTypeId,
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl DetailedContentType {
    pub fn enrich(summary: ContentTypeSummary, details: Option<ContentTypeDetails>) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            fields: details.map(|d| d.fields).unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// `{ "sys": { "id": … } }` reference as embedded in entry metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

/// System metadata of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One content record. Field values stay untyped; see [`Artwork`] for the
/// typed view of artwork entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub sys: EntrySys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Entry {
    pub fn content_type_id(&self) -> Option<&str> {
        self.sys.content_type.as_ref().map(|link| link.sys.id.as_str())
    }
}

/// Typed view of an `artwork` entry's fields. Asset links (`images`) are
/// left in [`Entry::fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub availability: AvailabilityStatus,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub medium: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub priority: Option<u32>,
}

impl Artwork {
    pub fn from_entry(entry: &Entry) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(entry.fields.clone()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
