//! Blocking client for the content management API.
//!
//! Used by `atelier provision` (content type upsert + activation) and by the
//! availability command (entry read, field write, publish). Every write
//! carries the resource's current version in `X-Contentful-Version`; the
//! service rejects stale versions with 409.

use serde::Deserialize;
use serde_json::{Map, Value};

use atelier_core::config::MANAGEMENT_HOST;
use atelier_core::types::Link;
use atelier_core::{AtelierConfig, ContentTypeId};

use crate::error::{from_ureq, ContentError};
use crate::model::ContentTypeDefinition;

const MANAGEMENT_MEDIA_TYPE: &str = "application/vnd.contentful.management.v1+json";
const VERSION_HEADER: &str = "X-Contentful-Version";

/// Locale used for entry field values when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionedSys {
    id: String,
    version: u64,
    #[serde(default)]
    content_type: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Versioned {
    sys: VersionedSys,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// An entry as the management API sees it: per-locale field values plus the
/// version needed for the next write.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedEntry {
    pub id: String,
    pub version: u64,
    pub content_type: Option<ContentTypeId>,
    pub fields: Map<String, Value>,
}

impl ManagedEntry {
    fn from_wire(raw: Versioned) -> Self {
        Self {
            id: raw.sys.id,
            version: raw.sys.version,
            content_type: raw.sys.content_type.map(|link| ContentTypeId(link.sys.id)),
            fields: raw.fields,
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Value of `field` in `locale`, if set.
    pub fn localized(&self, field: &str, locale: &str) -> Option<&Value> {
        self.fields.get(field)?.get(locale)
    }

    /// Set (or clear, with `None`) the value of `field` in `locale`.
    pub fn set_localized(&mut self, field: &str, locale: &str, value: Option<Value>) {
        let slot = self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(locales) = slot {
            match value {
                Some(value) => {
                    locales.insert(locale.to_string(), value);
                }
                None => {
                    locales.remove(locale);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Schema store
// ---------------------------------------------------------------------------

/// The writes provisioning needs. Implemented by [`ManagementClient`] and by
/// in-memory stores in tests.
pub trait SchemaStore {
    /// Create or replace a content type; returns the version to activate.
    fn upsert_content_type(&self, definition: &ContentTypeDefinition) -> Result<u64, ContentError>;

    fn activate_content_type(&self, id: &ContentTypeId, version: u64) -> Result<(), ContentError>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct ManagementClient {
    agent: ureq::Agent,
    base_url: String,
    space_id: String,
    environment: String,
    token: String,
}

impl ManagementClient {
    pub fn new(
        base_url: impl Into<String>,
        space_id: impl Into<String>,
        environment: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            agent: ureq::Agent::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            space_id: space_id.into(),
            environment: environment.into(),
            token: token.into(),
        }
    }

    /// Fails with `ConfigError::Missing` when no management token is configured.
    pub fn from_config(config: &AtelierConfig) -> Result<Self, ContentError> {
        let token = config.management_token()?;
        Ok(Self::new(
            format!("https://{MANAGEMENT_HOST}"),
            &config.space_id,
            &config.environment,
            token,
        ))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/spaces/{}/environments/{}/{}",
            self.base_url, self.space_id, self.environment, path
        )
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Content-Type", MANAGEMENT_MEDIA_TYPE)
    }

    fn get(&self, path: &str) -> Result<Versioned, ContentError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "management GET");
        let response = self
            .request("GET", &url)
            .call()
            .map_err(|err| from_ureq(&url, err))?;
        decode(&url, response)
    }

    fn put(&self, path: &str, version: Option<u64>, body: Option<&Value>) -> Result<Versioned, ContentError> {
        let url = self.url(path);
        tracing::debug!(url = %url, ?version, "management PUT");
        let mut request = self.request("PUT", &url);
        if let Some(version) = version {
            request = request.set(VERSION_HEADER, &version.to_string());
        }
        let result = match body {
            Some(body) => request.send_json(body.clone()),
            None => request.call(),
        };
        let response = result.map_err(|err| from_ureq(&url, err))?;
        decode(&url, response)
    }

    /// Current version of a content type, `None` when it does not exist yet.
    pub fn content_type_version(&self, id: &ContentTypeId) -> Result<Option<u64>, ContentError> {
        match self.get(&format!("content_types/{id}")) {
            Ok(existing) => Ok(Some(existing.sys.version)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn get_entry(&self, entry_id: &str) -> Result<ManagedEntry, ContentError> {
        self.get(&format!("entries/{entry_id}"))
            .map(ManagedEntry::from_wire)
    }

    /// Write the entry's fields back. Returns the entry as stored, with its
    /// new version.
    pub fn update_entry(&self, entry: &ManagedEntry) -> Result<ManagedEntry, ContentError> {
        let body = serde_json::json!({ "fields": entry.fields });
        self.put(&format!("entries/{}", entry.id), Some(entry.version), Some(&body))
            .map(ManagedEntry::from_wire)
    }

    pub fn publish_entry(&self, entry_id: &str, version: u64) -> Result<ManagedEntry, ContentError> {
        self.put(&format!("entries/{entry_id}/published"), Some(version), None)
            .map(ManagedEntry::from_wire)
    }
}

impl SchemaStore for ManagementClient {
    fn upsert_content_type(&self, definition: &ContentTypeDefinition) -> Result<u64, ContentError> {
        let current = self.content_type_version(&definition.id)?;
        let stored = self.put(
            &format!("content_types/{}", definition.id),
            current,
            Some(&definition.body()),
        )?;
        Ok(stored.sys.version)
    }

    fn activate_content_type(&self, id: &ContentTypeId, version: u64) -> Result<(), ContentError> {
        self.put(&format!("content_types/{id}/published"), Some(version), None)?;
        Ok(())
    }
}

fn decode(url: &str, response: ureq::Response) -> Result<Versioned, ContentError> {
    response.into_json::<Versioned>().map_err(|source| ContentError::Decode {
        url: url.to_string(),
        source,
    })
}
