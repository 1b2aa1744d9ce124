//! Blocking client for the content delivery (and preview) REST API.
//!
//! | call                 | request                                                    |
//! |----------------------|------------------------------------------------------------|
//! | list content types   | `GET {base}/spaces/{space}/environments/{env}/content_types` |
//! | content type detail  | `GET …/content_types/{id}`                                  |
//! | entries              | `GET …/entries?content_type={id}&limit={n}`                 |
//!
//! All requests carry `Authorization: Bearer <token>`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use atelier_core::{
    AtelierConfig, ContentTypeDetails, ContentTypeId, ContentTypeSummary, DeliveryMode, Entry,
    FieldSchema,
};

use crate::error::{from_ureq, ContentError};
use crate::service::{ContentService, EntryQuery};

#[derive(Debug, Deserialize)]
struct Collection<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SysId {
    id: String,
}

/// Content type as the delivery API returns it.
#[derive(Debug, Deserialize)]
struct RawContentType {
    sys: SysId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fields: Vec<FieldSchema>,
}

impl RawContentType {
    fn into_summary(self) -> ContentTypeSummary {
        ContentTypeSummary {
            id: ContentTypeId(self.sys.id),
            name: self.name,
            description: self.description,
        }
    }

    fn into_details(self) -> ContentTypeDetails {
        ContentTypeDetails {
            id: ContentTypeId(self.sys.id),
            name: self.name,
            description: self.description,
            fields: self.fields,
        }
    }
}

pub struct DeliveryClient {
    agent: ureq::Agent,
    base_url: String,
    space_id: String,
    environment: String,
    token: String,
}

impl DeliveryClient {
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

    /// Build a client for the published or preview host. Preview without a
    /// preview token fails here, before any request is made.
    pub fn from_config(config: &AtelierConfig, mode: DeliveryMode) -> Result<Self, ContentError> {
        let token = config.delivery_token(mode)?;
        Ok(Self::new(
            format!("https://{}", config.delivery_host(mode)),
            &config.space_id,
            &config.environment,
            token,
        ))
    }

    fn environment_url(&self) -> String {
        format!(
            "{}/spaces/{}/environments/{}",
            self.base_url, self.space_id, self.environment
        )
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ContentError> {
        let mut request = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token));
        for (key, value) in query {
            request = request.query(key, value);
        }
        tracing::debug!(url, "content service request");
        let response = request.call().map_err(|err| from_ureq(url, err))?;
        response.into_json::<T>().map_err(|source| ContentError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl ContentService for DeliveryClient {
    fn list_content_types(&self) -> Result<Vec<ContentTypeSummary>, ContentError> {
        let url = format!("{}/content_types", self.environment_url());
        let collection: Collection<RawContentType> = self.get_json(&url, &[])?;
        Ok(collection
            .items
            .into_iter()
            .map(RawContentType::into_summary)
            .collect())
    }

    fn get_content_type(
        &self,
        id: &ContentTypeId,
    ) -> Result<Option<ContentTypeDetails>, ContentError> {
        let url = format!("{}/content_types/{}", self.environment_url(), id);
        match self.get_json::<RawContentType>(&url, &[]) {
            Ok(raw) => Ok(Some(raw.into_details())),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn get_entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, ContentError> {
        let url = format!("{}/entries", self.environment_url());
        let limit = query.limit.to_string();
        let collection: Collection<Entry> = self.get_json(
            &url,
            &[("content_type", query.content_type.0.as_str()), ("limit", &limit)],
        )?;
        Ok(collection.items)
    }
}
