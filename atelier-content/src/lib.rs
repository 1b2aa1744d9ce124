//! Content service access for Atelier.
//!
//! - [`facade`] — error-swallowing read façade used by the HTTP surface
//! - [`delivery`] — delivery/preview API client
//! - [`management`] — management API client (schema + entry writes)
//! - [`model`] / [`provision`] — the embedded content model and how it is pushed

pub mod delivery;
pub mod error;
pub mod facade;
pub mod management;
pub mod model;
pub mod provision;
pub mod service;

pub use delivery::DeliveryClient;
pub use error::ContentError;
pub use facade::{ContentFacade, DEFAULT_ENTRY_LIMIT};
pub use management::{ManagedEntry, ManagementClient, SchemaStore, DEFAULT_LOCALE};
pub use model::{ContentModel, ContentTypeDefinition};
pub use provision::{plan, provision, ProvisionOutcome, ProvisionResult};
pub use service::{ContentService, EntryQuery};
