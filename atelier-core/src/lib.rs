//! Atelier core library — domain types, configuration, errors.
//!
//! - [`types`] — availability status, content-type and entry shapes
//! - [`config`] — [`AtelierConfig`] loading (YAML file + environment)
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{AtelierConfig, DeliveryMode};
pub use error::ConfigError;
pub use types::{
    Artwork, AvailabilityStatus, ContentTypeDetails, ContentTypeId, ContentTypeSummary,
    DetailedContentType, Entry, EntrySys, FieldSchema, UnknownStatus,
};
