//! HTTP surface for Atelier content.
//!
//! - `GET /content-types` — every content type with its field schema
//! - `GET /content-types/:id/entries?limit=N` — entries of one type
//! - `GET /health`

pub mod error;
pub mod routes;
pub mod runtime;

pub use error::ServerError;
pub use routes::{create_router, AppState};
pub use runtime::{init_tracing, run, start_blocking};
