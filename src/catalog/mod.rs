//! Model catalog retrieval and annotation
//!
//! Composes the disk cache and the API client into the cached-fetch policy,
//! and post-processes the raw entry list with capability flags.

mod model;
mod service;

pub use model::{annotate, supports_vision, ModelEntry};
pub use service::{model_count, CatalogError, CatalogService, DEFAULT_CACHE_TIMEOUT};
