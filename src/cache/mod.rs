//! Cache module for the on-disk model catalog
//!
//! This module persists the provider's raw catalog response to a single JSON
//! file and derives freshness from the file's modification time. Expired
//! content is still readable, allowing the application to fall back to stale
//! data when the API is unavailable.

mod store;

pub use store::{CacheError, CacheMetadata, CacheStore, CATALOG_FILE_NAME};
