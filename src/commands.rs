//! Implementations of the CLI subcommands
//!
//! Each command wires the catalog service to stdout/stderr. Formatting
//! helpers are split out so the output shapes can be unit tested.

use std::time::Duration;

use chrono::{Local, TimeZone};
use thiserror::Error;

use crate::api::{build_headers, AuthError};
use crate::cache::{CacheError, CacheStore};
use crate::catalog::{model_count, CatalogError, CatalogService, ModelEntry};

/// Errors a subcommand can surface to the user
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Failed to serialize model list: {0}")]
    Json(#[from] serde_json::Error),
}

/// `refresh`: force a network fetch and overwrite the cache
pub async fn run_refresh(service: &CatalogService) -> Result<(), CommandError> {
    let headers = build_headers()?;
    let count = service.refresh(&headers).await?;
    eprintln!(
        "Refreshed {} DigitalOcean models cache at {}",
        count,
        service.store().path().display()
    );
    Ok(())
}

/// `models`: print the cached-or-fetched annotated catalog
pub async fn run_models(service: &CatalogService, json_output: bool) -> Result<(), CommandError> {
    let headers = build_headers()?;
    let models = service.models(&headers).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        for model in &models {
            println!("{}\n", format_model_block(model));
        }
    }
    Ok(())
}

/// `cache-info`: report cache path, age, and a best-effort model count
///
/// A corrupt cache file is reported, not fatal; this is the one consumer
/// that downgrades a parse error to a notice.
pub fn run_cache_info(store: &CacheStore) -> Result<(), CommandError> {
    let Some(meta) = store.metadata() else {
        println!("No cache file found");
        return Ok(());
    };

    println!("Cache file: {}", store.path().display());
    println!("Cache age: {}", format_cache_age(meta.age));

    match store.read() {
        Ok(document) => println!("Cached models: {}", model_count(&document)),
        Err(CacheError::Parse { .. }) => println!("Cache file is corrupted"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// One human-readable block per model for the `models` listing
fn format_model_block(model: &ModelEntry) -> String {
    let mut bits = Vec::new();
    bits.push(format!("- id: {}", model.id));
    bits.push(format!("  name: {}", model.display_name()));

    if let Some(created) = model.created.and_then(format_created) {
        bits.push(format!("  created: {}", created));
    }
    if let Some(owned_by) = &model.owned_by {
        bits.push(format!("  owned_by: {}", owned_by));
    }

    bits.push(format!("  supports_schema: {}", model.supports_schema));
    bits.push(format!("  supports_vision: {}", model.supports_vision));
    bits.join("\n")
}

/// Formats a unix timestamp as local `YYYY-MM-DD HH:MM:SS`
///
/// Returns `None` for timestamps outside chrono's representable range.
fn format_created(timestamp: i64) -> Option<String> {
    let created = Local.timestamp_opt(timestamp, 0).single()?;
    Some(created.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Cache age as seconds plus fractional hours
fn format_cache_age(age: Duration) -> String {
    let seconds = age.as_secs_f64();
    format!("{:.0} seconds ({:.1} hours)", seconds, seconds / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> ModelEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_format_model_block_full_entry() {
        let model = entry(json!({
            "id": "llama-vision",
            "object": "model",
            "created": 1700000000,
            "owned_by": "digitalocean",
            "supports_vision": true
        }));

        let block = format_model_block(&model);

        assert!(block.starts_with("- id: llama-vision"));
        assert!(block.contains("  name: model"));
        assert!(block.contains("  created: "));
        assert!(block.contains("  owned_by: digitalocean"));
        assert!(block.contains("  supports_schema: false"));
        assert!(block.contains("  supports_vision: true"));
    }

    #[test]
    fn test_format_model_block_minimal_entry() {
        let model = entry(json!({"id": "m1"}));

        let block = format_model_block(&model);

        assert!(block.contains("- id: m1"));
        assert!(block.contains("  name: m1"), "Name should fall back to id");
        assert!(!block.contains("created:"));
        assert!(!block.contains("owned_by:"));
    }

    #[test]
    fn test_format_created_shape() {
        let formatted = format_created(1700000000).expect("Valid timestamp");
        // Local-timezone dependent, so assert the shape only
        assert_eq!(formatted.len(), 19);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
        assert_eq!(&formatted[13..14], ":");
    }

    #[test]
    fn test_format_cache_age() {
        assert_eq!(format_cache_age(Duration::from_secs(0)), "0 seconds (0.0 hours)");
        assert_eq!(
            format_cache_age(Duration::from_secs(5400)),
            "5400 seconds (1.5 hours)"
        );
    }

    #[test]
    fn test_cache_info_missing_file_is_not_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = CacheStore::at(temp_dir.path().join("models.json"));

        run_cache_info(&store).expect("Missing cache should print a notice");
    }

    #[test]
    fn test_cache_info_corrupt_file_is_not_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = CacheStore::at(temp_dir.path().join("models.json"));
        std::fs::write(store.path(), "{not json").unwrap();

        run_cache_info(&store).expect("Corrupt cache should print a notice");
    }
}
