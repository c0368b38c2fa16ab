//! API key resolution and request header construction
//!
//! The key itself is managed elsewhere (environment variable or the host
//! framework's keys file); this module only consumes the resolved value and
//! turns it into the header set every authenticated request carries.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use directories::ProjectDirs;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;

/// Environment variable consulted first for the API key
pub const KEY_ENV_VAR: &str = "DIGITAL_OCEAN";

/// Key name looked up in the keys file
pub const KEY_NAME: &str = "digitalocean";

/// File name of the host framework's keys file inside the data directory
const KEYS_FILE_NAME: &str = "keys.json";

/// Errors that can occur while resolving the key or building headers
#[derive(Debug, Error)]
pub enum AuthError {
    /// No key was found in the environment or the keys file
    #[error(
        "No key found for DigitalOcean. Set the DIGITAL_OCEAN environment variable \
         or store one under \"digitalocean\" in the keys file"
    )]
    MissingKey,

    /// The resolved key cannot be carried in an HTTP header
    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidKey(#[from] reqwest::header::InvalidHeaderValue),
}

/// Resolves the DigitalOcean API key, or `None` if no key is configured
///
/// Resolution order: the `DIGITAL_OCEAN` environment variable, then the
/// `"digitalocean"` entry of `keys.json` in the user-scoped data directory.
/// The keys file is read-only from this crate's point of view.
pub fn resolve_api_key() -> Option<String> {
    let keys_path = ProjectDirs::from("", "", "dollm")
        .map(|dirs| dirs.data_dir().join(KEYS_FILE_NAME));
    api_key_from(env::var(KEY_ENV_VAR).ok(), keys_path.as_deref())
}

/// Key resolution over explicit inputs, separated out for testability
fn api_key_from(env_value: Option<String>, keys_file: Option<&Path>) -> Option<String> {
    if let Some(key) = env_value {
        if !key.is_empty() {
            return Some(key);
        }
    }

    let path = keys_file?;
    let content = fs::read_to_string(path).ok()?;
    let keys: HashMap<String, String> = serde_json::from_str(&content).ok()?;
    keys.get(KEY_NAME).filter(|k| !k.is_empty()).cloned()
}

/// Builds the headers for an authenticated API request
///
/// Always includes the bearer token, a JSON content type, and two static
/// headers identifying this client to the provider.
///
/// # Returns
/// * `Ok(HeaderMap)` - Headers ready to attach to a request
/// * `Err(AuthError::MissingKey)` - If no key is configured
pub fn build_headers() -> Result<HeaderMap, AuthError> {
    let key = resolve_api_key().ok_or(AuthError::MissingKey)?;
    headers_for_key(&key)
}

/// Builds the request headers for an already-resolved key
pub fn headers_for_key(key: &str) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", key))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("HTTP-Referer", HeaderValue::from_static("https://github.com/dollm/dollm"));
    headers.insert("X-Title", HeaderValue::from_static("dollm"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_headers_for_key_contains_bearer_token() {
        let headers = headers_for_key("test-api-key").expect("Headers should build");

        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            "Bearer test-api-key"
        );
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.contains_key("HTTP-Referer"));
        assert!(headers.contains_key("X-Title"));
    }

    #[test]
    fn test_headers_for_key_rejects_control_characters() {
        let err = headers_for_key("bad\nkey").expect_err("Newline in key should fail");
        assert!(matches!(err, AuthError::InvalidKey(_)));
    }

    #[test]
    fn test_api_key_from_prefers_environment() {
        let temp_dir = TempDir::new().unwrap();
        let keys_path = temp_dir.path().join(KEYS_FILE_NAME);
        fs::write(&keys_path, r#"{"digitalocean": "file-key"}"#).unwrap();

        let key = api_key_from(Some("env-key".to_string()), Some(&keys_path));
        assert_eq!(key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_api_key_from_falls_back_to_keys_file() {
        let temp_dir = TempDir::new().unwrap();
        let keys_path = temp_dir.path().join(KEYS_FILE_NAME);
        fs::write(&keys_path, r#"{"digitalocean": "file-key"}"#).unwrap();

        let key = api_key_from(None, Some(&keys_path));
        assert_eq!(key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_api_key_from_empty_env_value_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let keys_path = temp_dir.path().join(KEYS_FILE_NAME);
        fs::write(&keys_path, r#"{"digitalocean": "file-key"}"#).unwrap();

        let key = api_key_from(Some(String::new()), Some(&keys_path));
        assert_eq!(key.as_deref(), Some("file-key"));
    }

    #[test]
    fn test_api_key_from_missing_everywhere() {
        let temp_dir = TempDir::new().unwrap();
        let keys_path = temp_dir.path().join("absent.json");

        assert!(api_key_from(None, Some(&keys_path)).is_none());
        assert!(api_key_from(None, None).is_none());
    }

    #[test]
    fn test_api_key_from_malformed_keys_file() {
        let temp_dir = TempDir::new().unwrap();
        let keys_path = temp_dir.path().join(KEYS_FILE_NAME);
        fs::write(&keys_path, "{not json").unwrap();

        assert!(api_key_from(None, Some(&keys_path)).is_none());
    }

    #[test]
    fn test_missing_key_error_mentions_remediation() {
        let msg = AuthError::MissingKey.to_string();
        assert!(msg.contains("DIGITAL_OCEAN"));
        assert!(msg.contains("digitalocean"));
    }
}
