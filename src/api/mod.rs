//! DigitalOcean inference API access
//!
//! Network client and authentication header construction. The catalog cache
//! policy lives in [`crate::catalog`]; this module only knows how to perform
//! one authenticated JSON request.

mod auth;
mod client;

pub use auth::{build_headers, headers_for_key, resolve_api_key, AuthError, KEY_ENV_VAR, KEY_NAME};
pub use client::{ApiClient, ApiError, API_BASE_URL};
