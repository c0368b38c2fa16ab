//! Model registration with the host framework
//!
//! The host framework owns chat execution; this crate only hands it
//! configuration. Each catalog entry yields a synchronous and an asynchronous
//! chat registration built from the same [`ModelRegistration`] data.

use reqwest::header::HeaderMap;

use crate::api::{build_headers, API_BASE_URL};
use crate::catalog::{CatalogError, CatalogService, ModelEntry};

/// Attachment MIME types advertised for vision-capable models
pub const IMAGE_ATTACHMENT_TYPES: &[&str] =
    &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Configuration for one registered chat model
///
/// A plain data carrier; the host framework interprets it. No behavior is
/// overridden beyond identity formatting.
#[derive(Debug, Clone)]
pub struct ModelRegistration {
    /// Namespaced id the host framework dispatches on, e.g. "digitalocean/llama-3"
    pub model_id: String,
    /// Provider-side model name sent in requests
    pub model_name: String,
    /// Whether image attachments are accepted
    pub vision: bool,
    /// Whether structured schema output is supported
    pub supports_schema: bool,
    /// API base URL the host should call
    pub api_base: String,
    /// Auth headers for requests to that base
    pub headers: HeaderMap,
    /// Accepted attachment MIME types; empty for text-only models
    pub attachment_types: Vec<String>,
}

impl ModelRegistration {
    fn from_entry(entry: &ModelEntry, headers: &HeaderMap) -> Self {
        let attachment_types = if entry.supports_vision {
            IMAGE_ATTACHMENT_TYPES.iter().map(|t| t.to_string()).collect()
        } else {
            Vec::new()
        };

        Self {
            model_id: format!("digitalocean/{}", entry.id),
            model_name: entry.id.clone(),
            vision: entry.supports_vision,
            supports_schema: entry.supports_schema,
            api_base: API_BASE_URL.to_string(),
            headers: headers.clone(),
            attachment_types,
        }
    }

    /// Display label shown by the host framework
    pub fn display_label(&self) -> String {
        format!("DigitalOcean: {}", self.model_id)
    }
}

/// Sink the host framework exposes for model registration
pub trait ModelRegistry {
    /// Registers the synchronous and asynchronous chat variants of one model
    fn register(&mut self, chat: ModelRegistration, async_chat: ModelRegistration);
}

/// Registers every catalog model with the host framework
///
/// Resolves auth from the ambient environment; a missing key makes this a
/// no-op, since an unconfigured provider should stay invisible rather than
/// fail the host's startup.
pub async fn register_models(
    registry: &mut dyn ModelRegistry,
    service: &CatalogService,
) -> Result<(), CatalogError> {
    register_models_with(registry, service, build_headers().ok()).await
}

/// Registration over already-resolved headers
///
/// `None` means no key is configured: nothing is fetched and nothing is
/// registered. With headers, each catalog entry yields one synchronous and
/// one asynchronous chat registration built from the same data.
pub async fn register_models_with(
    registry: &mut dyn ModelRegistry,
    service: &CatalogService,
    headers: Option<HeaderMap>,
) -> Result<(), CatalogError> {
    let Some(headers) = headers else {
        return Ok(());
    };

    for entry in service.models(&headers).await? {
        let chat = ModelRegistration::from_entry(&entry, &headers);
        let async_chat = chat.clone();
        registry.register(chat, async_chat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::cache::CacheStore;

    fn entry(value: serde_json::Value) -> ModelEntry {
        serde_json::from_value(value).unwrap()
    }

    /// Test double collecting every registration pair
    #[derive(Default)]
    struct RecordingRegistry {
        registered: Vec<(ModelRegistration, ModelRegistration)>,
    }

    impl ModelRegistry for RecordingRegistry {
        fn register(&mut self, chat: ModelRegistration, async_chat: ModelRegistration) {
            self.registered.push((chat, async_chat));
        }
    }

    fn create_test_service(base_url: String) -> (CatalogService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::at(temp_dir.path().join("models.json"));
        (CatalogService::new(store).with_base_url(base_url), temp_dir)
    }

    #[test]
    fn test_registration_from_text_entry() {
        let model = entry(json!({"id": "llama-3.1-70b", "supports_vision": false}));
        let reg = ModelRegistration::from_entry(&model, &HeaderMap::new());

        assert_eq!(reg.model_id, "digitalocean/llama-3.1-70b");
        assert_eq!(reg.model_name, "llama-3.1-70b");
        assert!(!reg.vision);
        assert!(reg.attachment_types.is_empty());
        assert_eq!(reg.api_base, API_BASE_URL);
    }

    #[test]
    fn test_vision_entry_gets_attachment_types() {
        let model = entry(json!({"id": "llama-vision", "supports_vision": true}));
        let reg = ModelRegistration::from_entry(&model, &HeaderMap::new());

        assert!(reg.vision);
        assert_eq!(reg.attachment_types, IMAGE_ATTACHMENT_TYPES);
    }

    #[test]
    fn test_display_label_format() {
        let model = entry(json!({"id": "m1"}));
        let reg = ModelRegistration::from_entry(&model, &HeaderMap::new());

        assert_eq!(reg.display_label(), "DigitalOcean: digitalocean/m1");
    }

    #[tokio::test]
    async fn test_no_key_skips_registration_and_network() {
        let server = MockServer::start().await;
        // Any request reaching the server fails verification on drop
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(0)
            .mount(&server)
            .await;

        let (service, _temp_dir) = create_test_service(server.uri());
        let mut registry = RecordingRegistry::default();

        register_models_with(&mut registry, &service, None)
            .await
            .expect("Missing key should be a clean no-op");

        assert!(registry.registered.is_empty(), "Nothing should be registered");
    }

    #[tokio::test]
    async fn test_registers_sync_and_async_variant_per_model() {
        let server = MockServer::start().await;
        let doc = json!({"data": [
            {"id": "llama-3.2-vision"},
            {"id": "text-model-basic"}
        ]});
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(doc))
            .expect(1)
            .mount(&server)
            .await;

        let (service, _temp_dir) = create_test_service(server.uri());
        let mut registry = RecordingRegistry::default();

        register_models_with(&mut registry, &service, Some(HeaderMap::new()))
            .await
            .expect("Registration should succeed");

        assert_eq!(registry.registered.len(), 2);

        let (chat, async_chat) = &registry.registered[0];
        assert_eq!(chat.model_id, "digitalocean/llama-3.2-vision");
        assert_eq!(async_chat.model_id, chat.model_id, "Variants share one identity");
        assert!(chat.vision, "Annotated vision flag should carry into registration");
        assert_eq!(chat.attachment_types, IMAGE_ATTACHMENT_TYPES);

        let (chat, _) = &registry.registered[1];
        assert_eq!(chat.model_id, "digitalocean/text-model-basic");
        assert!(!chat.vision);
        assert!(chat.attachment_types.is_empty());
    }
}
