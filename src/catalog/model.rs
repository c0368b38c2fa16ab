//! Model catalog entries and capability annotation
//!
//! Entries are decoded from the provider's `/models` response. Annotation is
//! applied only to the in-memory copies handed to callers; the document on
//! disk stays exactly as the network returned it, so re-annotation is
//! deterministic across loads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name fragments that mark a model as vision-capable
///
/// Best-effort heuristic: models whose names don't reflect capability will be
/// misclassified, and that is accepted rather than guessed around.
const VISION_KEYWORDS: &[&str] = &[
    "vision",
    "visual",
    "multimodal",
    "vlm",
    "gpt-4o",
    "claude-3",
];

/// One model record from the provider's catalog
///
/// Unknown provider fields are preserved in `extra` so JSON output reproduces
/// the record as the provider shaped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model identifier, unique within a fetch
    ///
    /// Empty when the provider omitted the field; an absent id is not
    /// invented on re-serialization.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Provider type tag, e.g. "model"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    /// Creation time as a unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// Owning organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,

    /// Whether the model accepts image input; set by [`annotate`]
    #[serde(default)]
    pub supports_vision: bool,

    /// Whether the model supports structured schema output; always false for
    /// this provider
    #[serde(default)]
    pub supports_schema: bool,

    /// Any further provider fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelEntry {
    /// Human-readable name: the provider's type tag, falling back to the id
    pub fn display_name(&self) -> &str {
        self.object.as_deref().unwrap_or(&self.id)
    }
}

/// Infers whether a model accepts image input
///
/// An explicit truthy `supports_vision` field wins; otherwise the lower-cased
/// id is tested for the fixed keyword set. A missing id resolves to false
/// rather than erroring.
pub fn supports_vision(entry: &ModelEntry) -> bool {
    if entry.supports_vision {
        return true;
    }
    let id = entry.id.to_lowercase();
    VISION_KEYWORDS.iter().any(|keyword| id.contains(keyword))
}

/// Annotates raw catalog entries with capability flags
///
/// Pure function over the in-memory list; the cache on disk is untouched.
/// Every returned entry has `supports_schema == false` (provider-wide
/// limitation, not model-specific) and `supports_vision` from
/// [`supports_vision`].
pub fn annotate(mut entries: Vec<ModelEntry>) -> Vec<ModelEntry> {
    for entry in &mut entries {
        entry.supports_vision = supports_vision(entry);
        entry.supports_schema = false;
    }
    entries
}
