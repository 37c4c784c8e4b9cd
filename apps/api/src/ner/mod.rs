//! Named-entity recognition over extracted CV text.
//!
//! Two independent, model-backed views of the same text: a span tagger with
//! OntoNotes-style labels (`EntityTagger`) and a token classifier with
//! CoNLL-style labels (`TokenClassifier`). The two outputs may disagree or
//! overlap; no consensus is attempted — the aggregator reports both.
//!
//! `AppState` holds both behind `Arc<dyn …>`, so tests swap in stubs without
//! touching any handler code.

pub mod bert;
pub mod classifier;
pub mod tagger;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classifier::BertTokenClassifier;
pub use tagger::BertEntityTagger;

/// Entity categories retained from the span tagger. Everything else the
/// model emits is dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Org,
    Date,
    Gpe,
}

impl EntityLabel {
    /// Maps a model label (B-/I- prefix already stripped) to a retained
    /// category. `PER` is the CoNLL spelling of `PERSON`.
    pub fn from_model_label(label: &str) -> Option<Self> {
        match label {
            "PERSON" | "PER" => Some(Self::Person),
            "ORG" => Some(Self::Org),
            "DATE" => Some(Self::Date),
            "GPE" => Some(Self::Gpe),
            _ => None,
        }
    }
}

/// A labeled span from the tagger. Document order; duplicates allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub text: String,
}

/// An aggregated entity chunk from the token classifier. `start`/`end` are
/// byte offsets into the extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenEntity {
    pub label: String,
    pub text: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Error)]
pub enum NerError {
    #[error("model hub error: {0}")]
    Hub(#[from] hf_hub::api::sync::ApiError),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("inference error: {0}")]
    Inference(#[from] candle_core::Error),

    #[error("model config error: {0}")]
    ModelConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Span tagger over plain text. Deterministic for a fixed model revision;
/// no confidence threshold is applied.
pub trait EntityTagger: Send + Sync {
    fn tag_entities(&self, text: &str) -> Result<Vec<EntitySpan>, NerError>;
}

/// Token classifier with "simple" aggregation: adjacent same-label tokens
/// merged into one chunk. Output order is model order.
pub trait TokenClassifier: Send + Sync {
    fn classify_tokens(&self, text: &str) -> Result<Vec<TokenEntity>, NerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_label_mapping_retains_recognized_set() {
        assert_eq!(
            EntityLabel::from_model_label("PERSON"),
            Some(EntityLabel::Person)
        );
        assert_eq!(EntityLabel::from_model_label("PER"), Some(EntityLabel::Person));
        assert_eq!(EntityLabel::from_model_label("ORG"), Some(EntityLabel::Org));
        assert_eq!(EntityLabel::from_model_label("DATE"), Some(EntityLabel::Date));
        assert_eq!(EntityLabel::from_model_label("GPE"), Some(EntityLabel::Gpe));
    }

    #[test]
    fn test_unrecognized_labels_are_dropped() {
        assert_eq!(EntityLabel::from_model_label("MISC"), None);
        assert_eq!(EntityLabel::from_model_label("LOC"), None);
        assert_eq!(EntityLabel::from_model_label("CARDINAL"), None);
        assert_eq!(EntityLabel::from_model_label(""), None);
    }

    #[test]
    fn test_entity_label_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&EntityLabel::Person).unwrap(),
            r#""PERSON""#
        );
        assert_eq!(serde_json::to_string(&EntityLabel::Gpe).unwrap(), r#""GPE""#);
    }
}
