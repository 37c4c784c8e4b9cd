//! Span tagger backed by an OntoNotes-label checkpoint.

use tracing::info;

use crate::ner::bert::BertNer;
use crate::ner::{EntityLabel, EntitySpan, EntityTagger, NerError};

/// Keeps only PERSON/ORG/DATE/GPE spans; every other label the model emits
/// is discarded.
pub struct BertEntityTagger {
    engine: BertNer,
}

impl BertEntityTagger {
    pub fn from_hub(model_id: &str, revision: &str) -> Result<Self, NerError> {
        let engine = BertNer::from_hub(model_id, revision)?;
        info!(model_id, "entity tagger ready");
        Ok(Self { engine })
    }
}

impl EntityTagger for BertEntityTagger {
    fn tag_entities(&self, text: &str) -> Result<Vec<EntitySpan>, NerError> {
        let entities = self.engine.predict(text)?;
        Ok(entities
            .into_iter()
            .filter_map(|e| {
                EntityLabel::from_model_label(&e.label)
                    .map(|label| EntitySpan { label, text: e.text })
            })
            .collect())
    }
}
