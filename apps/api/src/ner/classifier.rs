//! Token classifier with "simple" chunk aggregation.

use tracing::info;

use crate::ner::bert::BertNer;
use crate::ner::{NerError, TokenClassifier, TokenEntity};

/// Reports every aggregated chunk the model produces, whatever its label.
/// The response cap is applied downstream by the aggregator, not here.
pub struct BertTokenClassifier {
    engine: BertNer,
}

impl BertTokenClassifier {
    pub fn from_hub(model_id: &str, revision: &str) -> Result<Self, NerError> {
        let engine = BertNer::from_hub(model_id, revision)?;
        info!(model_id, "token classifier ready");
        Ok(Self { engine })
    }
}

impl TokenClassifier for BertTokenClassifier {
    fn classify_tokens(&self, text: &str) -> Result<Vec<TokenEntity>, NerError> {
        let entities = self.engine.predict(text)?;
        Ok(entities
            .into_iter()
            .map(|e| TokenEntity {
                label: e.label,
                text: e.text,
                score: e.score,
                start: e.start,
                end: e.end,
            })
            .collect())
    }
}
