//! Profile assembly — composes the extraction stages into the response shape.

use std::sync::Arc;

use anyhow::anyhow;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::patterns::{find_email, find_phone};
use crate::extract::skills::{match_skills, SKILL_VOCABULARY};
use crate::extract::text::extract_text;
use crate::ner::{EntityLabel, EntitySpan, EntityTagger, TokenClassifier, TokenEntity};

/// Cap on token-classifier entries included in the response.
const NER_RESULT_CAP: usize = 20;
/// Cap on the raw-text preview, in characters.
const PREVIEW_CHARS: usize = 1000;

/// Tagger spans bucketed by category, document order preserved within each
/// bucket. Duplicates are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBuckets {
    pub names: Vec<String>,
    pub orgs: Vec<String>,
    pub dates: Vec<String>,
    pub gpes: Vec<String>,
}

/// The response payload: a structured profile derived from one uploaded CV.
/// Recomputed fresh per request; never cached or stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvProfile {
    pub entities: EntityBuckets,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub ner_results: Vec<TokenEntity>,
    pub raw_text: String,
}

/// Runs the full pipeline over one uploaded document. Text extraction comes
/// first; the two model passes then run concurrently on the blocking pool;
/// the pattern and skill lookups are cheap and run inline. Any stage failure
/// fails the whole request — no retries, no partial results.
pub async fn build_profile(
    bytes: Bytes,
    tagger: Arc<dyn EntityTagger>,
    classifier: Arc<dyn TokenClassifier>,
) -> Result<CvProfile, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow!(e)))??;
    let text = Arc::<str>::from(text);

    let tagger_text = Arc::clone(&text);
    let classifier_text = Arc::clone(&text);
    let (spans, tokens) = tokio::join!(
        tokio::task::spawn_blocking(move || tagger.tag_entities(&tagger_text)),
        tokio::task::spawn_blocking(move || classifier.classify_tokens(&classifier_text)),
    );
    let spans = spans.map_err(|e| AppError::Internal(anyhow!(e)))??;
    let tokens = tokens.map_err(|e| AppError::Internal(anyhow!(e)))??;

    Ok(assemble(&text, spans, tokens))
}

/// Pure assembly step: bucketing, contact lookups, skill matching, the NER
/// cap and the bounded preview.
fn assemble(text: &str, spans: Vec<EntitySpan>, mut tokens: Vec<TokenEntity>) -> CvProfile {
    tokens.truncate(NER_RESULT_CAP);
    CvProfile {
        entities: bucket_entities(spans),
        email: find_email(text),
        phone: find_phone(text),
        skills: match_skills(text, SKILL_VOCABULARY),
        ner_results: tokens,
        raw_text: text.chars().take(PREVIEW_CHARS).collect(),
    }
}

fn bucket_entities(spans: Vec<EntitySpan>) -> EntityBuckets {
    let mut buckets = EntityBuckets::default();
    for span in spans {
        match span.label {
            EntityLabel::Person => buckets.names.push(span.text),
            EntityLabel::Org => buckets.orgs.push(span.text),
            EntityLabel::Date => buckets.dates.push(span.text),
            EntityLabel::Gpe => buckets.gpes.push(span.text),
        }
    }
    buckets
}
