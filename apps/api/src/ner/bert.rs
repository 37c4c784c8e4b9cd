//! Shared BERT token-classification engine.
//!
//! Loads a pretrained `BertForTokenClassification`-style checkpoint from the
//! Hugging Face Hub (encoder weights plus a linear head under `classifier.*`)
//! and runs per-token label prediction with softmax scores, merging adjacent
//! same-label tokens into entity chunks. CPU inference only; the loaded
//! engine is read-only and shared across requests.

use std::collections::HashMap;

use candle_core::{Device, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use crate::ner::NerError;

/// Longest token sequence fed to the encoder; longer inputs are truncated
/// by the tokenizer.
const MAX_SEQ_LEN: usize = 512;

/// One predicted token before aggregation. `label` has its B-/I- prefix
/// stripped; `index` is the position in the token sequence.
#[derive(Debug, Clone)]
pub(crate) struct TokenPrediction {
    pub label: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
    pub index: usize,
}

/// One aggregated entity chunk, offsets into the input text.
#[derive(Debug, Clone)]
pub struct RawEntity {
    pub label: String,
    pub text: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
}

pub struct BertNer {
    model: BertModel,
    head: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

impl BertNer {
    /// Loads a pretrained token-classification checkpoint, downloading it
    /// into the local Hub cache on first use.
    pub fn from_hub(model_id: &str, revision: &str) -> Result<Self, NerError> {
        let device = Device::Cpu;

        let api = Api::new()?;
        let repo = api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ));

        let config_path = repo.get("config.json")?;
        let tokenizer_path = repo.get("tokenizer.json")?;

        let config_str = std::fs::read_to_string(&config_path)?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| NerError::ModelConfig(e.to_string()))?;
        let labels = parse_labels(&config_str)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| NerError::Tokenizer(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| NerError::Tokenizer(e.to_string()))?;

        // Prefer safetensors; older checkpoints only ship pytorch_model.bin.
        let vb = match repo.get("model.safetensors") {
            Ok(path) => unsafe { VarBuilder::from_mmaped_safetensors(&[path], DTYPE, &device)? },
            Err(_) => {
                let path = repo.get("pytorch_model.bin")?;
                VarBuilder::from_pth(&path, DTYPE, &device)?
            }
        };

        let model = BertModel::load(vb.clone(), &config)?;
        let head = candle_nn::linear(config.hidden_size, labels.len(), vb.pp("classifier"))?;

        debug!(model_id, num_labels = labels.len(), "checkpoint loaded");

        Ok(Self {
            model,
            head,
            tokenizer,
            labels,
            device,
        })
    }

    /// Runs token classification over `text` and returns aggregated entity
    /// chunks in document order. Empty or whitespace-only input yields an
    /// empty list.
    pub fn predict(&self, text: &str) -> Result<Vec<RawEntity>, NerError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| NerError::Tokenizer(e.to_string()))?;
        let seq_len = encoding.get_ids().len();
        if seq_len == 0 {
            return Ok(Vec::new());
        }

        let token_ids: Vec<i64> = encoding.get_ids().iter().map(|&x| x as i64).collect();
        let type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&x| x as i64).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&x| x as i64)
            .collect();

        let input_ids = Tensor::from_vec(token_ids, (1, seq_len), &self.device)?;
        let token_type_ids = Tensor::from_vec(type_ids, (1, seq_len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (1, seq_len), &self.device)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let logits = self.head.forward(&hidden)?;
        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec2::<f32>()?;

        let offsets = encoding.get_offsets();
        let special = encoding.get_special_tokens_mask();

        let mut predictions = Vec::new();
        for (index, token_probs) in probs.iter().enumerate() {
            if special.get(index).copied().unwrap_or(1) == 1 {
                continue;
            }
            let (best, score) = argmax(token_probs);
            let label = self.labels.get(best).map(String::as_str).unwrap_or("O");
            if label == "O" {
                continue;
            }
            let core = label.trim_start_matches("B-").trim_start_matches("I-");
            let (start, end) = offsets[index];
            predictions.push(TokenPrediction {
                label: core.to_string(),
                score,
                start,
                end,
                index,
            });
        }

        Ok(aggregate_simple(&predictions, text))
    }
}

/// Reads the `id2label` table out of the checkpoint's config.json, ordered
/// by numeric id.
fn parse_labels(config_json: &str) -> Result<Vec<String>, NerError> {
    #[derive(Deserialize)]
    struct LabelMap {
        id2label: HashMap<String, String>,
    }

    let map: LabelMap =
        serde_json::from_str(config_json).map_err(|e| NerError::ModelConfig(e.to_string()))?;
    let mut labels = vec![String::new(); map.id2label.len()];
    for (id, label) in map.id2label {
        let index: usize = id
            .parse()
            .map_err(|_| NerError::ModelConfig(format!("non-numeric label id {id:?}")))?;
        if index >= labels.len() {
            return Err(NerError::ModelConfig(format!("label id {index} out of range")));
        }
        labels[index] = label;
    }
    Ok(labels)
}

fn argmax(row: &[f32]) -> (usize, f32) {
    let mut best = 0;
    for (i, &p) in row.iter().enumerate() {
        if p > row[best] {
            best = i;
        }
    }
    (best, row.get(best).copied().unwrap_or(0.0))
}

/// "Simple" aggregation: consecutive tokens carrying the same label collapse
/// into one chunk spanning from the first token's start to the last token's
/// end, scored by the mean of the member scores. A gap in token positions or
/// a label change starts a new chunk.
fn aggregate_simple(predictions: &[TokenPrediction], text: &str) -> Vec<RawEntity> {
    let mut entities: Vec<RawEntity> = Vec::new();
    let mut run: Vec<&TokenPrediction> = Vec::new();

    for pred in predictions {
        let breaks = match run.last() {
            Some(prev) => prev.label != pred.label || pred.index != prev.index + 1,
            None => false,
        };
        if breaks {
            entities.push(finish_run(&run, text));
            run.clear();
        }
        run.push(pred);
    }
    if !run.is_empty() {
        entities.push(finish_run(&run, text));
    }
    entities
}

fn finish_run(run: &[&TokenPrediction], text: &str) -> RawEntity {
    let start = run[0].start;
    let end = run[run.len() - 1].end;
    let score = run.iter().map(|p| p.score).sum::<f32>() / run.len() as f32;
    RawEntity {
        label: run[0].label.clone(),
        text: text.get(start..end).unwrap_or_default().to_string(),
        score,
        start,
        end,
    }
}
