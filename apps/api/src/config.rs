use anyhow::{Context, Result};

/// Default checkpoint for the span tagger (OntoNotes labels, so DATE and GPE
/// come out of the box).
pub const DEFAULT_TAGGER_MODEL: &str = "djagatiya/ner-bert-base-cased-ontonotesv5-englishv4";
/// Default checkpoint for the token classifier (CoNLL labels).
pub const DEFAULT_CLASSIFIER_MODEL: &str = "dslim/bert-base-NER";

/// Application configuration loaded from environment variables.
/// Every variable has a default; the service starts with no configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub tagger_model: String,
    pub classifier_model: String,
    pub model_revision: String,
    /// Per-request deadline. Covers both model passes, which can take
    /// seconds each on CPU.
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            tagger_model: env_or("TAGGER_MODEL", DEFAULT_TAGGER_MODEL),
            classifier_model: env_or("CLASSIFIER_MODEL", DEFAULT_CLASSIFIER_MODEL),
            model_revision: env_or("MODEL_REVISION", "main"),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            tagger_model: String::new(),
            classifier_model: String::new(),
            model_revision: "main".to_string(),
            request_timeout_secs: 5,
            max_upload_bytes: 1024 * 1024,
        }
    }
}
