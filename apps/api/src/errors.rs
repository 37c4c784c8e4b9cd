use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::ner::NerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as an `{"error": <message>}` JSON body.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request carried no `file` multipart field.
    #[error("No file uploaded")]
    MissingFile,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The uploaded bytes are not a readable PDF container.
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    /// The tagger or the token classifier failed on this input.
    #[error("Model inference error: {0}")]
    ModelInference(#[from] NerError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::DocumentParse(msg) => {
                tracing::error!("document parse failed: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ModelInference(e) => {
                tracing::error!("model inference failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_maps_to_400_with_exact_message() {
        let err = AppError::MissingFile;
        assert_eq!(err.to_string(), "No file uploaded");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_method_not_allowed_maps_to_405_with_exact_message() {
        let err = AppError::MethodNotAllowed;
        assert_eq!(err.to_string(), "Method Not Allowed");
        assert_eq!(err.into_response().status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_parse_and_inference_errors_map_to_500() {
        let parse = AppError::DocumentParse("bad xref".to_string());
        assert_eq!(
            parse.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let inference = AppError::ModelInference(NerError::Tokenizer("boom".to_string()));
        assert_eq!(
            inference.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message_carries_the_cause() {
        let err = AppError::DocumentParse("bad xref".to_string());
        assert!(err.to_string().contains("bad xref"));
    }
}
