use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;

use crate::errors::AppError;
use crate::extract::profile::{build_profile, CvProfile};
use crate::state::AppState;

/// POST /api/extract
/// Multipart body with one `file` field carrying a PDF byte stream. The
/// missing-file case is rejected before any extraction work starts.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CvProfile>, AppError> {
    let mut multipart = multipart.map_err(|_| AppError::MissingFile)?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::MissingFile)?
    {
        if field.name() == Some("file") {
            file = Some(field.bytes().await.map_err(|_| AppError::MissingFile)?);
            break;
        }
    }
    let Some(bytes) = file else {
        return Err(AppError::MissingFile);
    };

    let profile = build_profile(bytes, state.tagger.clone(), state.classifier.clone()).await?;
    Ok(Json(profile))
}
