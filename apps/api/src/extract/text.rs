//! PDF text-layer extraction.

use crate::errors::AppError;

/// Converts raw PDF bytes into one plain-text string: pages in order, joined
/// with newlines, a page without a text layer contributing an empty string.
/// Fails only when the bytes are not a readable PDF container — a zero-page
/// or image-only document yields `Ok` with an empty string.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| AppError::DocumentParse(e.to_string()))?;
    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupted_bytes_fail_with_parse_error() {
        let err = extract_text(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, AppError::DocumentParse(_)));
    }

    #[test]
    fn test_empty_input_fails_with_parse_error() {
        let err = extract_text(b"").unwrap_err();
        assert!(matches!(err, AppError::DocumentParse(_)));
    }
}
