//! Document text extraction.

use thiserror::Error;
use tracing::debug;

/// Text extraction error
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The bytes could not be read as a PDF
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// The document contains no extractable text
    #[error("No text could be extracted from the document")]
    Empty,
}

/// Turns uploaded document bytes into plain text
///
/// Implementations are CPU-bound; handlers call them on a blocking thread.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of the whole document
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// PDF extraction backed by `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::InvalidPdf(e.to_string()))?;

        debug!("Extracted {} chars from {} byte PDF", text.len(), bytes.len());

        if text.trim().is_empty() {
            return Err(ExtractError::Empty);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_invalid_pdf() {
        let result = PdfTextExtractor.extract_text(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractError::InvalidPdf(_))));
    }
}
