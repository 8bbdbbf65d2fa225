use std::path::Path;

use crate::domain::{ports::DocumentLoader, DomainError, Page};

/// Extracts text from a PDF with `pdf-extract`.
///
/// Pages are split on form feeds; output without form feeds is one page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> Result<Vec<Page>, DomainError> {
        let bytes = std::fs::read(path).map_err(|e| {
            DomainError::ingestion(format!("failed to read PDF {}: {e}", path.display()))
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            DomainError::ingestion(format!(
                "failed to extract text from {}: {e}",
                path.display()
            ))
        })?;

        if text.trim().is_empty() {
            tracing::warn!(path = %path.display(), "no text extracted, the PDF may be scanned");
        }

        let pages = split_pages(&text);
        tracing::debug!(path = %path.display(), pages = pages.len(), "pdf loaded");
        Ok(pages)
    }
}

fn split_pages(text: &str) -> Vec<Page> {
    text.split('\x0c')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, s)| Page::new(i + 1, s))
        .collect()
}
