use insight_core::{ExtractedText, Failure, ResolvedLocator};
use insight_logging::insight_info;
use lopdf::Document;

/// Pulls the text layer out of an uploaded PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    min_text_chars: usize,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    /// Concatenates the text of every page in page order, exactly as the
    /// text layer yields it.
    ///
    /// Fails closed: an unreadable document, an empty page tree, or the first
    /// page whose text cannot be decoded all end the extraction.
    pub fn extract(&self, name: &str, bytes: &[u8]) -> Result<ExtractedText, Failure> {
        let doc = Document::load_mem(bytes)
            .map_err(|err| Failure::extraction(format!("could not open {name}: {err}")))?;

        // Keys are 1-based page numbers, already in document order.
        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(Failure::extraction(format!("{name} contains no pages")));
        }

        let mut text = String::new();
        for page_number in pages.keys() {
            let page_text = doc.extract_text(&[*page_number]).map_err(|err| {
                Failure::extraction(format!("page {page_number} of {name}: {err}"))
            })?;
            text.push_str(&page_text);
        }

        insight_info!(
            "Extracted {} characters from {} pages of {}",
            text.chars().count(),
            pages.len(),
            name
        );
        ExtractedText::new(ResolvedLocator::for_upload(name), text)
            .ensure_min_chars(self.min_text_chars)
    }
}
