use std::collections::HashMap;

use crate::{ExtractedText, ResolvedLocator};

/// Per-session memo of extracted text, keyed by resolved locator.
///
/// Owned by the caller and handed to each pipeline run; it is never shared
/// across sessions and dies with the process.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    entries: HashMap<ResolvedLocator, ExtractedText>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locator: &ResolvedLocator) -> Option<&ExtractedText> {
        self.entries.get(locator)
    }

    /// Stores `text` under its own source locator, replacing any earlier entry.
    pub fn put(&mut self, text: ExtractedText) {
        self.entries.insert(text.source.clone(), text);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
