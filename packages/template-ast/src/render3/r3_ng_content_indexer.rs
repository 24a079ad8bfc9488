//! Content projection slot numbering.
//!
//! The wildcard slot is always 0. Every other distinct selector gets the
//! next index, 1-based, in the order it is first seen.

use indexmap::IndexMap;

use crate::template_parser::template_preparser::WILDCARD_SELECTOR;

#[derive(Debug, Clone, Default)]
pub struct NgContentIndexer {
    selector_indices: IndexMap<String, usize>,
}

impl NgContentIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot index for `selector`, allocating one on first sight.
    pub fn index_of(&mut self, selector: &str) -> usize {
        if is_wildcard_selector(selector) {
            return 0;
        }
        let next_index = self.selector_indices.len() + 1;
        *self
            .selector_indices
            .entry(selector.to_string())
            .or_insert(next_index)
    }
}

pub fn is_wildcard_selector(selector: &str) -> bool {
    let selector = selector.trim();
    selector.is_empty() || selector == WILDCARD_SELECTOR
}
