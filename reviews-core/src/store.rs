//! Ordered storage for review items.
//!
//! Items are only ever appended in page order, expanded in place, or cleared all
//! at once on refresh. A parallel id → index map makes lookups O(1) without ever
//! reordering the backing `Vec`.

use std::collections::HashMap;

use crate::types::{ReviewId, ReviewItem};

#[derive(Debug, Default, Clone)]
pub struct ItemStore {
    items: Vec<ReviewItem>,
    index: HashMap<ReviewId, usize>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends items after everything already stored, preserving their order.
    pub fn append(&mut self, items: impl IntoIterator<Item = ReviewItem>) {
        for item in items {
            self.index.insert(item.id, self.items.len());
            self.items.push(item);
        }
    }

    pub fn get(&self, id: ReviewId) -> Option<&ReviewItem> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    pub fn get_index(&self, index: usize) -> Option<&ReviewItem> {
        self.items.get(index)
    }

    pub fn position(&self, id: ReviewId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReviewItem> {
        self.items.iter()
    }

    /// Removes the line clamp from one item.
    ///
    /// Returns the updated item, or `None` when the id is unknown or the item was
    /// already expanded. Expansion is one-way.
    pub fn expand(&mut self, id: ReviewId) -> Option<&ReviewItem> {
        let &i = self.index.get(&id)?;
        let item = &mut self.items[i];
        if item.is_expanded() {
            return None;
        }
        item.max_lines = 0;
        Some(item)
    }

    /// Drops every item. Only a full list reset calls this.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}
