//! Transient selection marks and input draft.
//!
//! # Invariants
//! - A missing entry means "not marked".
//! - Nothing in this module is persisted.

use crate::model::item::ItemId;
use std::collections::HashMap;

/// Per-item "marked for removal" flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    marks: HashMap<ItemId, bool>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the mark for `id` and returns the new state.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        let mark = self.marks.entry(id.clone()).or_insert(false);
        *mark = !*mark;
        *mark
    }

    pub fn is_marked(&self, id: &ItemId) -> bool {
        self.marks.get(id).copied().unwrap_or(false)
    }

    /// Number of ids currently marked `true`.
    pub fn marked_count(&self) -> usize {
        self.marks.values().filter(|marked| **marked).count()
    }

    /// Ids currently marked `true`, sorted for stable output.
    pub fn marked_ids(&self) -> Vec<ItemId> {
        let mut ids = self
            .marks
            .iter()
            .filter(|(_, marked)| **marked)
            .map(|(id, _)| id.clone())
            .collect::<Vec<_>>();
        ids.sort();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

/// Text currently typed into the two add inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: String,
}

impl ItemDraft {
    /// Returns true when either input is literally empty.
    pub fn has_missing_field(&self) -> bool {
        self.name.is_empty() || self.quantity.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.quantity.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemDraft, SelectionSet};
    use crate::model::item::ItemId;

    #[test]
    fn toggle_flips_and_reports_state() {
        let mut selection = SelectionSet::new();
        let id = ItemId::from_epoch_ms(7);

        assert!(!selection.is_marked(&id));
        assert!(selection.toggle(&id));
        assert!(selection.is_marked(&id));
        assert!(!selection.toggle(&id));
        assert!(!selection.is_marked(&id));
        assert_eq!(selection.marked_count(), 0);
    }

    #[test]
    fn marked_ids_skips_unmarked_entries() {
        let mut selection = SelectionSet::new();
        let first = ItemId::from_epoch_ms(2);
        let second = ItemId::from_epoch_ms(1);
        selection.toggle(&first);
        selection.toggle(&second);
        selection.toggle(&ItemId::from_epoch_ms(3));
        selection.toggle(&ItemId::from_epoch_ms(3));

        assert_eq!(selection.marked_ids(), vec![second, first]);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn draft_reports_missing_fields() {
        let mut draft = ItemDraft {
            name: "bread".to_string(),
            quantity: String::new(),
        };
        assert!(draft.has_missing_field());
        draft.quantity = "1".to_string();
        assert!(!draft.has_missing_field());
        draft.clear();
        assert_eq!(draft, ItemDraft::default());
    }
}
