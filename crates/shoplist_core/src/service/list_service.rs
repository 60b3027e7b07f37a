//! Shopping list use-case service (the screen's view-model).
//!
//! # Responsibility
//! - Own the in-memory item list, selection marks and input draft.
//! - Write the full list through the repository after every mutation.
//! - Convert every failure into exactly one user-facing `Notice`.
//!
//! # Invariants
//! - After a successful save, storage mirrors `items()` verbatim.
//! - A failed save keeps the in-memory change; there is no retry.
//! - Selection marks are cleared after every removal pass.

use crate::model::item::{now_epoch_ms, Item, ItemId};
use crate::model::selection::{ItemDraft, SelectionSet};
use crate::notice::{Notice, Notifier};
use crate::repo::list_repo::ListRepository;
use log::{error, info, warn};

/// Result of `ListStore::load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored list was read; carries its length.
    Loaded(usize),
    /// Nothing stored yet; the list starts empty.
    Missing,
    /// Read or decode failed; the list was reset to empty.
    Failed,
}

/// Result of `ListStore::add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Item appended and persisted.
    Saved(ItemId),
    /// Item appended in memory only; storage is behind.
    Unsaved(ItemId),
    /// Name or quantity was empty; nothing changed.
    Rejected,
}

impl AddOutcome {
    /// Id of the appended item, if any.
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            Self::Saved(id) | Self::Unsaved(id) => Some(id),
            Self::Rejected => None,
        }
    }
}

/// Result of `ListStore::remove_marked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Number of items filtered out of the list.
    pub removed: usize,
    /// Whether the filtered list reached storage.
    pub persisted: bool,
}

/// View-model for the single list screen.
pub struct ListStore<R: ListRepository, N: Notifier> {
    repo: R,
    notifier: N,
    items: Vec<Item>,
    selection: SelectionSet,
    draft: ItemDraft,
    clock: fn() -> i64,
}

impl<R: ListRepository, N: Notifier> ListStore<R, N> {
    /// Creates an empty store. Call `load` to read persisted items.
    pub fn new(repo: R, notifier: N) -> Self {
        Self {
            repo,
            notifier,
            items: Vec::new(),
            selection: SelectionSet::new(),
            draft: ItemDraft::default(),
            clock: now_epoch_ms,
        }
    }

    /// Replaces the id clock (epoch milliseconds).
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Reads the persisted list into memory.
    ///
    /// Missing entry yields an empty list. Read/decode failure raises
    /// `Notice::LoadFailed` and leaves the list empty.
    pub fn load(&mut self) -> LoadOutcome {
        self.selection.clear();
        match self.repo.load_items() {
            Ok(Some(items)) => {
                info!(
                    "event=list_load module=service status=ok item_count={}",
                    items.len()
                );
                self.items = items;
                LoadOutcome::Loaded(self.items.len())
            }
            Ok(None) => {
                info!("event=list_load module=service status=ok item_count=0 stored=false");
                self.items.clear();
                LoadOutcome::Missing
            }
            Err(err) => {
                error!("event=list_load module=service status=error error={err}");
                self.items.clear();
                self.notifier.notify(Notice::LoadFailed);
                LoadOutcome::Failed
            }
        }
    }

    /// Appends one item and persists the full list.
    ///
    /// # Contract
    /// - Either field empty: raises `Notice::MissingField`, list unchanged.
    /// - Save failure: raises `Notice::AddSaveFailed`, item stays in memory.
    pub fn add(&mut self, name: impl Into<String>, quantity: impl Into<String>) -> AddOutcome {
        let name = name.into();
        let quantity = quantity.into();
        if name.is_empty() || quantity.is_empty() {
            warn!("event=list_add module=service status=rejected reason=missing_field");
            self.notifier.notify(Notice::MissingField);
            return AddOutcome::Rejected;
        }

        let id = ItemId::next_after((self.clock)(), self.items.iter().map(|item| &item.id));
        self.items.push(Item {
            name,
            quantity,
            id: id.clone(),
        });

        match self.repo.save_items(&self.items) {
            Ok(()) => {
                info!(
                    "event=list_add module=service status=ok item_id={id} item_count={}",
                    self.items.len()
                );
                AddOutcome::Saved(id)
            }
            Err(err) => {
                error!("event=list_add module=service status=error item_id={id} error={err}");
                self.notifier.notify(Notice::AddSaveFailed);
                AddOutcome::Unsaved(id)
            }
        }
    }

    /// Adds from the current input draft.
    ///
    /// The draft is cleared once the add is accepted, even when the save
    /// fails afterwards; a rejected add keeps the typed text.
    pub fn add_from_draft(&mut self) -> AddOutcome {
        if self.draft.has_missing_field() {
            return self.add(String::new(), String::new());
        }
        let draft = std::mem::take(&mut self.draft);
        self.add(draft.name, draft.quantity)
    }

    /// Flips the removal mark of one item. Never persisted.
    ///
    /// Returns the new mark state.
    pub fn toggle_mark(&mut self, id: &ItemId) -> bool {
        self.selection.toggle(id)
    }

    /// Removes every marked item, persists the result, clears all marks.
    ///
    /// Save failure raises `Notice::RemoveSaveFailed`; the in-memory removal
    /// is kept.
    pub fn remove_marked(&mut self) -> RemoveOutcome {
        let before = self.items.len();
        let selection = &self.selection;
        self.items.retain(|item| !selection.is_marked(&item.id));
        let removed = before - self.items.len();
        self.selection.clear();

        let persisted = match self.repo.save_items(&self.items) {
            Ok(()) => {
                info!(
                    "event=list_remove module=service status=ok removed={removed} item_count={}",
                    self.items.len()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=list_remove module=service status=error removed={removed} error={err}"
                );
                self.notifier.notify(Notice::RemoveSaveFailed);
                false
            }
        };

        RemoveOutcome { removed, persisted }
    }

    pub fn set_name_input(&mut self, text: impl Into<String>) {
        self.draft.name = text.into();
    }

    pub fn set_quantity_input(&mut self, text: impl Into<String>) {
        self.draft.quantity = text.into();
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_marked(&self, id: &ItemId) -> bool {
        self.selection.is_marked(id)
    }

    pub fn marked_count(&self) -> usize {
        self.selection.marked_count()
    }

    /// True when the "no items" placeholder should be shown.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The remove action is only offered for a non-empty list.
    pub fn can_remove(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::{AddOutcome, ListStore};
    use crate::model::item::ItemId;
    use crate::notice::{Notice, NoticeLog};
    use crate::repo::kv_repo::MemoryKeyValueStore;
    use crate::repo::list_repo::KvListRepository;

    fn fixed_clock() -> i64 {
        1_000
    }

    fn store() -> ListStore<KvListRepository<MemoryKeyValueStore>, NoticeLog> {
        ListStore::new(
            KvListRepository::new(MemoryKeyValueStore::new()),
            NoticeLog::new(),
        )
        .with_clock(fixed_clock)
    }

    #[test]
    fn same_millisecond_adds_get_distinct_ids() {
        let mut store = store();
        let first = store.add("eggs", "6");
        let second = store.add("flour", "1 kg");

        assert_eq!(first, AddOutcome::Saved(ItemId::from_epoch_ms(1_000)));
        assert_eq!(second, AddOutcome::Saved(ItemId::from_epoch_ms(1_001)));
    }

    #[test]
    fn draft_is_kept_on_rejection_and_cleared_on_accept() {
        let mut store = store();
        store.set_name_input("apples");

        assert_eq!(store.add_from_draft(), AddOutcome::Rejected);
        assert_eq!(store.draft().name, "apples");
        assert_eq!(store.notifier_mut().drain(), vec![Notice::MissingField]);

        store.set_quantity_input("3");
        assert!(matches!(store.add_from_draft(), AddOutcome::Saved(_)));
        assert!(store.draft().name.is_empty());
        assert!(store.draft().quantity.is_empty());
        assert_eq!(store.items()[0].name, "apples");
    }

    #[test]
    fn remove_action_follows_list_emptiness() {
        let mut store = store();
        assert!(store.is_empty());
        assert!(!store.can_remove());

        store.add("tea", "1");
        assert!(!store.is_empty());
        assert!(store.can_remove());
    }
}
