//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical record stored in the persisted list entry.
//! - Generate timestamp-derived identifiers that stay unique per list.
//!
//! # Invariants
//! - `name`, `quantity` and `id` are never empty on a validated item.
//! - `id` is the decimal string of the creation time in epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier of one list item.
///
/// Serialized transparently as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps an externally provided id (FFI input, persisted data).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds an id from epoch milliseconds.
    pub fn from_epoch_ms(epoch_ms: i64) -> Self {
        Self(epoch_ms.to_string())
    }

    /// Returns the next id for a list, based on `now_epoch_ms`.
    ///
    /// Falls back to `max(existing) + 1` when the clock value is already
    /// taken or earlier than an existing id, so ids stay unique even for
    /// several adds within one millisecond. When that would overflow, the
    /// first free value at or below the clock is used instead.
    pub fn next_after<'a>(
        now_epoch_ms: i64,
        existing: impl IntoIterator<Item = &'a ItemId>,
    ) -> Self {
        let taken = existing
            .into_iter()
            .filter_map(ItemId::epoch_ms)
            .collect::<BTreeSet<_>>();
        let candidate = match taken.last() {
            Some(&newest) if newest >= now_epoch_ms => newest.checked_add(1),
            _ => Some(now_epoch_ms),
        };
        let value = candidate.unwrap_or_else(|| first_free_at_or_below(now_epoch_ms, &taken));
        Self::from_epoch_ms(value)
    }

    /// Parses the id as epoch milliseconds, if it is numeric.
    pub fn epoch_ms(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation errors for item records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyName,
    EmptyQuantity,
    EmptyId,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name cannot be empty"),
            Self::EmptyQuantity => write!(f, "item quantity cannot be empty"),
            Self::EmptyId => write!(f, "item id cannot be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// One shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Product name as typed by the user.
    pub name: String,
    /// Free-form quantity text ("2", "1 kg", ...).
    pub quantity: String,
    /// Creation-time identifier, unique within the list.
    pub id: ItemId,
}

impl Item {
    /// Creates a validated item with a caller-provided id.
    ///
    /// Emptiness is checked literally; whitespace-only text is accepted.
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        id: ItemId,
    ) -> Result<Self, ItemValidationError> {
        let item = Self {
            name: name.into(),
            quantity: quantity.into(),
            id,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.name.is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        if self.quantity.is_empty() {
            return Err(ItemValidationError::EmptyQuantity);
        }
        if self.id.as_str().is_empty() {
            return Err(ItemValidationError::EmptyId);
        }
        Ok(())
    }
}

fn first_free_at_or_below(start: i64, taken: &BTreeSet<i64>) -> i64 {
    (i64::MIN..=start)
        .rev()
        .find(|value| !taken.contains(value))
        .unwrap_or(start)
}

/// Returns current wall-clock time in epoch milliseconds.
///
/// Clocks before the epoch collapse to `0`; id uniqueness is still kept by
/// `ItemId::next_after`.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
