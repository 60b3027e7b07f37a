//! User-facing notices raised by list operations.
//!
//! # Responsibility
//! - Enumerate every condition the UI must surface as a one-shot alert.
//! - Deliver notices to the UI shell through the `Notifier` seam.
//!
//! # Invariants
//! - Exactly one notice is raised per failed operation.
//! - Notice codes are stable; UI shells may key translations on them.

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

/// One user-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Reading or decoding the stored list failed.
    LoadFailed,
    /// Add was attempted with an empty name or quantity.
    MissingField,
    /// Add was applied in memory but the list could not be saved.
    AddSaveFailed,
    /// Removal was applied in memory but the list could not be saved.
    RemoveSaveFailed,
}

impl Notice {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::LoadFailed => "load_failed",
            Self::MissingField => "missing_field",
            Self::AddSaveFailed => "add_save_failed",
            Self::RemoveSaveFailed => "remove_save_failed",
        }
    }

    /// Default alert text.
    pub fn message(self) -> &'static str {
        match self {
            Self::LoadFailed => "Loading items failed",
            Self::MissingField => "Fill in both fields",
            Self::AddSaveFailed => "Saving failed",
            Self::RemoveSaveFailed => "Removing failed",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user-facing notices.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Queueing notifier; the UI shell drains it after each call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoticeLog {
    pending: VecDeque<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all pending notices in raise order.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notice> {
        self.pending.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.pending.push_back(notice);
    }
}
