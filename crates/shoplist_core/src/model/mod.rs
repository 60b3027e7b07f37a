//! Domain model for the shopping list.
//!
//! # Responsibility
//! - Define the persisted item record and its identity.
//! - Define transient UI-side state (selection marks, input draft).
//!
//! # Invariants
//! - Every item is identified by a creation-time `ItemId`.
//! - Items are immutable once created; removal is the only lifecycle step.
//! - Selection state is never persisted.

pub mod item;
pub mod selection;
