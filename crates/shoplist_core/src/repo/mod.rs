//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key/value storage contract used for local persistence.
//! - Map the item list onto one storage entry.
//!
//! # Invariants
//! - Read paths return semantic errors (`InvalidData`, `Serialization`) in
//!   addition to DB transport errors.

pub mod kv_repo;
pub mod list_repo;
