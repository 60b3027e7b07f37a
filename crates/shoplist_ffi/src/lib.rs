//! FFI bridge crate exposing shopping list use-cases to the mobile UI.

pub mod api;
