//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into screen-level operations.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod list_service;
