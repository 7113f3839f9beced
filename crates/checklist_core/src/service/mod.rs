//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate item store calls into lifecycle operations.
//! - Keep presentation layers decoupled from storage details.

pub mod item_service;
