//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, collection operations and persistence.
//! - Keep interaction surfaces decoupled from the storage format.

pub mod roster_service;
