//! Record persistence.
//!
//! # Responsibility
//! - Define the storage contract used by the roster service.
//! - Keep file format details inside the store boundary.

pub mod record_store;
