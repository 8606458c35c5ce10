//! Display-side record search.
//!
//! # Responsibility
//! - Filter rosters for presentation without mutating or persisting them.

pub mod filter;
