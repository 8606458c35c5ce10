//! Derived grading metrics.
//!
//! # Responsibility
//! - Compute per-record totals, percentages and letter grades.
//! - Aggregate class-level dashboard figures.
//!
//! # Invariants
//! - Every function here is pure and never fails.

pub mod score;
pub mod summary;
