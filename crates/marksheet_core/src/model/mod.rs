//! Student grading domain model.
//!
//! # Responsibility
//! - Define the record shape persisted by the record store.
//! - Define the in-memory roster and its collection operations.
//!
//! # Invariants
//! - Every record carries exactly three coursework scores.
//! - Student codes are unique within a roster (enforced at add-time).

pub mod roster;
pub mod student;
