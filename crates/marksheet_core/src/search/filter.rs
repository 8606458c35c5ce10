//! Substring filter over student records.
//!
//! # Invariants
//! - Filtering borrows records and preserves collection order.
//! - An empty (or whitespace-only) query matches every record.

use crate::model::student::StudentRecord;

/// Normalized search query.
///
/// Codes are compared against the query exactly as typed, not against a
/// lowercased copy, so `S01` finds `S01` but `s01` does not. This
/// intentionally departs from a fully case-folded search, which could never
/// match codes containing upper-case letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    /// Query as typed, trimmed. Matched against codes case-sensitively.
    text: String,
    /// Lowercased query. Matched against lowercased names.
    folded: String,
}

impl RecordFilter {
    pub fn new(query: &str) -> Self {
        let text = query.trim().to_string();
        let folded = text.to_lowercase();
        Self { text, folded }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns whether `record` is visible under this query.
    ///
    /// A record matches when its name contains the query ignoring case, or
    /// its code contains the query exactly as typed.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.is_empty()
            || record.name.to_lowercase().contains(&self.folded)
            || record.code.contains(&self.text)
    }

    /// Borrows the matching records, keeping their order.
    pub fn apply<'a>(&self, records: &'a [StudentRecord]) -> Vec<&'a StudentRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Convenience wrapper for a one-off filter.
pub fn filter_records<'a>(records: &'a [StudentRecord], query: &str) -> Vec<&'a StudentRecord> {
    RecordFilter::new(query).apply(records)
}
