//! In-memory record collection.
//!
//! # Responsibility
//! - Hold the ordered student records loaded from storage.
//! - Provide add/update/delete/sort operations without touching storage.
//!
//! # Invariants
//! - `add` never inserts a second record with an existing code.
//! - Sorting is stable: records with equal percentages keep relative order.

use crate::metrics::score::overall_percentage;
use crate::model::student::{RecordUpdate, StudentRecord};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Collection-level failure for code lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    DuplicateCode(String),
    NotFound(String),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCode(code) => write!(f, "student code already exists: {code}"),
            Self::NotFound(code) => write!(f, "student not found: {code}"),
        }
    }
}

impl Error for RosterError {}

/// Ordering applied by percentage sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Lowest percentage first.
    Ascending,
    /// Highest percentage first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// Ordered collection of student records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    /// Wraps already-loaded records, keeping their order.
    ///
    /// Does not check code uniqueness; persisted data is taken as-is.
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StudentRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first record whose code matches exactly.
    pub fn find(&self, code: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.code == code)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    /// Appends a record unless its code is already present.
    ///
    /// # Errors
    /// - `DuplicateCode` when a record with the same code exists; the roster
    ///   is left unchanged.
    pub fn add(&mut self, record: StudentRecord) -> RosterResult<()> {
        if self.contains_code(&record.code) {
            return Err(RosterError::DuplicateCode(record.code));
        }
        self.records.push(record);
        Ok(())
    }

    /// Replaces name, coursework and exam of the record matching `code`.
    pub fn update(&mut self, code: &str, update: RecordUpdate) -> RosterResult<&StudentRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.code == code)
            .ok_or_else(|| RosterError::NotFound(code.to_string()))?;
        record.apply(update);
        Ok(record)
    }

    /// Removes every record matching `code`.
    ///
    /// Returns the first removed record, or `None` when nothing matched.
    pub fn delete(&mut self, code: &str) -> Option<StudentRecord> {
        let position = self.records.iter().position(|record| record.code == code)?;
        let removed = self.records.remove(position);
        self.records.retain(|record| record.code != code);
        Some(removed)
    }

    /// Reorders records by overall percentage.
    pub fn sort_by_percentage(&mut self, direction: SortDirection) {
        self.records.sort_by(|left, right| {
            let left = overall_percentage(left);
            let right = overall_percentage(right);
            match direction {
                SortDirection::Ascending => left.total_cmp(&right),
                SortDirection::Descending => right.total_cmp(&left),
            }
        });
    }
}

impl From<Vec<StudentRecord>> for Roster {
    fn from(value: Vec<StudentRecord>) -> Self {
        Self::new(value)
    }
}
