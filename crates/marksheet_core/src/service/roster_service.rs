//! Roster use-case service.
//!
//! # Responsibility
//! - Own the loaded roster for one interaction surface session.
//! - Validate input, apply collection operations and persist after each
//!   mutation.
//!
//! # Invariants
//! - Every successful mutation is written to the store before returning.
//! - Failed validation or code lookups leave both memory and storage untouched.
//! - The in-memory roster only changes from storage on an explicit `reload`.

use crate::metrics::summary::{lowest_student, top_student, ClassSummary};
use crate::model::roster::{Roster, RosterError, SortDirection};
use crate::model::student::{RecordUpdate, RecordValidationError, StudentRecord};
use crate::search::filter::RecordFilter;
use crate::store::record_store::{RecordStore, SkippedLine, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level error for roster operations.
#[derive(Debug)]
pub enum ServiceError {
    Validation(RecordValidationError),
    Roster(RosterError),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid input: {err}"),
            Self::Roster(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Roster(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for ServiceError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RosterError> for ServiceError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Session state for a roster backed by a record store.
pub struct RosterService<S: RecordStore> {
    store: S,
    roster: Roster,
    next_sort: SortDirection,
    skipped: Vec<SkippedLine>,
}

impl<S: RecordStore> RosterService<S> {
    /// Loads the roster from `store`, creating empty storage when absent.
    pub fn open(store: S) -> ServiceResult<Self> {
        let mut service = Self {
            store,
            roster: Roster::default(),
            next_sort: SortDirection::Descending,
            skipped: Vec::new(),
        };
        service.reload()?;
        Ok(service)
    }

    /// Replaces the in-memory roster with the current stored contents.
    ///
    /// Returns the lines skipped by this load.
    pub fn reload(&mut self) -> ServiceResult<&[SkippedLine]> {
        let report = self.store.load_with_report()?;
        self.roster = Roster::new(report.records);
        self.skipped = report.skipped;
        info!(
            "event=roster_reload module=service status=ok count={} skipped={}",
            self.roster.len(),
            self.skipped.len()
        );
        Ok(&self.skipped)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn records(&self) -> &[StudentRecord] {
        self.roster.records()
    }

    /// Lines dropped by the most recent load.
    pub fn skipped_lines(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn find(&self, code: &str) -> Option<&StudentRecord> {
        self.roster.find(code)
    }

    /// Records visible under `query`; never mutates or persists.
    pub fn search(&self, query: &str) -> Vec<&StudentRecord> {
        RecordFilter::new(query).apply(self.roster.records())
    }

    pub fn summary(&self) -> ClassSummary {
        ClassSummary::from_records(self.roster.records())
    }

    pub fn top_student(&self) -> Option<&StudentRecord> {
        top_student(self.roster.records())
    }

    pub fn lowest_student(&self) -> Option<&StudentRecord> {
        lowest_student(self.roster.records())
    }

    /// Validates and appends a new record, then persists.
    ///
    /// # Errors
    /// - `Validation` for empty codes, forbidden characters or out-of-range
    ///   scores.
    /// - `Roster(DuplicateCode)` when the code already exists.
    /// - `Store` when the write fails.
    pub fn add_student(&mut self, record: StudentRecord) -> ServiceResult<()> {
        record.validate()?;
        let code = record.code.clone();
        self.roster.add(record)?;
        self.persist()?;
        info!("event=roster_add module=service status=ok code={code}");
        Ok(())
    }

    /// Replaces name and scores of the record matching `code`, then persists.
    pub fn update_student(&mut self, code: &str, update: RecordUpdate) -> ServiceResult<()> {
        update.validate()?;
        self.roster.update(code, update)?;
        self.persist()?;
        info!("event=roster_update module=service status=ok code={code}");
        Ok(())
    }

    /// Removes the record matching `code` and persists.
    ///
    /// An unknown code is a no-op: returns `None` and writes nothing.
    pub fn delete_student(&mut self, code: &str) -> ServiceResult<Option<StudentRecord>> {
        let Some(removed) = self.roster.delete(code) else {
            info!("event=roster_delete module=service status=not_found code={code}");
            return Ok(None);
        };
        self.persist()?;
        info!("event=roster_delete module=service status=ok code={code}");
        Ok(Some(removed))
    }

    /// Sorts by overall percentage, alternating direction on every call.
    ///
    /// The first call sorts highest first. Returns the direction applied.
    pub fn toggle_sort(&mut self) -> ServiceResult<SortDirection> {
        let direction = self.next_sort;
        self.sort_by_percentage(direction)?;
        Ok(direction)
    }

    /// Sorts by overall percentage in `direction` and persists the new order.
    ///
    /// The following `toggle_sort` uses the opposite direction.
    pub fn sort_by_percentage(&mut self, direction: SortDirection) -> ServiceResult<()> {
        self.roster.sort_by_percentage(direction);
        self.next_sort = direction.toggled();
        self.persist()?;
        info!(
            "event=roster_sort module=service status=ok direction={direction} count={}",
            self.roster.len()
        );
        Ok(())
    }

    fn persist(&self) -> ServiceResult<()> {
        self.store.save(self.roster.records())?;
        Ok(())
    }
}
