//! Core grading logic for Marksheet.
//! This crate owns the student record file format and every derived metric.

pub mod logging;
pub mod metrics;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use metrics::score::{coursework_total, letter_grade, overall_percentage, Grade, RecordView};
pub use metrics::summary::{lowest_student, top_student, ClassSummary, GradeDistribution};
pub use model::roster::{Roster, RosterError, RosterResult, SortDirection};
pub use model::student::{
    Coursework, RecordField, RecordUpdate, RecordValidationError, StudentRecord,
    COURSEWORK_COMPONENTS, MAX_COURSEWORK_SCORE, MAX_EXAM_SCORE, TOTAL_MARKS,
};
pub use search::filter::{filter_records, RecordFilter};
pub use service::roster_service::{RosterService, ServiceError, ServiceResult};
pub use store::record_store::{
    ensure_storage_exists, load, load_with_report, save, FlatFileRecordStore, LineParseError,
    LoadReport, RecordStore, SkippedLine, StoreError, StoreResult,
};

/// Default store location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "Resources/studentMarks.txt";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
