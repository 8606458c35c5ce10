//! Flat-file record store.
//!
//! # Responsibility
//! - Own the line-oriented on-disk format for student records.
//! - Load and save whole rosters; keep no state between calls.
//!
//! # Format
//! - Line 1: decimal record count. Written on save, ignored on load.
//! - Every other non-blank line: `code,name,cw1,cw2,cw3,exam`.
//! - Lines and fields are trimmed; fields beyond the sixth are ignored.
//!
//! # Invariants
//! - Malformed lines never fail a load; they are reported in `LoadReport`.
//! - Saves rewrite the whole file in place. There is no locking and no
//!   temp-file swap, so concurrent writers race and the last one wins.

use crate::model::student::{RecordField, StudentRecord, COURSEWORK_COMPONENTS};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Field separator used by the line format.
pub const FIELD_DELIMITER: char = ',';
/// Contents written when a store file is created.
pub const EMPTY_STORE_CONTENTS: &str = "0\n";
const FIELDS_PER_LINE: usize = 6;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure; propagated to the caller without retry.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "record store I/O failed at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Reason a persisted line was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParseError {
    /// Fewer than six comma-separated fields.
    MissingFields { found: usize },
    /// A score field is not an integer.
    InvalidNumber { field: RecordField, value: String },
}

impl Display for LineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields { found } => {
                write!(f, "expected {FIELDS_PER_LINE} fields, found {found}")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "{field} is not an integer: `{value}`")
            }
        }
    }
}

impl Error for LineParseError {}

/// Persisted line that could not be decoded into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file, blank lines included.
    pub line_number: usize,
    /// Trimmed line text.
    pub content: String,
    pub reason: LineParseError,
}

/// Decoded store contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub records: Vec<StudentRecord>,
    pub skipped: Vec<SkippedLine>,
    /// Count from the header line, when it parses as a number.
    pub declared_count: Option<usize>,
}

/// Storage seam used by the roster service.
pub trait RecordStore {
    /// Creates the backing storage with an empty roster when absent.
    fn ensure_storage_exists(&self) -> StoreResult<()>;
    /// Reads every record plus the lines that failed to decode.
    fn load_with_report(&self) -> StoreResult<LoadReport>;
    /// Replaces the stored roster with `records`, in order.
    fn save(&self, records: &[StudentRecord]) -> StoreResult<()>;

    /// Reads every well-formed record, dropping malformed lines.
    fn load(&self) -> StoreResult<Vec<StudentRecord>> {
        self.load_with_report().map(|report| report.records)
    }
}

/// Record store backed by one text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatFileRecordStore {
    path: PathBuf,
}

impl FlatFileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FlatFileRecordStore {
    fn ensure_storage_exists(&self) -> StoreResult<()> {
        ensure_storage_exists(&self.path)
    }

    fn load_with_report(&self) -> StoreResult<LoadReport> {
        load_with_report(&self.path)
    }

    fn save(&self, records: &[StudentRecord]) -> StoreResult<()> {
        save(&self.path, records)
    }
}

/// Creates the store file containing `0` if it does not exist yet.
///
/// # Side effects
/// - Creates missing parent directories.
/// - Leaves an existing file untouched, so repeated calls are idempotent.
pub fn ensure_storage_exists(path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
        }
    }

    if path.exists() {
        return Ok(());
    }

    fs::write(path, EMPTY_STORE_CONTENTS).map_err(|err| io_error(path, err))?;
    info!("event=store_ensure module=store status=created");
    Ok(())
}

/// Loads every well-formed record from `path`.
///
/// Malformed lines are skipped and logged; use [`load_with_report`] to
/// inspect them.
pub fn load(path: impl AsRef<Path>) -> StoreResult<Vec<StudentRecord>> {
    load_with_report(path).map(|report| report.records)
}

/// Loads records from `path` together with the skipped lines.
///
/// # Side effects
/// - Creates the file (and parent directory) when absent.
/// - Emits `store_load` and per-line `record_skipped` events.
pub fn load_with_report(path: impl AsRef<Path>) -> StoreResult<LoadReport> {
    let path = path.as_ref();
    let started_at = Instant::now();

    ensure_storage_exists(path)?;
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            error!(
                "event=store_load module=store status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(io_error(path, err));
        }
    };

    let report = decode(&contents);
    for skipped in &report.skipped {
        warn!(
            "event=record_skipped module=store status=skip line={} reason={}",
            skipped.line_number, skipped.reason
        );
    }
    if let Some(declared) = report.declared_count {
        if declared != report.records.len() {
            debug!(
                "event=store_load module=store status=count_mismatch declared={} loaded={}",
                declared,
                report.records.len()
            );
        }
    }
    info!(
        "event=store_load module=store status=ok count={} skipped={} duration_ms={}",
        report.records.len(),
        report.skipped.len(),
        started_at.elapsed().as_millis()
    );
    Ok(report)
}

/// Rewrites `path` with the count line followed by one line per record.
pub fn save(path: impl AsRef<Path>, records: &[StudentRecord]) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();

    ensure_storage_exists(path)?;
    if let Err(err) = fs::write(path, encode(records)) {
        error!(
            "event=store_save module=store status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(io_error(path, err));
    }

    info!(
        "event=store_save module=store status=ok count={} duration_ms={}",
        records.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

/// Decodes full store file contents.
pub fn decode(contents: &str) -> LoadReport {
    let mut report = LoadReport::default();
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((_, header)) = lines.next() else {
        return report;
    };
    report.declared_count = header.parse().ok();

    for (line_number, line) in lines {
        match parse_record_line(line) {
            Ok(record) => report.records.push(record),
            Err(reason) => report.skipped.push(SkippedLine {
                line_number,
                content: line.to_string(),
                reason,
            }),
        }
    }

    report
}

/// Encodes records into full store file contents.
pub fn encode(records: &[StudentRecord]) -> String {
    let mut contents = format!("{}\n", records.len());
    for record in records {
        contents.push_str(&format_record_line(record));
        contents.push('\n');
    }
    contents
}

/// Parses one `code,name,cw1,cw2,cw3,exam` line.
pub fn parse_record_line(line: &str) -> Result<StudentRecord, LineParseError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < FIELDS_PER_LINE {
        return Err(LineParseError::MissingFields {
            found: fields.len(),
        });
    }

    let mut coursework = [0; COURSEWORK_COMPONENTS];
    for (index, score) in coursework.iter_mut().enumerate() {
        *score = parse_field(RecordField::Coursework(index), fields[2 + index])?;
    }
    let exam = parse_field(RecordField::Exam, fields[5])?;

    Ok(StudentRecord::new(fields[0], fields[1], coursework, exam))
}

/// Formats one record as a store line, without the trailing newline.
pub fn format_record_line(record: &StudentRecord) -> String {
    let [cw1, cw2, cw3] = record.coursework;
    format!(
        "{},{},{cw1},{cw2},{cw3},{}",
        record.code, record.name, record.exam
    )
}

fn parse_field(field: RecordField, value: &str) -> Result<i32, LineParseError> {
    value.parse().map_err(|_| LineParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, parse_record_line, LineParseError};
    use crate::model::student::{RecordField, StudentRecord};

    #[test]
    fn parse_record_line_trims_fields_and_ignores_extras() {
        let record = parse_record_line(" S01 , Ada Lovelace ,18, 19 ,20,88,extra").unwrap();
        assert_eq!(
            record,
            StudentRecord::new("S01", "Ada Lovelace", [18, 19, 20], 88)
        );
    }

    #[test]
    fn parse_record_line_reports_field_count() {
        let err = parse_record_line("S01,Ada,18,19").unwrap_err();
        assert_eq!(err, LineParseError::MissingFields { found: 4 });
    }

    #[test]
    fn parse_record_line_reports_bad_score() {
        let err = parse_record_line("S01,Ada,18,x,20,88").unwrap_err();
        assert_eq!(
            err,
            LineParseError::InvalidNumber {
                field: RecordField::Coursework(1),
                value: "x".to_string(),
            }
        );
    }

    #[test]
    fn decode_tolerates_wrong_header_count_and_blank_lines() {
        let report = decode("7\n\nS01,Ada,1,2,3,4\n   \nS02,Bob,5,6,7,8\n");
        assert_eq!(report.declared_count, Some(7));
        assert_eq!(report.records.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn decode_of_empty_contents_is_empty() {
        assert_eq!(decode("").records, Vec::new());
        assert_eq!(decode("0\n").records, Vec::new());
    }

    #[test]
    fn encode_writes_count_line_first() {
        let records = vec![StudentRecord::new("S01", "Ada", [1, 2, 3], 4)];
        assert_eq!(encode(&records), "1\nS01,Ada,1,2,3,4\n");
        assert_eq!(encode(&[]), "0\n");
    }
}
