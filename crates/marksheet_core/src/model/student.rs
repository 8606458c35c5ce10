//! Student record domain model.
//!
//! # Responsibility
//! - Define the canonical grading record persisted by the record store.
//! - Provide caller-side input parsing and range validation.
//!
//! # Invariants
//! - A record always carries exactly `COURSEWORK_COMPONENTS` coursework scores.
//! - `code` and `name` never contain the line-format delimiter once validated.
//! - Validated `code` and `name` carry no surrounding whitespace, since the
//!   store trims every field on load.
//! - Storage does not re-validate ranges; callers validate before add/update.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of coursework components every record carries.
pub const COURSEWORK_COMPONENTS: usize = 3;
/// Upper bound (inclusive) for a single coursework score.
pub const MAX_COURSEWORK_SCORE: i32 = 20;
/// Upper bound (inclusive) for the exam score.
pub const MAX_EXAM_SCORE: i32 = 100;
/// Raw points available: all coursework at maximum plus a full exam.
pub const TOTAL_MARKS: i32 = MAX_COURSEWORK_SCORE * COURSEWORK_COMPONENTS as i32 + MAX_EXAM_SCORE;

/// Characters that would break the comma-separated line format.
const FORBIDDEN_CHARACTERS: [char; 3] = [',', '\n', '\r'];

/// Coursework scores in component order.
pub type Coursework = [i32; COURSEWORK_COMPONENTS];

/// Input field names used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Code,
    Name,
    Coursework(usize),
    Exam,
}

impl Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Name => write!(f, "name"),
            Self::Coursework(index) => write!(f, "cw{}", index + 1),
            Self::Exam => write!(f, "exam"),
        }
    }
}

/// Caller-side validation failure for record input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Student code is empty after trimming.
    EmptyCode,
    /// Text field contains a character the line format cannot store.
    ForbiddenCharacter { field: RecordField, character: char },
    /// Text field starts or ends with whitespace.
    SurroundingWhitespace { field: RecordField },
    /// Score input is not an integer.
    InvalidNumber { field: RecordField, value: String },
    /// Coursework score (0-based `index`) outside `0..=MAX_COURSEWORK_SCORE`.
    CourseworkOutOfRange { index: usize, value: i32 },
    /// Exam score outside `0..=MAX_EXAM_SCORE`.
    ExamOutOfRange { value: i32 },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "student code cannot be empty"),
            Self::ForbiddenCharacter { field, character } => {
                write!(f, "{field} cannot contain {character:?}")
            }
            Self::SurroundingWhitespace { field } => {
                write!(f, "{field} cannot start or end with whitespace")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "{field} must be an integer, got `{value}`")
            }
            Self::CourseworkOutOfRange { index, value } => write!(
                f,
                "cw{} must be between 0 and {MAX_COURSEWORK_SCORE}, got {value}",
                index + 1
            ),
            Self::ExamOutOfRange { value } => {
                write!(f, "exam must be between 0 and {MAX_EXAM_SCORE}, got {value}")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// One student's grading data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Identifier, unique within a roster.
    pub code: String,
    /// Free-text display name.
    pub name: String,
    /// Coursework component scores, each expected in `0..=20`.
    pub coursework: Coursework,
    /// Exam score, expected in `0..=100`.
    pub exam: i32,
}

/// Mutable fields replaced by an update; `code` is the lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub name: String,
    pub coursework: Coursework,
    pub exam: i32,
}

impl StudentRecord {
    /// Creates a record without validation.
    ///
    /// Used by the store when decoding persisted lines and by callers that
    /// validate separately.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        coursework: Coursework,
        exam: i32,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            coursework,
            exam,
        }
    }

    /// Builds a validated record from raw text input.
    ///
    /// Every field is trimmed before use. Number parse failures are reported
    /// before range failures, in field order.
    ///
    /// # Errors
    /// - `InvalidNumber` when a score is not an integer.
    /// - Any error from [`StudentRecord::validate`].
    pub fn from_input(
        code: &str,
        name: &str,
        coursework: [&str; COURSEWORK_COMPONENTS],
        exam: &str,
    ) -> Result<Self, RecordValidationError> {
        let update = RecordUpdate::from_input(name, coursework, exam)?;
        let record = Self::new(code.trim(), update.name, update.coursework, update.exam);
        record.validate()?;
        Ok(record)
    }

    /// Validates text fields and score ranges.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.code.trim().is_empty() {
            return Err(RecordValidationError::EmptyCode);
        }
        check_text(RecordField::Code, &self.code)?;
        check_text(RecordField::Name, &self.name)?;
        validate_scores(&self.coursework, self.exam)
    }

    /// Replaces the mutable fields with the ones in `update`.
    pub fn apply(&mut self, update: RecordUpdate) {
        self.name = update.name;
        self.coursework = update.coursework;
        self.exam = update.exam;
    }
}

impl RecordUpdate {
    /// Parses raw update input with the same rules as [`StudentRecord::from_input`].
    pub fn from_input(
        name: &str,
        coursework: [&str; COURSEWORK_COMPONENTS],
        exam: &str,
    ) -> Result<Self, RecordValidationError> {
        let mut scores = [0; COURSEWORK_COMPONENTS];
        for (index, raw) in coursework.iter().enumerate() {
            scores[index] = parse_score(RecordField::Coursework(index), raw)?;
        }
        let exam = parse_score(RecordField::Exam, exam)?;

        let update = Self {
            name: name.trim().to_string(),
            coursework: scores,
            exam,
        };
        update.validate()?;
        Ok(update)
    }

    /// Validates the name and score ranges.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        check_text(RecordField::Name, &self.name)?;
        validate_scores(&self.coursework, self.exam)
    }
}

fn parse_score(field: RecordField, raw: &str) -> Result<i32, RecordValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| RecordValidationError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

fn check_text(field: RecordField, value: &str) -> Result<(), RecordValidationError> {
    if let Some(character) = value.chars().find(|c| FORBIDDEN_CHARACTERS.contains(c)) {
        return Err(RecordValidationError::ForbiddenCharacter { field, character });
    }
    if value.trim() != value {
        return Err(RecordValidationError::SurroundingWhitespace { field });
    }
    Ok(())
}

fn validate_scores(coursework: &Coursework, exam: i32) -> Result<(), RecordValidationError> {
    if let Some((index, value)) = coursework
        .iter()
        .copied()
        .enumerate()
        .find(|(_, value)| !(0..=MAX_COURSEWORK_SCORE).contains(value))
    {
        return Err(RecordValidationError::CourseworkOutOfRange { index, value });
    }
    if !(0..=MAX_EXAM_SCORE).contains(&exam) {
        return Err(RecordValidationError::ExamOutOfRange { value: exam });
    }
    Ok(())
}
