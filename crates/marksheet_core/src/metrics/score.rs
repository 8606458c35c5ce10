//! Per-record score projections.
//!
//! The percentage scale is fixed at `TOTAL_MARKS` raw points; inputs are not
//! re-validated here.

use crate::model::student::{StudentRecord, TOTAL_MARKS};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Letter grade bands, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// All grades in band order.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bound (inclusive) of each passing band, evaluated top-down.
const GRADE_THRESHOLDS: [(f64, Grade); 4] = [
    (70.0, Grade::A),
    (60.0, Grade::B),
    (50.0, Grade::C),
    (40.0, Grade::D),
];

/// Sum of the coursework component scores.
///
/// Summed as `i64` so unvalidated scores loaded from disk cannot overflow.
pub fn coursework_total(record: &StudentRecord) -> i64 {
    record.coursework.iter().map(|&score| i64::from(score)).sum()
}

/// Coursework plus exam against `TOTAL_MARKS`, as a percentage rounded to
/// two decimal places.
pub fn overall_percentage(record: &StudentRecord) -> f64 {
    let raw = coursework_total(record) + i64::from(record.exam);
    round_to_hundredths(raw as f64 / f64::from(TOTAL_MARKS) * 100.0)
}

/// Maps a percentage to its letter grade; first matching band wins.
pub fn letter_grade(percentage: f64) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| percentage >= *threshold)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Display row for one record: stored fields plus derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub code: String,
    pub name: String,
    pub coursework_total: i64,
    pub exam: i32,
    pub overall_percentage: f64,
    pub grade: Grade,
}

impl RecordView {
    pub fn from_record(record: &StudentRecord) -> Self {
        let percentage = overall_percentage(record);
        Self {
            code: record.code.clone(),
            name: record.name.clone(),
            coursework_total: coursework_total(record),
            exam: record.exam,
            overall_percentage: percentage,
            grade: letter_grade(percentage),
        }
    }
}
