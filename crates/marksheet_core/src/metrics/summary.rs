//! Class-level dashboard figures.
//!
//! # Invariants
//! - An empty collection yields zero counts and a `0.0` average.
//! - Top/lowest ties resolve to the earliest record in collection order.

use crate::metrics::score::{letter_grade, overall_percentage, round_to_hundredths, Grade};
use crate::model::student::StudentRecord;
use serde::Serialize;

/// Number of students in each grade band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    pub f: usize,
}

impl GradeDistribution {
    pub fn count(&self, grade: Grade) -> usize {
        match grade {
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
            Grade::F => self.f,
        }
    }

    fn record(&mut self, grade: Grade) {
        let slot = match grade {
            Grade::A => &mut self.a,
            Grade::B => &mut self.b,
            Grade::C => &mut self.c,
            Grade::D => &mut self.d,
            Grade::F => &mut self.f,
        };
        *slot += 1;
    }
}

/// Aggregate figures shown on the roster dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub total_students: usize,
    /// Mean of per-student overall percentages, rounded to two decimals.
    pub average_percentage: f64,
    pub grade_distribution: GradeDistribution,
}

impl ClassSummary {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        let mut distribution = GradeDistribution::default();
        let mut percentage_sum = 0.0;
        for record in records {
            let percentage = overall_percentage(record);
            percentage_sum += percentage;
            distribution.record(letter_grade(percentage));
        }

        let average_percentage = if records.is_empty() {
            0.0
        } else {
            round_to_hundredths(percentage_sum / records.len() as f64)
        };

        Self {
            total_students: records.len(),
            average_percentage,
            grade_distribution: distribution,
        }
    }
}

/// Record with the highest overall percentage.
pub fn top_student(records: &[StudentRecord]) -> Option<&StudentRecord> {
    pick_by_percentage(records, |candidate, best| candidate > best)
}

/// Record with the lowest overall percentage.
pub fn lowest_student(records: &[StudentRecord]) -> Option<&StudentRecord> {
    pick_by_percentage(records, |candidate, best| candidate < best)
}

// Only a strictly better candidate replaces the current pick.
fn pick_by_percentage(
    records: &[StudentRecord],
    is_better: impl Fn(f64, f64) -> bool,
) -> Option<&StudentRecord> {
    let mut best: Option<(&StudentRecord, f64)> = None;
    for record in records {
        let percentage = overall_percentage(record);
        let replace = match best {
            Some((_, best_percentage)) => is_better(percentage, best_percentage),
            None => true,
        };
        if replace {
            best = Some((record, percentage));
        }
    }
    best.map(|(record, _)| record)
}
