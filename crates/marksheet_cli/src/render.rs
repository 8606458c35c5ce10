//! Plain-text rendering for roster output.

use marksheet_core::{ClassSummary, Grade, RecordView, SkippedLine};
use std::fmt::Write;

const TABLE_HEADER: [&str; 6] = ["Code", "Name", "CW Total", "Exam", "Overall %", "Grade"];

pub fn percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Renders rows as a left-aligned table sized to its widest cells.
pub fn table(views: &[RecordView]) -> String {
    let rows: Vec<[String; 6]> = views
        .iter()
        .map(|view| {
            [
                view.code.clone(),
                view.name.clone(),
                view.coursework_total.to_string(),
                view.exam.to_string(),
                percentage(view.overall_percentage),
                view.grade.to_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADER.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADER.map(str::to_string), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders the single-student detail card.
pub fn detail(view: &RecordView) -> String {
    format!(
        "Code: {}\nName: {}\nCW Total: {}\nExam: {}\nOverall %: {}\nGrade: {}\n",
        view.code,
        view.name,
        view.coursework_total,
        view.exam,
        percentage(view.overall_percentage),
        view.grade
    )
}

/// One-line footer shown under the table.
pub fn footer(summary: &ClassSummary) -> String {
    format!(
        "Total Students: {}    Average Overall %: {}",
        summary.total_students,
        percentage(summary.average_percentage)
    )
}

/// Dashboard block: totals plus the grade distribution.
pub fn summary(summary: &ClassSummary) -> String {
    let mut out = format!(
        "Total Students: {}\nAverage Overall %: {}\n",
        summary.total_students,
        percentage(summary.average_percentage)
    );
    let distribution = Grade::ALL
        .iter()
        .map(|grade| format!("{grade}:{}", summary.grade_distribution.count(*grade)))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "Grades: {distribution}");
    out
}

pub fn skipped_lines(skipped: &[SkippedLine]) -> String {
    if skipped.is_empty() {
        return "No malformed lines.\n".to_string();
    }
    let mut out = String::new();
    for line in skipped {
        let _ = writeln!(out, "line {}: {} ({})", line.line_number, line.content, line.reason);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{detail, footer, summary, table};
    use marksheet_core::{ClassSummary, RecordView, StudentRecord};

    fn views() -> Vec<RecordView> {
        [
            StudentRecord::new("S01", "Ada Lovelace", [20, 20, 20], 100),
            StudentRecord::new("S2", "Bo", [10, 10, 10], 50),
        ]
        .iter()
        .map(RecordView::from_record)
        .collect()
    }

    #[test]
    fn table_aligns_columns() {
        let rendered = table(&views());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Code  Name          CW Total"));
        assert!(lines[1].starts_with("S01   Ada Lovelace  60"));
        assert!(lines[1].ends_with("100.00%    A"));
        assert!(lines[2].starts_with("S2    Bo            30"));
        assert!(lines[2].ends_with("50.00%     C"));
    }

    #[test]
    fn detail_lists_every_field() {
        let rendered = detail(&views()[1]);
        assert_eq!(
            rendered,
            "Code: S2\nName: Bo\nCW Total: 30\nExam: 50\nOverall %: 50.00%\nGrade: C\n"
        );
    }

    #[test]
    fn summary_and_footer_show_totals() {
        let records = [
            StudentRecord::new("S01", "Ada", [20, 20, 20], 100),
            StudentRecord::new("S02", "Bo", [10, 10, 10], 50),
        ];
        let class = ClassSummary::from_records(&records);

        assert_eq!(
            footer(&class),
            "Total Students: 2    Average Overall %: 75.00%"
        );
        assert!(summary(&class).ends_with("Grades: A:1  B:0  C:1  D:0  F:0\n"));
    }
}
