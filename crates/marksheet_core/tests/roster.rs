use marksheet_core::{RecordUpdate, Roster, RosterError, SortDirection, StudentRecord};

fn record(code: &str, raw_total: i32) -> StudentRecord {
    // Whole raw total on the exam; exam range is not checked here.
    StudentRecord::new(code, format!("Student {code}"), [0, 0, 0], raw_total)
}

fn codes(roster: &Roster) -> Vec<&str> {
    roster.records().iter().map(|r| r.code.as_str()).collect()
}

#[test]
fn add_appends_and_rejects_duplicates() {
    let mut roster = Roster::default();
    roster.add(record("S01", 40)).unwrap();
    roster.add(record("S02", 60)).unwrap();

    let before = roster.clone();
    let err = roster.add(record("S01", 99)).unwrap_err();

    assert_eq!(err, RosterError::DuplicateCode("S01".to_string()));
    assert_eq!(roster, before);
    assert_eq!(codes(&roster), vec!["S01", "S02"]);
}

#[test]
fn duplicate_check_is_case_sensitive() {
    let mut roster = Roster::new(vec![record("abc", 10)]);
    roster.add(record("ABC", 20)).unwrap();
    assert_eq!(roster.len(), 2);
}

#[test]
fn update_replaces_mutable_fields_only() {
    let mut roster = Roster::new(vec![record("S01", 40), record("S02", 60)]);

    let updated = roster
        .update(
            "S02",
            RecordUpdate {
                name: "Renamed".to_string(),
                coursework: [1, 2, 3],
                exam: 70,
            },
        )
        .unwrap();

    assert_eq!(updated.code, "S02");
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.coursework, [1, 2, 3]);
    assert_eq!(updated.exam, 70);
    assert_eq!(codes(&roster), vec!["S01", "S02"]);
}

#[test]
fn update_unknown_code_returns_not_found() {
    let mut roster = Roster::new(vec![record("S01", 40)]);
    let before = roster.clone();

    let err = roster
        .update(
            "S09",
            RecordUpdate {
                name: "Ghost".to_string(),
                coursework: [0, 0, 0],
                exam: 0,
            },
        )
        .unwrap_err();

    assert_eq!(err, RosterError::NotFound("S09".to_string()));
    assert_eq!(roster, before);
}

#[test]
fn delete_removes_matching_record_and_ignores_unknown_codes() {
    let mut roster = Roster::new(vec![record("S01", 40), record("S02", 60), record("S03", 80)]);

    let removed = roster.delete("S02").unwrap();
    assert_eq!(removed.code, "S02");
    assert_eq!(codes(&roster), vec!["S01", "S03"]);

    assert!(roster.delete("S02").is_none());
    assert_eq!(roster.len(), 2);
}

#[test]
fn sort_orders_by_percentage_in_both_directions() {
    // 80 raw points = 50%, 128 raw points = 80%.
    let mut roster = Roster::new(vec![record("A", 80), record("B", 128), record("C", 16)]);

    roster.sort_by_percentage(SortDirection::Descending);
    assert_eq!(codes(&roster), vec!["B", "A", "C"]);

    roster.sort_by_percentage(SortDirection::Ascending);
    assert_eq!(codes(&roster), vec!["C", "A", "B"]);
}

#[test]
fn sort_is_stable_for_equal_percentages() {
    let mut roster = Roster::new(vec![record("X", 50), record("Y", 50), record("Z", 10)]);

    roster.sort_by_percentage(SortDirection::Descending);
    assert_eq!(codes(&roster), vec!["X", "Y", "Z"]);

    roster.sort_by_percentage(SortDirection::Ascending);
    assert_eq!(codes(&roster), vec!["Z", "X", "Y"]);
}

#[test]
fn sort_direction_toggles() {
    assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
}
