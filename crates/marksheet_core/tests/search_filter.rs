use marksheet_core::{filter_records, RecordFilter, StudentRecord};

fn roster() -> Vec<StudentRecord> {
    vec![
        StudentRecord::new("CS101", "Ada Lovelace", [18, 19, 20], 88),
        StudentRecord::new("cs202", "Grace Hopper", [12, 10, 7], 45),
        StudentRecord::new("MA303", "Alan Turing", [20, 20, 20], 100),
    ]
}

fn codes(records: &[&StudentRecord]) -> Vec<String> {
    records.iter().map(|r| r.code.clone()).collect()
}

#[test]
fn empty_query_matches_everything() {
    let records = roster();
    assert_eq!(filter_records(&records, "").len(), 3);
    assert_eq!(filter_records(&records, "   ").len(), 3);
    assert!(RecordFilter::new("  ").is_empty());
}

#[test]
fn name_match_ignores_case() {
    let records = roster();
    assert_eq!(codes(&filter_records(&records, "LOVELACE")), vec!["CS101"]);
    assert_eq!(codes(&filter_records(&records, " hopper ")), vec!["cs202"]);
    assert_eq!(codes(&filter_records(&records, "a")).len(), 3);
}

#[test]
fn code_match_is_substring_and_case_sensitive() {
    let records = roster();
    assert_eq!(codes(&filter_records(&records, "CS")), vec!["CS101"]);
    assert_eq!(codes(&filter_records(&records, "cs")), vec!["cs202"]);
    assert_eq!(codes(&filter_records(&records, "303")), vec!["MA303"]);
}

#[test]
fn filter_preserves_order_and_source() {
    let records = roster();
    let before = records.clone();

    let hits = RecordFilter::new("0").apply(&records);

    assert_eq!(codes(&hits), vec!["CS101", "cs202", "MA303"]);
    assert_eq!(records, before);
}

#[test]
fn no_match_returns_empty() {
    let records = roster();
    assert!(filter_records(&records, "zzz").is_empty());
}
