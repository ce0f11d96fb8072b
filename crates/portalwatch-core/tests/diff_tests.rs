//! Change detector scenarios and algebraic properties.
//!
//! All tests operate on in-memory snapshots (no I/O).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use portalwatch_core::diff::{diff, diff_attendance, diff_results, ChangeEntry, FieldChange};
use portalwatch_core::model::{Domain, Record, Snapshot};
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn result(semester: &str, code: &str, grade: &str, outcome: &str) -> Record {
    [
        ("semester", semester),
        ("course_code", code),
        ("course_title", "Some Course"),
        ("credits", "4"),
        ("grade", grade),
        ("result", outcome),
    ]
    .into_iter()
    .collect()
}

fn attendance(key: &str, fields: &[(&str, &str)]) -> Record {
    let mut record: Record = fields.iter().copied().collect();
    record.insert("_key", key);
    record
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[test]
fn test_grade_change_reported_as_update() {
    let previous = vec![result("3", "CS301", "B", "Pass")];
    let current = vec![result("3", "CS301", "A", "Pass")];

    let changes = diff_results(&previous, &current);

    assert_eq!(
        serde_json::to_value(&changes).unwrap(),
        json!([{
            "type": "updated",
            "key": "3 | CS301",
            "changes": {"grade": {"old": "B", "new": "A"}}
        }])
    );
}

#[test]
fn test_untracked_result_field_ignored() {
    let previous = vec![result("3", "CS301", "B", "Pass")];
    let mut renamed = result("3", "CS301", "B", "Pass");
    renamed.insert("course_title", "Renamed Course");
    renamed.insert("credits", "3");

    assert!(diff_results(&previous, &[renamed]).is_empty());
}

#[test]
fn test_grade_and_result_both_reported() {
    let previous = vec![result("2", "MA201", "RA", "Fail")];
    let current = vec![result("2", "MA201", "C", "Pass")];

    let changes = diff_results(&previous, &current);
    let mut expected = BTreeMap::new();
    expected.insert("grade".to_string(), FieldChange::new("RA", "C"));
    expected.insert("result".to_string(), FieldChange::new("Fail", "Pass"));
    assert_eq!(
        changes,
        vec![ChangeEntry::Updated {
            key: "2 | MA201".to_string(),
            changes: expected
        }]
    );
}

#[test]
fn test_missing_result_field_compares_as_empty() {
    let previous: Vec<Record> = vec![[("semester", "1"), ("course_code", "A"), ("grade", "B")]
        .into_iter()
        .collect()];
    let current: Vec<Record> = vec![[
        ("semester", "1"),
        ("course_code", "A"),
        ("grade", "B"),
        ("result", ""),
    ]
    .into_iter()
    .collect()];

    assert!(diff_results(&previous, &current).is_empty());
}

#[test]
fn test_removed_result_not_reported() {
    let previous: Vec<Record> = vec![[("semester", "1"), ("course_code", "A"), ("grade", "B")]
        .into_iter()
        .collect()];

    assert!(diff_results(&previous, &[]).is_empty());
}

#[test]
fn test_new_results_follow_current_order() {
    let previous = vec![result("1", "A", "B", "Pass")];
    let current = vec![
        result("2", "Z", "A", "Pass"),
        result("1", "A", "B", "Pass"),
        result("2", "B", "O", "Pass"),
    ];

    let keys: Vec<_> = diff_results(&previous, &current)
        .iter()
        .map(|c| c.key().to_string())
        .collect();
    assert_eq!(keys, vec!["2 | Z", "2 | B"]);
}

#[test]
fn test_duplicate_key_last_row_wins() {
    let previous = vec![result("1", "A", "B", "Pass")];
    let current = vec![result("1", "A", "C", "Pass"), result("1", "A", "B", "Pass")];

    assert!(diff_results(&previous, &current).is_empty());
}

#[test]
fn test_new_result_carries_full_record() {
    let current = vec![result("4", "CS401", "A+", "Pass")];
    let changes = diff_results(&[result("1", "X", "B", "Pass")], &current);
    match &changes[0] {
        ChangeEntry::New { key, record } => {
            assert_eq!(key, "4 | CS401");
            assert_eq!(record, &current[0]);
        }
        other => panic!("expected New, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[test]
fn test_attendance_any_field_change() {
    let previous = vec![attendance(
        "19XC01",
        &[("course_code", "19XC01"), ("present", "10"), ("total", "12")],
    )];
    let current = vec![attendance(
        "19XC01",
        &[("course_code", "19XC01"), ("present", "11"), ("total", "12")],
    )];

    let changes = diff_attendance(&previous, &current);
    assert_eq!(changes.len(), 1);
    match &changes[0] {
        ChangeEntry::Updated { key, changes } => {
            assert_eq!(key, "19XC01");
            assert_eq!(changes.len(), 1);
            assert_eq!(changes["present"], FieldChange::new("10", "11"));
        }
        other => panic!("expected Updated, got {:?}", other),
    }
}

#[test]
fn test_attendance_union_of_fields() {
    let previous = vec![attendance("X", &[("present", "1"), ("exempt", "0")])];
    let current = vec![attendance("X", &[("present", "1"), ("percentage", "50")])];

    match &diff_attendance(&previous, &current)[0] {
        ChangeEntry::Updated { changes, .. } => {
            let fields: Vec<_> = changes.keys().map(String::as_str).collect();
            assert_eq!(fields, vec!["exempt", "percentage"]);
            assert_eq!(changes["exempt"], FieldChange::new("0", ""));
            assert_eq!(changes["percentage"], FieldChange::new("", "50"));
        }
        other => panic!("expected Updated, got {:?}", other),
    }
}

#[test]
fn test_attendance_new_entry_omits_identity_field() {
    let current = vec![attendance("19XC02", &[("present", "3")])];
    match &diff_attendance(&[], &current)[0] {
        ChangeEntry::New { key, record } => {
            assert_eq!(key, "19XC02");
            assert!(!record.contains("_key"));
            assert_eq!(record.get("present"), "3");
        }
        other => panic!("expected New, got {:?}", other),
    }
}

#[test]
fn test_attendance_positional_keys_follow_position() {
    // Rows keyed by position are matched by position, even if the table
    // was re-sorted between runs.
    let previous = vec![
        attendance("row_1", &[("course", "Maths"), ("present", "4")]),
        attendance("row_2", &[("course", "Physics"), ("present", "6")]),
    ];
    let current = vec![
        attendance("row_1", &[("course", "Physics"), ("present", "6")]),
        attendance("row_2", &[("course", "Maths"), ("present", "4")]),
    ];

    let changes = diff_attendance(&previous, &current);
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| !c.is_new()));
}

#[test]
fn test_domain_dispatch() {
    let previous = vec![result("1", "A", "B", "Pass")];
    let mut current = previous.clone();
    current[0].insert("course_title", "Changed");

    assert!(diff(Domain::Results, &previous, &current).is_empty());
    // The same rows diffed as attendance compare every field; with no
    // `_key` both sides fall back to the same positional key.
    assert_eq!(diff(Domain::Attendance, &previous, &current).len(), 1);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn field_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 +]{0,6}"
}

fn result_record() -> impl Strategy<Value = Record> {
    (
        "[1-8]",
        "[A-Z]{2}[0-9]{3}",
        field_value(),
        field_value(),
        field_value(),
    )
        .prop_map(|(semester, code, title, grade, outcome)| {
            [
                ("semester", semester),
                ("course_code", code),
                ("course_title", title),
                ("grade", grade),
                ("result", outcome),
            ]
            .into_iter()
            .collect()
        })
}

fn attendance_record() -> impl Strategy<Value = Record> {
    (
        "[A-Z0-9]{1,6}",
        prop::collection::btree_map("[a-z_]{1,8}", field_value(), 0..5),
    )
        .prop_map(|(key, fields)| {
            let mut record: Record = fields.into_iter().collect();
            record.insert("_key", key);
            record
        })
}

fn prefixed(records: Snapshot, prefix: &str, field: &str) -> Snapshot {
    records
        .into_iter()
        .map(|mut record| {
            let value = format!("{}{}", prefix, record.get(field));
            record.insert(field, value);
            record
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_result_self_diff_is_empty(snapshot in prop::collection::vec(result_record(), 0..12)) {
        prop_assert!(diff_results(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn prop_attendance_self_diff_is_empty(snapshot in prop::collection::vec(attendance_record(), 0..12)) {
        prop_assert!(diff_attendance(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn prop_disjoint_results_are_all_new(
        old in prop::collection::vec(result_record(), 0..8),
        new in prop::collection::vec(result_record(), 0..8),
    ) {
        let old = prefixed(old, "old-", "course_code");
        let new = prefixed(new, "new-", "course_code");
        let distinct_new: std::collections::HashSet<_> =
            new.iter().map(portalwatch_core::model::result_key).collect();

        let changes = diff_results(&old, &new);
        prop_assert_eq!(changes.len(), distinct_new.len());
        prop_assert!(changes.iter().all(ChangeEntry::is_new));
    }

    #[test]
    fn prop_disjoint_attendance_is_all_new(
        old in prop::collection::vec(attendance_record(), 0..8),
        new in prop::collection::vec(attendance_record(), 0..8),
    ) {
        let old = prefixed(old, "old-", "_key");
        let new = prefixed(new, "new-", "_key");
        let distinct_new: std::collections::HashSet<_> =
            new.iter().map(|r| r.get("_key").to_string()).collect();

        let changes = diff_attendance(&old, &new);
        prop_assert_eq!(changes.len(), distinct_new.len());
        prop_assert!(changes.iter().all(ChangeEntry::is_new));
    }
}
