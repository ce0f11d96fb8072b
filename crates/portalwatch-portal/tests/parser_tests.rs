// Integration tests for HTML table parsing

#![allow(clippy::unwrap_used, clippy::expect_used)]

use portalwatch_core::errors::ErrorKind;
use portalwatch_core::model::Domain;
use portalwatch_core::RecordParser;
use portalwatch_portal::{parse_attendance, parse_results, HtmlTableParser};

const RESULTS_PAGE: &str = r#"
<html><body>
<table id="DgResult" cellspacing="0" rules="all" border="1">
  <tr>
    <td>Semester</td><td>Course Code</td><td>Course Title</td>
    <td>Credits</td><td>Grade / Remark</td><td>Result</td><td>Month &amp; Year</td>
  </tr>
  <tr>
    <td> 3 </td><td>19XC31</td><td>Data&nbsp;Structures</td>
    <td>4</td><td>A+</td><td>PASS</td><td>NOV 2025</td>
  </tr>
  <tr>
    <td>3</td><td>19XC32</td><td>Operating Systems</td>
    <td>3</td><td>B</td><td>PASS</td><td>NOV 2025</td>
  </tr>
  <tr><th colspan="7">Page 1</th></tr>
</table>
</body></html>"#;

const ATTENDANCE_PAGE: &str = r#"
<html><body>
<table id="DgAttendance">
  <tr>
    <th>Course Code</th><th>Course Title</th><th>Total Hours</th>
    <th>Total Present</th><th>%</th><th></th>
  </tr>
  <tr>
    <td>19XC31</td><td>Data Structures</td><td>40</td><td>36</td><td>90</td><td>x</td>
  </tr>
  <tr>
    <td>  </td><td>Library Hour</td><td>10</td><td>10</td><td>100</td>
  </tr>
</table>
</body></html>"#;

#[test]
fn test_parse_results_maps_known_columns() {
    let records = parse_results(RESULTS_PAGE, "DgResult").unwrap();

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.get("semester"), "3");
    assert_eq!(first.get("course_code"), "19XC31");
    assert_eq!(first.get("course_title"), "Data Structures");
    assert_eq!(first.get("credits"), "4");
    assert_eq!(first.get("grade"), "A+");
    assert_eq!(first.get("result"), "PASS");
    // "Month & Year" is not a result column
    assert_eq!(first.len(), 6);
}

#[test]
fn test_parsed_fields_follow_column_order() {
    let results = parse_results(RESULTS_PAGE, "DgResult").unwrap();
    let names: Vec<&str> = results[0].fields().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec!["semester", "course_code", "course_title", "credits", "grade", "result"]
    );

    let attendance = parse_attendance(ATTENDANCE_PAGE, "DgAttendance").unwrap();
    let names: Vec<&str> = attendance[0].content_fields().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec!["course_code", "course_title", "total_hours", "total_present", "column_5", "column_6"]
    );
}

#[test]
fn test_parse_results_missing_table() {
    let err = parse_results(ATTENDANCE_PAGE, "DgResult").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.message().contains("not found"));
}

#[test]
fn test_parse_results_unexpected_headers() {
    let html = r#"<table id="DgResult"><tr><td>Name</td><td>Value</td></tr>
        <tr><td>a</td><td>b</td></tr></table>"#;
    let err = parse_results(html, "DgResult").unwrap_err();
    assert!(err.message().contains("Unexpected table headers"));
}

#[test]
fn test_parse_results_header_only_has_no_rows() {
    let html = r#"<table id="DgResult"><tr><td>Grade</td></tr></table>"#;
    let err = parse_results(html, "DgResult").unwrap_err();
    assert!(err.message().contains("No rows"));
}

#[test]
fn test_parse_results_rows_without_known_cells_skipped() {
    let html = r#"<table id="DgResult">
        <tr><td>S.No</td><td>Grade</td></tr>
        <tr><td>1</td></tr>
        <tr><td>2</td><td>O</td></tr></table>"#;
    let records = parse_results(html, "DgResult").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("grade"), "O");
}

#[test]
fn test_parse_attendance_columns_and_keys() {
    let records = parse_attendance(ATTENDANCE_PAGE, "DgAttendance").unwrap();

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.get("_key"), "19XC31");
    assert_eq!(first.get("course_code"), "19XC31");
    assert_eq!(first.get("total_present"), "36");
    assert_eq!(first.get("column_5"), "90");
    assert_eq!(first.get("column_6"), "x");

    // Blank first cell falls back to the 1-based row position
    let second = &records[1];
    assert_eq!(second.get("_key"), "row_2");
    assert!(!second.contains("column_6"));
}

#[test]
fn test_parse_attendance_header_only_is_empty() {
    let html = r#"<table id="DgAttendance"><tr><th>Course</th></tr></table>"#;
    let err = parse_attendance(html, "DgAttendance").unwrap_err();
    assert_eq!(err.code(), "ERR_PARSE");
    assert_eq!(err.domain(), Some("attendance"));
    assert!(err.message().contains("empty"));
}

#[test]
fn test_parse_attendance_custom_table_id() {
    let html = ATTENDANCE_PAGE.replace("DgAttendance", "GridView1");
    assert!(parse_attendance(&html, "DgAttendance").is_err());
    assert_eq!(parse_attendance(&html, "GridView1").unwrap().len(), 2);
}

#[test]
fn test_record_parser_dispatches_by_domain() {
    let parser = HtmlTableParser::new("DgResult", "DgAttendance");

    assert_eq!(parser.parse(Domain::Results, RESULTS_PAGE).unwrap().len(), 2);
    assert_eq!(
        parser.parse(Domain::Attendance, ATTENDANCE_PAGE).unwrap()[0].get("_key"),
        "19XC31"
    );
    assert!(parser.parse(Domain::Attendance, RESULTS_PAGE).is_err());
}
