//! HTML table parsing
//!
//! Both portal pages hold one `<table>` identified by its `id`. The first row
//! is the header; every later row with at least one `<td>` is data. Cells
//! are zipped to headers by position: extra cells are dropped, missing cells
//! leave the field absent.

use crate::errors::Result;
use portalwatch_core::config::PortalSettings;
use portalwatch_core::errors::{PwError, TableError};
use portalwatch_core::model::{
    clean_text, normalize_header, Domain, Record, ResultField, Snapshot, ATTENDANCE_KEY_FIELD,
};
use portalwatch_core::RecordParser;
use scraper::{ElementRef, Html, Selector};

pub(crate) fn selector(css: &str) -> std::result::Result<Selector, TableError> {
    Selector::parse(css).map_err(|e| TableError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Visible text of an element, cleaned
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// All `<tr>` rows of the table with the given id
fn table_rows<'a>(
    document: &'a Html,
    table_id: &str,
) -> std::result::Result<Vec<ElementRef<'a>>, TableError> {
    let tables = selector("table")?;
    let table = document
        .select(&tables)
        .find(|table| table.value().attr("id") == Some(table_id))
        .ok_or_else(|| TableError::TableNotFound {
            table_id: table_id.to_string(),
        })?;
    let rows = selector("tr")?;
    Ok(table.select(&rows).collect())
}

fn header_texts(row: ElementRef<'_>) -> std::result::Result<Vec<String>, TableError> {
    let cells = selector("th, td")?;
    Ok(row.select(&cells).map(element_text).collect())
}

fn data_cells(row: ElementRef<'_>) -> std::result::Result<Vec<String>, TableError> {
    let cells = selector("td")?;
    Ok(row.select(&cells).map(element_text).collect())
}

fn results_from_table(html: &str, table_id: &str) -> std::result::Result<Snapshot, TableError> {
    let document = Html::parse_document(html);
    let rows = table_rows(&document, table_id)?;
    let (header_row, data_rows) = rows.split_first().ok_or_else(|| TableError::EmptyTable {
        table_id: table_id.to_string(),
    })?;

    let columns: Vec<Option<ResultField>> = header_texts(*header_row)?
        .iter()
        .map(|label| ResultField::from_header(label))
        .collect();
    if columns.iter().all(Option::is_none) {
        return Err(TableError::UnexpectedHeaders {
            table_id: table_id.to_string(),
        });
    }

    let mut records = Vec::new();
    for row in data_rows {
        let values = data_cells(*row)?;
        if values.is_empty() {
            continue;
        }
        let mut record = Record::new();
        for (column, value) in columns.iter().zip(values) {
            if let Some(field) = column {
                record.insert(field.field_name(), value);
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(TableError::NoRows {
            table_id: table_id.to_string(),
        });
    }
    Ok(records)
}

/// Normalized attendance column names; blank or symbol-only headers become
/// `column_<n>` (1-based)
fn attendance_columns(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let label = if label.is_empty() {
                format!("Column {}", index + 1)
            } else {
                label.clone()
            };
            match normalize_header(&label).as_str() {
                "column" => format!("column_{}", index + 1),
                normalized => normalized.to_string(),
            }
        })
        .collect()
}

fn attendance_from_table(html: &str, table_id: &str) -> std::result::Result<Snapshot, TableError> {
    let document = Html::parse_document(html);
    let rows = table_rows(&document, table_id)?;
    if rows.len() < 2 {
        return Err(TableError::EmptyTable {
            table_id: table_id.to_string(),
        });
    }

    let columns = attendance_columns(&header_texts(rows[0])?);

    let mut records = Vec::new();
    for (position, row) in rows.iter().enumerate().skip(1) {
        let values = data_cells(*row)?;
        if values.is_empty() {
            continue;
        }
        let mut record = Record::new();
        for (column, value) in columns.iter().zip(values) {
            record.insert(column.as_str(), value);
        }
        let key = columns
            .first()
            .map(|first| record.get(first).to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| format!("row_{}", position));
        record.insert(ATTENDANCE_KEY_FIELD, key);
        records.push(record);
    }

    if records.is_empty() {
        return Err(TableError::NoRows {
            table_id: table_id.to_string(),
        });
    }
    Ok(records)
}

/// Parse the results table into records with the fixed result fields
///
/// Unrecognised columns are dropped; rows with no recognised cell are
/// skipped.
pub fn parse_results(html: &str, table_id: &str) -> Result<Snapshot> {
    results_from_table(html, table_id)
        .map_err(|e| PwError::from(e).with_domain(Domain::Results.as_str()))
}

/// Parse the attendance table into open records keyed by `_key`
///
/// `_key` is the first column's value, or `row_<n>` (1-based data row
/// index) when that value is blank.
pub fn parse_attendance(html: &str, table_id: &str) -> Result<Snapshot> {
    attendance_from_table(html, table_id)
        .map_err(|e| PwError::from(e).with_domain(Domain::Attendance.as_str()))
}

/// [`RecordParser`] over the two portal tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTableParser {
    result_table_id: String,
    attendance_table_id: String,
}

impl HtmlTableParser {
    pub fn new(result_table_id: impl Into<String>, attendance_table_id: impl Into<String>) -> Self {
        Self {
            result_table_id: result_table_id.into(),
            attendance_table_id: attendance_table_id.into(),
        }
    }

    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self::new(
            settings.table_id(Domain::Results),
            settings.table_id(Domain::Attendance),
        )
    }
}

impl RecordParser for HtmlTableParser {
    fn parse(&self, domain: Domain, html: &str) -> Result<Snapshot> {
        let records = match domain {
            Domain::Results => parse_results(html, &self.result_table_id)?,
            Domain::Attendance => parse_attendance(html, &self.attendance_table_id)?,
        };
        tracing::debug!(domain = %domain, record_count = records.len(), "Parsed table");
        Ok(records)
    }
}
