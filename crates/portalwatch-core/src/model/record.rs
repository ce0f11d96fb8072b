//! Normalized table rows and their identity keys

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use super::result_field::ResultField;

/// Synthetic attendance field holding the row identity; never diffed
pub const ATTENDANCE_KEY_FIELD: &str = "_key";

/// An ordered sequence of records for one domain at one point in time
pub type Snapshot = Vec<Record>;

/// One parsed table row: normalized field name → string value
///
/// Fields keep the order of the portal's columns, which is also the order
/// they are written to the state file and listed in emails. Equality ignores
/// that order.
///
/// Absent fields read as the empty string, so comparisons never need to tell
/// "missing" and "blank" apart. Persisted non-string JSON values are coerced
/// to strings on load.
#[derive(Debug, Clone, Default)]
pub struct Record(Vec<(String, String)>);

impl Record {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.0.iter().position(|(name, _)| name == field)
    }

    /// Value of `field`, or `""` when absent
    pub fn get(&self, field: &str) -> &str {
        self.position(field)
            .map(|index| self.0[index].1.as_str())
            .unwrap_or("")
    }

    /// Set a field; a later write to the same name replaces the value in
    /// place and keeps the field's original position
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.position(&field) {
            Some(index) => self.0[index].1 = value,
            None => self.0.push((field, value)),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All fields in column order, including `_key`
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fields in column order, excluding the attendance identity field
    pub fn content_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields()
            .filter(|(name, _)| *name != ATTENDANCE_KEY_FIELD)
    }

    /// Copy of this record without the attendance identity field
    pub fn without_key(&self) -> Record {
        self.content_fields().collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .fields()
                .all(|(field, value)| other.contains(field) && other.get(field) == value)
    }
}

impl Eq for Record {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.fields() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object of field values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((field, value)) = access.next_entry::<String, Value>()? {
            let value = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            record.insert(field, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Record, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Trim a cell's text and turn non-breaking spaces into regular spaces
pub fn clean_text(value: &str) -> String {
    value.trim().replace('\u{a0}', " ")
}

/// Normalize a header label into a field name
///
/// Every run of non-alphanumeric characters becomes a single separator, the
/// pieces are lowercased and joined with `_`. A label with no letters or
/// digits normalizes to `column`.
pub fn normalize_header(value: &str) -> String {
    let parts: Vec<String> = value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect();
    if parts.is_empty() {
        "column".to_string()
    } else {
        parts.join("_")
    }
}

/// Identity of a result row: `"<semester> | <course_code>"`, trimmed
pub fn result_key(record: &Record) -> String {
    format!(
        "{} | {}",
        record.get(ResultField::Semester.field_name()),
        record.get(ResultField::CourseCode.field_name())
    )
    .trim()
    .to_string()
}

/// Identity of an attendance row: its `_key`, or `row_<position>` when blank
///
/// The parser always fills `_key`; the positional fallback only matters for
/// hand-edited or legacy state files.
pub fn attendance_key(record: &Record, position: usize) -> String {
    let key = record.get(ATTENDANCE_KEY_FIELD).trim();
    if key.is_empty() {
        format!("row_{}", position)
    } else {
        key.to_string()
    }
}
