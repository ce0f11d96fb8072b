//! Change detection engine.
//!
//! Both detectors share one shape: index each side by identity key, walk the
//! current index in first-seen order, emit `New` for unseen keys and
//! `Updated` for keys whose compared fields differ. They differ only in how
//! the key is derived and which fields are compared.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::diff::model::{ChangeEntry, FieldChange};
use crate::model::{attendance_key, result_key, Domain, Record, RESULT_TRACKED_FIELDS};

/// Key → record index that remembers first-seen key order.
///
/// A key seen twice keeps its first position but points at the later record.
struct KeyedIndex<'a> {
    order: Vec<String>,
    by_key: HashMap<String, &'a Record>,
}

impl<'a> KeyedIndex<'a> {
    fn build<F>(records: &'a [Record], key_of: F) -> Self
    where
        F: Fn(&Record, usize) -> String,
    {
        let mut order = Vec::with_capacity(records.len());
        let mut by_key = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let key = key_of(record, position);
            if by_key.insert(key.clone(), record).is_none() {
                order.push(key);
            }
        }
        Self { order, by_key }
    }

    fn get(&self, key: &str) -> Option<&'a Record> {
        self.by_key.get(key).copied()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &'a Record)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.by_key.get(key).map(|record| (key.as_str(), *record)))
    }
}

/// Collect `old -> new` for every listed field whose string values differ.
fn field_changes<'f, I>(old: &Record, new: &Record, fields: I) -> BTreeMap<String, FieldChange>
where
    I: IntoIterator<Item = &'f str>,
{
    fields
        .into_iter()
        .filter_map(|field| {
            let (old_value, new_value) = (old.get(field), new.get(field));
            (old_value != new_value)
                .then(|| (field.to_string(), FieldChange::new(old_value, new_value)))
        })
        .collect()
}

/// Diff two result snapshots.
///
/// Rows are identified by `"<semester> | <course_code>"`. Only `grade` and
/// `result` are compared; a changed `course_title` or `credits` alone is not
/// reported. `New` entries carry the full current record.
pub fn diff_results(previous: &[Record], current: &[Record]) -> Vec<ChangeEntry> {
    let old_index = KeyedIndex::build(previous, |record, _| result_key(record));
    let new_index = KeyedIndex::build(current, |record, _| result_key(record));

    let tracked: Vec<&str> = RESULT_TRACKED_FIELDS
        .iter()
        .map(|field| field.field_name())
        .collect();

    let mut changes = Vec::new();
    for (key, new_record) in new_index.iter() {
        match old_index.get(key) {
            None => changes.push(ChangeEntry::New {
                key: key.to_string(),
                record: new_record.clone(),
            }),
            Some(old_record) => {
                let diffs = field_changes(old_record, new_record, tracked.iter().copied());
                if !diffs.is_empty() {
                    changes.push(ChangeEntry::Updated {
                        key: key.to_string(),
                        changes: diffs,
                    });
                }
            }
        }
    }

    tracing::debug!(
        previous = previous.len(),
        current = current.len(),
        change_count = changes.len(),
        "Diffed result snapshots"
    );
    changes
}

/// Diff two attendance snapshots.
///
/// Rows are identified by their `_key` field. Every field present on either
/// side is compared except `_key` itself, since the attendance columns are
/// not known in advance. `New` entries carry the record without `_key`.
pub fn diff_attendance(previous: &[Record], current: &[Record]) -> Vec<ChangeEntry> {
    let old_index = KeyedIndex::build(previous, attendance_key);
    let new_index = KeyedIndex::build(current, attendance_key);

    let mut changes = Vec::new();
    for (key, new_record) in new_index.iter() {
        match old_index.get(key) {
            None => changes.push(ChangeEntry::New {
                key: key.to_string(),
                record: new_record.without_key(),
            }),
            Some(old_record) => {
                let union: BTreeSet<&str> = old_record
                    .content_fields()
                    .chain(new_record.content_fields())
                    .map(|(field, _)| field)
                    .collect();
                let diffs = field_changes(old_record, new_record, union);
                if !diffs.is_empty() {
                    changes.push(ChangeEntry::Updated {
                        key: key.to_string(),
                        changes: diffs,
                    });
                }
            }
        }
    }

    tracing::debug!(
        previous = previous.len(),
        current = current.len(),
        change_count = changes.len(),
        "Diffed attendance snapshots"
    );
    changes
}

/// Diff two snapshots of `domain` with that domain's detector.
pub fn diff(domain: Domain, previous: &[Record], current: &[Record]) -> Vec<ChangeEntry> {
    match domain {
        Domain::Results => diff_results(previous, current),
        Domain::Attendance => diff_attendance(previous, current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_index_keeps_first_position_last_value() {
        let records = vec![
            rec(&[("_key", "a"), ("v", "1")]),
            rec(&[("_key", "b"), ("v", "2")]),
            rec(&[("_key", "a"), ("v", "3")]),
        ];
        let index = KeyedIndex::build(&records, attendance_key);
        let seen: Vec<(&str, &str)> = index.iter().map(|(k, r)| (k, r.get("v"))).collect();
        assert_eq!(seen, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_field_changes_only_listed_fields() {
        let old = rec(&[("grade", "B"), ("credits", "3")]);
        let new = rec(&[("grade", "B"), ("credits", "4")]);
        assert!(field_changes(&old, &new, ["grade", "result"]).is_empty());
        assert_eq!(field_changes(&old, &new, ["credits"]).len(), 1);
    }

    #[test]
    fn test_missing_equals_empty() {
        let old = rec(&[("grade", "")]);
        let new = rec(&[]);
        assert!(field_changes(&old, &new, ["grade"]).is_empty());
    }

    #[test]
    fn test_dispatch_by_domain() {
        let previous = vec![rec(&[("_key", "x"), ("semester", "1"), ("course_code", "A"), ("hours", "1")])];
        let current = vec![rec(&[("_key", "x"), ("semester", "1"), ("course_code", "A"), ("hours", "2")])];
        assert!(diff(Domain::Results, &previous, &current).is_empty());
        assert_eq!(diff(Domain::Attendance, &previous, &current).len(), 1);
    }
}
