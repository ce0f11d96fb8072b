use crate::model::{Record, ATTENDANCE_KEY_FIELD};

/// Render records as a numbered list, one indented line per field
///
/// With `include_key`, each label also shows the row identity (the `_key`
/// value, or the 1-based position when a record has none).
///
/// ```text
/// 1. (19XC01)
///    present: 10
///    total: 12
/// ```
pub fn render_snapshot_records(records: &[Record], include_key: bool) -> String {
    let mut lines = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let position = index + 1;
        if include_key {
            let key = if record.contains(ATTENDANCE_KEY_FIELD) {
                record.get(ATTENDANCE_KEY_FIELD).to_string()
            } else {
                position.to_string()
            };
            lines.push(format!("{}. ({})", position, key));
        } else {
            lines.push(format!("{}.", position));
        }
        for (field, value) in record.content_fields() {
            lines.push(format!("   {}: {}", field, value));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}
