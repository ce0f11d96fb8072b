//! Human-readable rendering of change entries.

use crate::diff::model::ChangeEntry;
use crate::model::Domain;

/// Render one change entry as an indented plain-text block.
///
/// ```text
/// Updated result: 3 | CS301
///   grade: B -> A
/// ```
pub fn render_change(domain: Domain, change: &ChangeEntry) -> String {
    let label = domain.entry_label();
    let mut lines = Vec::new();
    match change {
        ChangeEntry::New { key, record } => {
            lines.push(format!("New {}: {}", label, key));
            for (field, value) in record.fields() {
                lines.push(format!("  {}: {}", field, value));
            }
        }
        ChangeEntry::Updated { key, changes } => {
            lines.push(format!("Updated {}: {}", label, key));
            for (field, change) in changes {
                lines.push(format!("  {}: {} -> {}", field, change.old, change.new));
            }
        }
    }
    lines.join("\n")
}

/// Render a list of change entries separated by blank lines.
pub fn render_changes(domain: Domain, changes: &[ChangeEntry]) -> String {
    changes
        .iter()
        .map(|change| render_change(domain, change))
        .collect::<Vec<_>>()
        .join("\n\n")
}
