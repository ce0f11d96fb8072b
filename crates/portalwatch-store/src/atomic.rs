//! Atomic write primitive
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the target.

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically replace `target_path` with `content`
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_state_dir", e))?;
        }
    }

    // Same directory as the target so the rename never crosses filesystems
    let temp_path = target_path.with_extension("json.tmp");

    fs::write(&temp_path, content).map_err(|e| io_error("write_state_temp", e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_state_temp", e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("state.json");

        atomic_write(&target, b"[]").unwrap();
        atomic_write(&target, b"[{}]").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"[{}]");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested").join("state.json");

        atomic_write(&target, b"[]").unwrap();

        assert!(target.exists());
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("attendance_state.json");

        atomic_write(&target, b"[]").unwrap();

        let leftovers = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
