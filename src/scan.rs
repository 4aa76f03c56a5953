//! Course tree scanner — per-directory caption and lesson counts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CAPTION_SUFFIX: &str = ".vtt";
const LESSON_SUFFIX: &str = ".md";

/// Counts for one directory's immediate files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRecord {
    pub path: PathBuf,
    pub captions: usize,
    pub lessons: usize,
    /// Levels below the scanned root (the root itself is 0).
    pub depth: usize,
}

/// Walk `root` and return one record per directory, root included, in
/// pre-order with entries sorted by name. A missing root yields nothing.
pub fn scan(root: &Path) -> Vec<DirRecord> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "course root missing, nothing to scan");
        return Vec::new();
    }

    let mut records: Vec<DirRecord> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable path under {}: {e}", root.display());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            index.insert(entry.path().to_path_buf(), records.len());
            records.push(DirRecord {
                path: entry.path().to_path_buf(),
                captions: 0,
                lessons: 0,
                depth: entry.depth(),
            });
            continue;
        }

        // Symlinked directories are listed but never counted as files.
        if entry.path().is_dir() {
            continue;
        }

        let Some(slot) = entry.path().parent().and_then(|p| index.get(p)) else {
            continue;
        };
        let name = entry.file_name().to_string_lossy();
        let record = &mut records[*slot];
        if name.ends_with(CAPTION_SUFFIX) {
            record.captions += 1;
        }
        if name.ends_with(LESSON_SUFFIX) {
            record.lessons += 1;
        }
    }

    records
}
