//! Append-only audit report.
//!
//! One handle is held for the whole run under an exclusive advisory lock.
//! Dropping the writer closes the file and releases the lock.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ReportWriter {
    file: File,
    path: PathBuf,
}

impl ReportWriter {
    /// Open (creating if needed) the report in append mode and lock it.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open report {}", path.display()))?;
        file.try_lock_exclusive().with_context(|| {
            format!("report {} is locked by another audit", path.display())
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn append(&mut self, text: &str) -> Result<()> {
        self.file
            .write_all(text.as_bytes())
            .and_then(|()| self.file.flush())
            .with_context(|| format!("failed to write report {}", self.path.display()))
    }

    /// Append `line` followed by a newline.
    pub fn append_line(&mut self, line: &str) -> Result<()> {
        self.append(&format!("{line}\n"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ReportWriter {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
