use clap::ValueEnum;
use std::path::PathBuf;

/// Courses audited when none are given on the command line.
pub const DEFAULT_COURSES: &[&str] = &[
    "advanced-foundry",
    "blockchain-basics",
    "foundry",
    "solidity",
    "uniswap-v2",
    "security",
    "formal-verification",
];

pub const DEFAULT_TOOL: &str = "updraft";
pub const DEFAULT_COURSES_DIR: &str = "courses";
pub const DEFAULT_REPORT: &str = "audit.txt";

/// What to do with a course when one of its sync steps fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SyncFailurePolicy {
    /// Log the failure and audit whatever is on disk.
    #[default]
    Continue,
    /// Write the course header and a skip line, then move on.
    SkipCourse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Lesson directories with fewer `.vtt` files are flagged.
    pub min_captions: usize,
    /// Lesson directories with fewer `.md` files are flagged.
    pub min_lessons: usize,
    /// Depth below the course root at which lesson directories live.
    pub lesson_depth: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_captions: 13,
            min_lessons: 1,
            lesson_depth: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub courses: Vec<String>,
    pub courses_dir: PathBuf,
    pub descriptions_dir: PathBuf,
    pub report_path: PathBuf,
    pub tool: String,
    pub thresholds: Thresholds,
    pub on_sync_failure: SyncFailurePolicy,
    pub skip_sync: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            courses: DEFAULT_COURSES.iter().map(|c| c.to_string()).collect(),
            courses_dir: PathBuf::from(DEFAULT_COURSES_DIR),
            descriptions_dir: PathBuf::from("."),
            report_path: PathBuf::from(DEFAULT_REPORT),
            tool: DEFAULT_TOOL.to_string(),
            thresholds: Thresholds::default(),
            on_sync_failure: SyncFailurePolicy::default(),
            skip_sync: false,
        }
    }
}

impl AuditConfig {
    /// Root directory scanned for a course.
    pub fn course_root(&self, course: &str) -> PathBuf {
        self.courses_dir.join(course)
    }

    /// Description-audit file written by the sync tool for a course.
    pub fn description_path(&self, course: &str) -> PathBuf {
        self.descriptions_dir.join(format!("{}.txt", course))
    }
}
