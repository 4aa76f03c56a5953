mod audit;
mod config;
mod report;
mod scan;
mod sync;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{AuditConfig, SyncFailurePolicy, Thresholds};

#[derive(Parser)]
#[command(
    name = "course-audit",
    version,
    about = "Audit course content for missing captions, lessons and descriptions"
)]
struct Cli {
    /// Courses to audit (defaults to the built-in course list)
    courses: Vec<String>,
    /// Directory holding one subdirectory per course
    #[arg(long, default_value = config::DEFAULT_COURSES_DIR)]
    courses_dir: PathBuf,
    /// Directory holding the per-course description audits (`<course>.txt`)
    #[arg(long, default_value = ".")]
    descriptions_dir: PathBuf,
    /// Report file, appended to on every run
    #[arg(long, default_value = config::DEFAULT_REPORT)]
    report: PathBuf,
    /// Sync tool executable
    #[arg(long, default_value = config::DEFAULT_TOOL)]
    tool: String,
    /// Audit what is on disk without running the sync tool
    #[arg(long)]
    skip_sync: bool,
    /// What to do with a course when a sync step fails
    #[arg(long, value_enum, default_value_t = SyncFailurePolicy::Continue)]
    on_sync_failure: SyncFailurePolicy,
    /// Minimum caption files per lesson directory
    #[arg(long, default_value_t = Thresholds::default().min_captions)]
    min_captions: usize,
    /// Minimum lesson files per lesson directory
    #[arg(long, default_value_t = Thresholds::default().min_lessons)]
    min_lessons: usize,
    /// Depth of lesson directories below the course root
    #[arg(long, default_value_t = Thresholds::default().lesson_depth)]
    lesson_depth: usize,
}

impl Cli {
    fn into_config(self) -> AuditConfig {
        let defaults = AuditConfig::default();
        AuditConfig {
            courses: if self.courses.is_empty() {
                defaults.courses
            } else {
                self.courses
            },
            courses_dir: self.courses_dir,
            descriptions_dir: self.descriptions_dir,
            report_path: self.report,
            tool: self.tool,
            thresholds: Thresholds {
                min_captions: self.min_captions,
                min_lessons: self.min_lessons,
                lesson_depth: self.lesson_depth,
            },
            on_sync_failure: self.on_sync_failure,
            skip_sync: self.skip_sync,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Cli::parse().into_config();

    let tool = sync::CommandTool::new(config.tool.clone());
    let mut report = report::ReportWriter::open(&config.report_path)?;
    let mut stdout = std::io::stdout().lock();

    let outcomes = audit::Auditor::new(&config, &tool).audit(
        &config.courses,
        &mut report,
        &mut stdout,
    )?;

    for outcome in &outcomes {
        let sync_failures = outcome
            .sync
            .steps
            .iter()
            .filter(|s| s.error.is_some())
            .count();
        let descriptions = match &outcome.descriptions {
            audit::DescriptionStatus::Missing(list) => list.lines().count(),
            audit::DescriptionStatus::NoneMissing | audit::DescriptionStatus::Unavailable => 0,
        };
        tracing::info!(
            course = %outcome.course,
            flagged = outcome.findings.len(),
            descriptions,
            sync_failures,
            skipped = outcome.skipped,
            "course audited"
        );
    }
    tracing::info!(
        courses = outcomes.len(),
        report = %report.path().display(),
        "audit complete"
    );
    Ok(())
}
