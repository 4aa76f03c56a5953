//! Course audit — sync, scan, and fold description findings into the report.

use anyhow::Result;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{AuditConfig, SyncFailurePolicy, Thresholds};
use crate::report::ReportWriter;
use crate::scan::{self, DirRecord};
use crate::sync::{self, SyncReport, SyncTool};

pub const NOTHING_MISSING: &str = "No missing captions or lessons found.";
pub const NO_DESCRIPTIONS_MISSING: &str = "No missing descriptions found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    Captions,
    Lessons,
}

/// A lesson directory that fell below one threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub dir: PathBuf,
    pub kind: FindingKind,
    pub count: usize,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            FindingKind::Captions => "Captions",
            FindingKind::Lessons => "Lessons",
        };
        write!(f, "{} {}: {}", self.dir.display(), label, self.count)
    }
}

/// Findings for one scanned directory. Only directories at the lesson depth
/// are evaluated; captions are checked before lessons.
pub fn evaluate(record: &DirRecord, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = Vec::new();
    if record.depth != thresholds.lesson_depth {
        return findings;
    }
    if record.captions < thresholds.min_captions {
        findings.push(Finding {
            dir: record.path.clone(),
            kind: FindingKind::Captions,
            count: record.captions,
        });
    }
    if record.lessons < thresholds.min_lessons {
        findings.push(Finding {
            dir: record.path.clone(),
            kind: FindingKind::Lessons,
            count: record.lessons,
        });
    }
    findings
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionStatus {
    /// The description audit listed missing descriptions.
    Missing(String),
    /// The description audit exists and is empty.
    NoneMissing,
    /// No readable description audit for the course.
    Unavailable,
}

#[derive(Debug)]
pub struct CourseOutcome {
    pub course: String,
    pub findings: Vec<Finding>,
    pub descriptions: DescriptionStatus,
    pub sync: SyncReport,
    /// Set when a sync failure stopped the course under `SkipCourse`.
    pub skipped: bool,
}

pub struct Auditor<'a> {
    config: &'a AuditConfig,
    tool: &'a dyn SyncTool,
}

impl<'a> Auditor<'a> {
    pub fn new(config: &'a AuditConfig, tool: &'a dyn SyncTool) -> Self {
        Self { config, tool }
    }

    /// Audit every course in order, appending to `report` and echoing
    /// findings to `out`. Only report write failures abort the run.
    pub fn audit(
        &self,
        courses: &[String],
        report: &mut ReportWriter,
        out: &mut dyn Write,
    ) -> Result<Vec<CourseOutcome>> {
        let mut outcomes = Vec::with_capacity(courses.len());
        for course in courses {
            outcomes.push(self.audit_course(course, report, out)?);
        }
        Ok(outcomes)
    }

    pub fn audit_course(
        &self,
        course: &str,
        report: &mut ReportWriter,
        out: &mut dyn Write,
    ) -> Result<CourseOutcome> {
        let sync = if self.config.skip_sync {
            SyncReport::default()
        } else {
            sync::sync_course(self.tool, course)
        };

        report.append_line(&course.to_uppercase())?;

        if self.config.on_sync_failure == SyncFailurePolicy::SkipCourse {
            if let Some(failed) = sync.first_failure() {
                let line = format!("Sync failed ({}); audit skipped.", failed.step);
                report.append_line(&line)?;
                writeln!(out, "{line}")?;
                return Ok(CourseOutcome {
                    course: course.to_string(),
                    findings: Vec::new(),
                    descriptions: DescriptionStatus::Unavailable,
                    sync,
                    skipped: true,
                });
            }
        }

        let root = self.config.course_root(course);
        let records = scan::scan(&root);
        tracing::debug!(course, directories = records.len(), "scanned course tree");

        let mut findings = Vec::new();
        for record in &records {
            for finding in evaluate(record, &self.config.thresholds) {
                let line = finding.to_string();
                report.append_line(&line)?;
                writeln!(out, "{line}")?;
                findings.push(finding);
            }
        }

        if findings.is_empty() {
            report.append_line(NOTHING_MISSING)?;
            writeln!(out, "{NOTHING_MISSING}")?;
        }

        let descriptions = self.fold_descriptions(course, report, out)?;

        Ok(CourseOutcome {
            course: course.to_string(),
            findings,
            descriptions,
            sync,
            skipped: false,
        })
    }

    fn fold_descriptions(
        &self,
        course: &str,
        report: &mut ReportWriter,
        out: &mut dyn Write,
    ) -> Result<DescriptionStatus> {
        let path = self.config.description_path(course);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(path = %path.display(), "no description audit: {e}");
                writeln!(out, "\n{NO_DESCRIPTIONS_MISSING}\n")?;
                return Ok(DescriptionStatus::Unavailable);
            }
        };

        if content.is_empty() {
            report.append(&format!("{NO_DESCRIPTIONS_MISSING}\n\n"))?;
            return Ok(DescriptionStatus::NoneMissing);
        }

        report.append(&format!("\nMISSING DESCRIPTIONS:\n{content}\n\n"))?;
        writeln!(out, "{content}")?;
        Ok(DescriptionStatus::Missing(content))
    }
}
