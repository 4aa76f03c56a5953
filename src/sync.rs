//! External sync tool — pulls course content, captions, markdown and the
//! description audit onto disk before a course is scanned.

use anyhow::Result;
use std::fmt;
use std::process::Command;

/// The fixed sequence of tool subcommands run for every course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Sync,
    DownloadCaptions,
    DownloadMarkdown,
    Descriptions,
}

impl SyncStep {
    pub const ALL: [SyncStep; 4] = [
        SyncStep::Sync,
        SyncStep::DownloadCaptions,
        SyncStep::DownloadMarkdown,
        SyncStep::Descriptions,
    ];

    /// Arguments passed to the tool for this step.
    pub fn args(self, course: &str) -> Vec<String> {
        let args: &[&str] = match self {
            SyncStep::Sync => &["sync", course],
            SyncStep::DownloadCaptions => &["download", "captions", course],
            SyncStep::DownloadMarkdown => &["download", "markdown", course],
            SyncStep::Descriptions => &["utils", course, "description"],
        };
        args.iter().map(|a| a.to_string()).collect()
    }
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStep::Sync => "sync",
            SyncStep::DownloadCaptions => "download captions",
            SyncStep::DownloadMarkdown => "download markdown",
            SyncStep::Descriptions => "utils description",
        };
        f.write_str(name)
    }
}

/// Sync tool backend — run one subcommand to completion.
pub trait SyncTool {
    fn invoke(&self, args: &[String]) -> Result<()>;
}

/// Runs the tool as a child process with inherited stdio.
pub struct CommandTool {
    program: String,
}

impl CommandTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SyncTool for CommandTool {
    fn invoke(&self, args: &[String]) -> Result<()> {
        tracing::debug!(program = %self.program, ?args, "invoking sync tool");
        let status = Command::new(&self.program).args(args).status()?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

/// Outcome of one step for one course.
#[derive(Debug)]
pub struct StepOutcome {
    pub step: SyncStep,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub steps: Vec<StepOutcome>,
}

impl SyncReport {
    /// First step that failed, if any.
    pub fn first_failure(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.error.is_some())
    }
}

/// Run every sync step for a course in order. A failing step never stops the
/// remaining ones; failures are recorded and logged.
pub fn sync_course(tool: &dyn SyncTool, course: &str) -> SyncReport {
    let mut report = SyncReport::default();
    for step in SyncStep::ALL {
        let error = match tool.invoke(&step.args(course)) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(course, %step, "sync step failed: {e:#}");
                Some(format!("{e:#}"))
            }
        };
        report.steps.push(StepOutcome { step, error });
    }
    report
}
