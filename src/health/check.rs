//! Core health check trait and types

use std::time::Duration;

use colored::Colorize;

/// Status of a system check, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

impl CheckStatus {
    /// Pass or Warn
    pub fn is_ok(&self) -> bool {
        !self.is_fail()
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        match self {
            CheckStatus::Pass => self.label().green().to_string(),
            CheckStatus::Warn => self.label().yellow().to_string(),
            CheckStatus::Fail => self.label().red().to_string(),
        }
    }
}

/// Result of a system check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One-line summary shown in the report table
    pub message: String,
    /// Individual findings, printed below the table
    pub details: Vec<String>,
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    /// Appends finding lines
    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details.extend(details.into_iter().map(Into::into));
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Collects findings while a check runs and turns them into a result
///
/// The final status is the worst status recorded.
#[derive(Debug, Default)]
pub struct Findings {
    status: Option<CheckStatus>,
    lines: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, status: CheckStatus, marker: &str, line: String) {
        self.status = Some(self.status.map_or(status, |current| current.max(status)));
        self.lines.push(format!("  {marker} {line}"));
    }

    pub fn ok(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Pass, "✓", line.into());
    }

    pub fn warn(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Warn, "⚠", line.into());
    }

    pub fn fail(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Fail, "✗", line.into());
    }

    /// Records `line` as passed when `condition` holds, failed otherwise
    pub fn require(&mut self, condition: bool, line: impl Into<String>) {
        if condition {
            self.ok(line);
        } else {
            self.fail(line);
        }
    }

    pub fn status(&self) -> CheckStatus {
        self.status.unwrap_or(CheckStatus::Pass)
    }

    /// Picks the summary message matching the worst status
    pub fn finish(self, pass: &str, warn: &str, fail: &str) -> CheckResult {
        let result = match self.status() {
            CheckStatus::Pass => CheckResult::pass(pass),
            CheckStatus::Warn => CheckResult::warn(warn),
            CheckStatus::Fail => CheckResult::fail(fail),
        };
        result.with_details(self.lines)
    }
}

/// Trait for system health checks
pub trait SystemCheck {
    /// Name of the system being checked
    fn name(&self) -> &'static str;

    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}
