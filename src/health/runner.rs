//! Runs health checks and tallies their results

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Result of one check, tagged with the system it covers
#[derive(Debug)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub result: CheckResult,
}

/// Results from running a health check suite
#[derive(Debug, Default)]
pub struct HealthCheckReport {
    pub outcomes: Vec<CheckOutcome>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    /// No failures; warnings are allowed
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else if self.warned > 0 {
            2
        } else {
            0
        }
    }

    pub fn outcome(&self, name: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    fn push(&mut self, outcome: CheckOutcome) {
        match outcome.result.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warn => self.warned += 1,
            CheckStatus::Fail => self.failed += 1,
        }
        self.total += 1;
        self.outcomes.push(outcome);
    }
}

/// Runs checks in the order they were added
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn run(self) -> HealthCheckReport {
        let mut report = HealthCheckReport::default();

        for check in self.checks {
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());

            if result.status.is_fail() {
                warn!(check = check.name(), message = %result.message, "Health check failed");
            } else {
                debug!(check = check.name(), status = result.status.label(), "Health check finished");
            }

            report.push(CheckOutcome {
                name: check.name(),
                description: check.description(),
                result,
            });
        }

        report
    }
}
