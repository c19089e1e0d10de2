//! Health check system for validating configuration, build metadata and the
//! input router without opening a window
//!
//! Useful for:
//! - CI health checks (`jx3d-health` exits 0 on pass, 1 on failure, 2 on warnings)
//! - Debugging configuration problems
//! - Confirming input routing behaves on the current platform
//!
//! # Example
//!
//! ```no_run
//! use jx3d::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(InputStateCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, Findings, SystemCheck};
pub use reporter::{format_details, format_report, print_report};
pub use runner::{CheckOutcome, HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::InputStateCheck::new())
        .add_check(checks::FanOutCheck::new())
        .run()
}
