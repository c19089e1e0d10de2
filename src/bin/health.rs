//! Runs the built-in health checks and exits with the report's status code

use jx3d::app::{AppConfig, logging};
use jx3d::health;
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load config ({e}), using defaults");
        AppConfig::fallback("release")
    });
    logging::init(&config.logging)?;

    let report = health::run_all_checks();
    health::print_report(&report);

    if !report.is_healthy() {
        warn!(failed = report.failed, "Health checks failed");
    }
    std::process::exit(report.exit_code());
}
