//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, Findings, SystemCheck};

/// Reports build metadata; missing git metadata is a warning
#[derive(Default)]
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        match (build_info::GIT_BRANCH, build_info::GIT_SHA) {
            (Some(branch), Some(_)) => findings.ok(format!(
                "Git: {branch}@{} (dirty: {})",
                build_info::git_sha_short(),
                build_info::is_git_dirty()
            )),
            _ => findings.warn("Git: built outside a git checkout"),
        }

        findings.require(
            !build_info::BUILD_TIMESTAMP.is_empty(),
            format!("Build time: {}", build_info::BUILD_TIMESTAMP),
        );
        findings.ok(format!(
            "Rustc: {} ({})",
            build_info::RUSTC_SEMVER,
            build_info::RUSTC_CHANNEL
        ));
        findings.ok(format!("Version: {}", build_info::version_string()));

        findings.finish(
            "Build metadata accessible",
            "Build metadata incomplete",
            "Build metadata missing",
        )
    }
}
