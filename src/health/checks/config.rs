//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, Findings, SystemCheck};

/// Checks that every profile loads and carries usable values
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Checks the `debug` and `release` profiles
    pub fn new() -> Self {
        Self::with_profiles(vec!["debug", "release"])
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }

    fn check_profile(findings: &mut Findings, config: &AppConfig) {
        let window = &config.window;
        if window.width <= 0.0 || window.height <= 0.0 {
            findings.fail(format!(
                "Profile '{}': window size {}x{} is not positive",
                config.profile, window.width, window.height
            ));
        } else if config.input.scroll_line_pixels <= 0.0 {
            findings.warn(format!(
                "Profile '{}': scroll_line_pixels {} disables line scrolling",
                config.profile, config.input.scroll_line_pixels
            ));
        } else {
            findings.ok(format!(
                "Profile '{}': window {}x{}, log filter '{}'",
                config.profile, window.width, window.height, config.logging.filter
            ));
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        // A missing profile file is survivable: the app runs on defaults
        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => Self::check_profile(&mut findings, &config),
                Err(e) => {
                    findings.warn(format!("Profile '{profile}': {e}, defaults would be used"));
                    Self::check_profile(&mut findings, &AppConfig::fallback(profile));
                }
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => findings.ok(format!("Environment selects profile '{}'", config.profile)),
            Err(e) => findings.warn(format!("Environment config: {e}")),
        }

        let count = self.profiles.len();
        findings.finish(
            &format!("{count} profiles validated"),
            "Config loaded with warnings",
            "Invalid configuration values",
        )
    }
}
