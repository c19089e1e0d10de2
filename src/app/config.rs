//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "jx3d".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
        }
    }
}

/// Input routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pixels per scroll line for line-based wheel deltas
    pub scroll_line_pixels: f32,
    /// Emit a trace record for every dispatched signal
    pub trace_dispatch: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scroll_line_pixels: 20.0,
            trace_dispatch: false,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset (e.g. "jx3d=debug")
    pub filter: String,
    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            with_target: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_INPUT__TRACE_DISPATCH=true)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir();

        let mut builder = Config::builder();

        if let Some(ref dir) = config_dir {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<std::path::PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = std::path::PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in configuration used when no profile can be loaded
    pub fn fallback(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            input: InputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::fallback("release"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_section_defaults() {
        let config = AppConfig::fallback("debug");
        assert_eq!(config.profile, "debug");
        assert_eq!(config.input.scroll_line_pixels, 20.0);
        assert!(!config.input.trace_dispatch);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_missing_sections_deserialize_to_defaults() {
        let config = Config::builder()
            .set_override("profile", "test")
            .and_then(|b| b.set_override("window.title", "t"))
            .and_then(|b| b.set_override("window.width", 640.0))
            .and_then(|b| b.set_override("window.height", 480.0))
            .and_then(|b| b.set_override("window.fullscreen", false))
            .and_then(|b| b.set_override("window.resizable", true))
            .and_then(|b| b.set_override("window.decorated", true))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize::<AppConfig>())
            .expect("config should deserialize");

        assert_eq!(config.window.width, 640.0);
        assert_eq!(config.input.scroll_line_pixels, 20.0);
        assert_eq!(config.logging.filter, "info");
    }
}
