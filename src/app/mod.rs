//! Application module
//!
//! Handles windowing, user input and the module lifecycle.

pub mod config;
pub mod input;
pub mod logging;
pub mod module;
mod runner;
mod window;

pub use config::{AppConfig, InputConfig, LoggingConfig, WindowConfig};
pub use module::{ApplicationModule, Display, ModuleContext};
pub use runner::App;
pub use window::window_attributes_from_config;
