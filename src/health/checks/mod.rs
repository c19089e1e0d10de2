//! Built-in health checks

pub mod build_info;
pub mod config;
pub mod fan_out;
pub mod input_state;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use fan_out::FanOutCheck;
pub use input_state::InputStateCheck;
