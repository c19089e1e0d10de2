//! Window creation from configuration

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use super::config::WindowConfig;

/// Smallest logical size a window is created or resized to
pub const MIN_WINDOW_SIZE: LogicalSize<f64> = LogicalSize::new(64.0, 64.0);

/// Logical inner size for `config`, raised to [`MIN_WINDOW_SIZE`]
pub fn inner_size(config: &WindowConfig) -> LogicalSize<f64> {
    LogicalSize::new(
        config.width.max(MIN_WINDOW_SIZE.width),
        config.height.max(MIN_WINDOW_SIZE.height),
    )
}

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let fullscreen = config.fullscreen.then_some(Fullscreen::Borderless(None));

    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(inner_size(config))
        .with_min_inner_size(MIN_WINDOW_SIZE)
        .with_resizable(config.resizable)
        .with_decorations(config.decorated)
        .with_fullscreen(fullscreen)
}
