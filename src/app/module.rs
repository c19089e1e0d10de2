//! Application modules and the context they run in
//!
//! A module is the primary window listener of its input context and gets an
//! explicit [`ModuleContext`] for every lifecycle call instead of holding
//! handles to the display or the input system itself.

use super::config::WindowConfig;
use super::input::{InputState, Listeners, PrimaryListener};

/// What the module can know about the window it lives in
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    pub title: String,
    /// Inner width in physical pixels
    pub width: u32,
    /// Inner height in physical pixels
    pub height: u32,
    pub scale_factor: f64,
}

impl Display {
    /// Display description before the window exists
    pub fn from_config(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width.max(0.0).round() as u32,
            height: config.height.max(0.0).round() as u32,
            scale_factor: 1.0,
        }
    }

    /// Width divided by height, or 1.0 for a degenerate window
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Everything a module may touch during one lifecycle call
pub struct ModuleContext<'a> {
    pub display: &'a Display,
    pub input: &'a InputState,
    /// Registry handle for adding and removing subscriber nodes
    pub listeners: &'a Listeners,
    /// Seconds since the previous update
    pub delta_time: f32,
}

/// Lifecycle of an application built on one window
///
/// All methods default to no-ops so a module only implements what it needs.
pub trait ApplicationModule: PrimaryListener {
    /// Called once, after the window exists and before the first update
    fn setup(&mut self, _ctx: &mut ModuleContext<'_>) {}

    /// Called once per loop iteration
    fn update(&mut self, _ctx: &mut ModuleContext<'_>) {}

    /// Called when the window needs a new frame
    fn draw(&mut self, _ctx: &mut ModuleContext<'_>) {}

    /// Called once before the application exits
    fn dispose(&mut self, _ctx: &mut ModuleContext<'_>) {}
}
