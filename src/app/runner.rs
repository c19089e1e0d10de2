//! Main application handler

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::config::AppConfig;
use super::input::{InputCollector, InputContext, Listeners};
use super::module::{ApplicationModule, Display, ModuleContext};
use super::window::window_attributes_from_config;

/// Drives one window, its input context and the application module
pub struct App<M> {
    config: AppConfig,
    window: Option<Arc<Window>>,
    display: Display,
    // Input system; the module is the primary window listener
    input: InputContext<M>,
    collector: InputCollector,
    last_update: Option<Instant>,
    delta_time: f32,
    maximized: bool,
    started: bool,
    disposed: bool,
}

impl<M: ApplicationModule> App<M> {
    /// Creates a new application with the provided configuration
    pub fn new(config: AppConfig, module: M) -> Self {
        info!(profile = %config.profile, "Starting application");
        info!(?config.window, "Window configuration");

        let input = InputContext::new(module).with_config(&config.input);
        let collector = InputCollector::new(&config.input);
        let display = Display::from_config(&config.window);

        Self {
            config,
            window: None,
            display,
            input,
            collector,
            last_update: None,
            delta_time: 0.0,
            maximized: false,
            started: false,
            disposed: false,
        }
    }

    /// Creates a new application with configuration loaded from environment
    pub fn from_env(module: M) -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        Self::new(config, module)
    }

    /// Runs the event loop until the window closes
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    pub fn input(&self) -> &InputContext<M> {
        &self.input
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Calls into the module with a freshly built context
    fn with_module(&mut self, call: impl FnOnce(&mut M, &mut ModuleContext<'_>)) {
        let listeners: Listeners = self.input.listeners().clone();
        let (module, input) = self.input.primary_and_state();
        let mut ctx = ModuleContext {
            display: &self.display,
            input,
            listeners: &listeners,
            delta_time: self.delta_time,
        };
        call(module, &mut ctx);
    }

    fn dispose(&mut self) {
        if self.started && !self.disposed {
            self.disposed = true;
            self.with_module(|module, ctx| module.dispose(ctx));
            info!("Module disposed");
        }
    }

    /// winit has no maximize event; compare after every resize instead
    fn check_maximized(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let maximized = window.is_maximized();
        if maximized != self.maximized {
            self.maximized = maximized;
            self.input.on_window_maximize(maximized);
        }
    }
}

impl<M: ApplicationModule> ApplicationHandler for App<M> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );

                self.display.width = size.width;
                self.display.height = size.height;
                self.display.scale_factor = window.scale_factor();
                self.collector.set_scale_factor(window.scale_factor() as f32);
                self.maximized = window.is_maximized();
                self.window = Some(Arc::new(window));
                self.last_update = Some(Instant::now());

                if !self.started {
                    self.started = true;
                    self.with_module(|module, ctx| module.setup(ctx));
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        self.delta_time = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        self.with_module(|module, ctx| module.update(ctx));

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Input first, so the module sees consistent state in the calls below
        self.collector.handle_window_event(&event, &mut self.input);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                self.dispose();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.display.width = new_size.width;
                self.display.height = new_size.height;
                self.check_maximized();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.display.scale_factor = scale_factor;
                self.collector.set_scale_factor(scale_factor as f32);
            }
            WindowEvent::RedrawRequested => {
                self.with_module(|module, ctx| module.draw(ctx));
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.dispose();
    }
}
