//! Opens a window and logs what the input layer delivers
//!
//! The module itself is the primary listener. Two subscriber nodes show
//! registration: an orbit camera driven by mouse drags and a hotkey node that
//! toggles the camera's mouse subscription with `Tab`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use jx3d::app::input::{
    ButtonCode, Categories, InputState, Key, KeyCode, KeyListener, ListenerResult, Listeners,
    Modifiers, MouseButton, MouseListener, Node, NodeRef, WindowListener,
};
use jx3d::app::{App, AppConfig, ApplicationModule, ModuleContext, logging};
use tracing::{debug, info};

/// Degrees of rotation per pixel dragged
const ORBIT_SENSITIVITY: f32 = 0.25;

#[derive(Default)]
struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl MouseListener for OrbitCamera {
    fn mouse_dragged(&mut self, dx: f32, dy: f32, input: &InputState) -> ListenerResult {
        if input.button_held(MouseButton::Left) {
            self.yaw = (self.yaw + dx * ORBIT_SENSITIVITY).rem_euclid(360.0);
            self.pitch = (self.pitch - dy * ORBIT_SENSITIVITY).clamp(-89.0, 89.0);
        }
        Ok(())
    }

    fn mouse_scrolled(&mut self, _dx: f32, dy: f32, _input: &InputState) -> ListenerResult {
        self.distance = (self.distance - dy * 0.01).max(1.0);
        Ok(())
    }
}

impl Node for OrbitCamera {
    fn mouse_listener(&mut self) -> Option<&mut dyn MouseListener> {
        Some(self)
    }
}

/// Toggles the camera's mouse subscription from inside a key callback
struct Hotkeys {
    listeners: Listeners,
    camera: Weak<RefCell<OrbitCamera>>,
}

impl KeyListener for Hotkeys {
    fn key_down(&mut self, key: KeyCode, _mods: Modifiers, _input: &InputState) -> ListenerResult {
        if key != Key::Tab {
            return Ok(());
        }
        let Some(camera) = self.camera.upgrade() else {
            return Ok(());
        };
        let camera: NodeRef = camera;
        if self.listeners.unregister(&camera, Categories::MOUSE).is_empty() {
            self.listeners.register(&camera, Categories::MOUSE);
            info!("Camera follows the mouse");
        } else {
            info!("Camera detached from the mouse");
        }
        Ok(())
    }
}

impl Node for Hotkeys {
    fn key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        Some(self)
    }
}

#[derive(Default)]
struct DemoModule {
    camera: Option<Rc<RefCell<OrbitCamera>>>,
    hotkeys: Option<NodeRef>,
    velocity: Vec2,
    elapsed: f32,
}

impl KeyListener for DemoModule {
    fn key_down(&mut self, key: KeyCode, mods: Modifiers, _input: &InputState) -> ListenerResult {
        debug!(?key, ?mods, "Key pressed");
        Ok(())
    }
}

impl MouseListener for DemoModule {
    fn mouse_pressed(
        &mut self,
        button: ButtonCode,
        _mods: Modifiers,
        input: &InputState,
    ) -> ListenerResult {
        debug!(?button, cursor = ?input.cursor(), mask = input.bitmask(), "Button pressed");
        Ok(())
    }
}

impl WindowListener for DemoModule {
    fn window_resized(&mut self, width: i32, height: i32, _input: &InputState) -> ListenerResult {
        info!(width, height, "Window resized");
        Ok(())
    }

    fn window_focus(&mut self, focused: bool, _input: &InputState) -> ListenerResult {
        info!(focused, "Focus changed");
        Ok(())
    }
}

impl ApplicationModule for DemoModule {
    fn setup(&mut self, ctx: &mut ModuleContext<'_>) {
        let camera = Rc::new(RefCell::new(OrbitCamera {
            distance: 10.0,
            ..OrbitCamera::default()
        }));
        let camera_node: NodeRef = camera.clone();
        ctx.listeners.register(&camera_node, Categories::MOUSE);

        let hotkeys: NodeRef = Rc::new(RefCell::new(Hotkeys {
            listeners: ctx.listeners.clone(),
            camera: Rc::downgrade(&camera),
        }));
        ctx.listeners.register(&hotkeys, Categories::KEY);

        info!(
            width = ctx.display.width,
            height = ctx.display.height,
            "Demo ready: drag with the left button to orbit, Tab toggles the camera"
        );
        self.camera = Some(camera);
        self.hotkeys = Some(hotkeys);
    }

    fn update(&mut self, ctx: &mut ModuleContext<'_>) {
        let axis = |negative: Key, positive: Key| {
            ctx.input.key_held(positive) as i32 as f32 - ctx.input.key_held(negative) as i32 as f32
        };
        self.velocity = Vec2::new(axis(Key::A, Key::D), axis(Key::S, Key::W));

        self.elapsed += ctx.delta_time;
        if self.elapsed >= 1.0 {
            self.elapsed = 0.0;
            if let Some(camera) = &self.camera {
                let camera = camera.borrow();
                debug!(
                    yaw = camera.yaw,
                    pitch = camera.pitch,
                    distance = camera.distance,
                    velocity = ?self.velocity,
                    "Camera"
                );
            }
        }
    }

    fn dispose(&mut self, ctx: &mut ModuleContext<'_>) {
        if let Some(hotkeys) = self.hotkeys.take() {
            ctx.listeners.unregister(&hotkeys, Categories::all());
        }
        if let Some(camera) = self.camera.take() {
            let camera: NodeRef = camera;
            ctx.listeners.unregister(&camera, Categories::all());
        }
        info!("Demo disposed");
    }
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load config ({e}), using defaults");
        AppConfig::fallback("release")
    });
    logging::init(&config.logging)?;

    App::new(config, DemoModule::default()).run()
}
