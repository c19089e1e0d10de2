//! Input event routing and distribution

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace};

use super::error::{CodeDomain, DispatchTarget, FailureCause, InputError, ListenerFailure};
use super::events::{Categories, EventKind, RawEvent};
use super::keys::{ButtonCode, KeyCode, Modifiers};
use super::listener::{DiagnosticSink, ListenerResult, Node, PrimaryListener, TracingSink};
use super::movement::classify;
use super::registry::{Listeners, NodeRef};
use super::state::InputState;
use crate::app::config::InputConfig;

/// Central input routing for one window
///
/// Every signal is handled in three steps: the tracked state is updated, the
/// primary listener is called once, then every node registered for the
/// signal's category is called in registration order.
pub struct InputContext<W> {
    /// Primary window listener, called first for every signal
    primary: W,
    /// Held keys, buttons and cursor
    state: InputState,
    /// Subscriber registry shared with whoever registers nodes
    listeners: Listeners,
    /// Where contained listener failures are reported
    sink: Box<dyn DiagnosticSink>,
    /// Emit a trace record for every dispatched signal
    trace_dispatch: bool,
}

impl<W: PrimaryListener> InputContext<W> {
    /// Creates a new input context around the primary window listener
    pub fn new(primary: W) -> Self {
        Self {
            primary,
            state: InputState::new(),
            listeners: Listeners::new(),
            sink: Box::new(TracingSink),
            trace_dispatch: false,
        }
    }

    /// Replaces the diagnostic sink that receives listener failures
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Applies input configuration
    pub fn with_config(mut self, config: &InputConfig) -> Self {
        self.trace_dispatch = config.trace_dispatch;
        self
    }

    pub fn primary(&self) -> &W {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut W {
        &mut self.primary
    }

    /// Borrows the primary listener together with the current state
    pub fn primary_and_state(&mut self) -> (&mut W, &InputState) {
        (&mut self.primary, &self.state)
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Handle to the subscriber registry
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn register_listener(&self, node: &NodeRef, categories: Categories) -> Categories {
        self.listeners.register(node, categories)
    }

    pub fn unregister_listener(&self, node: &NodeRef, categories: Categories) -> Categories {
        self.listeners.unregister(node, categories)
    }

    pub fn cursor_x(&self) -> f32 {
        self.state.cursor_x()
    }

    pub fn cursor_y(&self) -> f32 {
        self.state.cursor_y()
    }

    pub fn button_bitmask(&self) -> u8 {
        self.state.bitmask()
    }

    /// Held state of a key by raw code
    pub fn key_held(&self, code: i32) -> Result<bool, InputError> {
        self.state.key_state(code)
    }

    /// Held state of a mouse button by raw code
    pub fn button_held(&self, code: i32) -> Result<bool, InputError> {
        self.state.button_state(code)
    }

    /// Routes one raw signal to its entry point
    pub fn dispatch(&mut self, event: RawEvent) {
        match event {
            RawEvent::KeyDown { code, mods } => self.on_key_down(code, mods),
            RawEvent::KeyUp { code, mods } => self.on_key_up(code, mods),
            RawEvent::KeyRepeat { code, mods } => self.on_key_repeat(code, mods),
            RawEvent::ButtonDown { code, mods } => self.on_button_down(code, mods),
            RawEvent::ButtonUp { code, mods } => self.on_button_up(code, mods),
            RawEvent::CursorMove { x, y } => self.on_cursor_move(x, y),
            RawEvent::Scroll { dx, dy } => self.on_scroll(dx, dy),
            RawEvent::CursorEnter => self.on_cursor_enter(),
            RawEvent::CursorExit => self.on_cursor_exit(),
            RawEvent::WindowResize { width, height } => self.on_window_resize(width, height),
            RawEvent::WindowMove { x, y } => self.on_window_move(x, y),
            RawEvent::WindowFocus(focused) => self.on_window_focus(focused),
            RawEvent::WindowIconify(iconified) => self.on_window_iconify(iconified),
            RawEvent::WindowMaximize(maximized) => self.on_window_maximize(maximized),
            RawEvent::WindowClose => self.on_window_close(),
        }
    }

    pub fn on_key_down(&mut self, code: i32, mods: i32) {
        self.key_down(KeyCode::from_raw(code), Modifiers::from_raw(mods));
    }

    pub fn on_key_up(&mut self, code: i32, mods: i32) {
        self.key_up(KeyCode::from_raw(code), Modifiers::from_raw(mods));
    }

    pub fn on_key_repeat(&mut self, code: i32, mods: i32) {
        self.key_repeat(KeyCode::from_raw(code), Modifiers::from_raw(mods));
    }

    pub fn on_button_down(&mut self, code: i32, mods: i32) {
        self.button_down(ButtonCode::from_raw(code), Modifiers::from_raw(mods));
    }

    pub fn on_button_up(&mut self, code: i32, mods: i32) {
        self.button_up(ButtonCode::from_raw(code), Modifiers::from_raw(mods));
    }

    pub fn on_cursor_move(&mut self, x: f32, y: f32) {
        let movement = classify(&mut self.state, x, y);
        let (dx, dy) = (movement.dx, movement.dy);

        if movement.is_drag {
            self.fan_out(
                EventKind::CursorDrag,
                |w, s| w.mouse_dragged(dx, dy, s),
                |n, s| n.mouse_listener().map(|l| l.mouse_dragged(dx, dy, s)),
            );
        } else {
            self.fan_out(
                EventKind::CursorMove,
                |w, s| w.mouse_moved(dx, dy, s),
                |n, s| n.mouse_listener().map(|l| l.mouse_moved(dx, dy, s)),
            );
        }
    }

    pub fn on_scroll(&mut self, dx: f32, dy: f32) {
        self.fan_out(
            EventKind::Scroll,
            |w, s| w.mouse_scrolled(dx, dy, s),
            |n, s| n.mouse_listener().map(|l| l.mouse_scrolled(dx, dy, s)),
        );
    }

    pub fn on_cursor_enter(&mut self) {
        self.fan_out(
            EventKind::CursorEnter,
            |w, s| w.mouse_entered(s),
            |n, s| n.mouse_listener().map(|l| l.mouse_entered(s)),
        );
    }

    pub fn on_cursor_exit(&mut self) {
        self.fan_out(
            EventKind::CursorExit,
            |w, s| w.mouse_exited(s),
            |n, s| n.mouse_listener().map(|l| l.mouse_exited(s)),
        );
    }

    pub fn on_window_resize(&mut self, width: i32, height: i32) {
        self.fan_out(
            EventKind::WindowResize,
            |w, s| w.window_resized(width, height, s),
            |n, s| n.window_listener().map(|l| l.window_resized(width, height, s)),
        );
    }

    pub fn on_window_move(&mut self, x: i32, y: i32) {
        self.fan_out(
            EventKind::WindowMove,
            |w, s| w.window_moved(x, y, s),
            |n, s| n.window_listener().map(|l| l.window_moved(x, y, s)),
        );
    }

    pub fn on_window_focus(&mut self, focused: bool) {
        self.fan_out(
            EventKind::WindowFocus,
            |w, s| w.window_focus(focused, s),
            |n, s| n.window_listener().map(|l| l.window_focus(focused, s)),
        );
    }

    pub fn on_window_iconify(&mut self, iconified: bool) {
        self.fan_out(
            EventKind::WindowIconify,
            |w, s| w.window_iconify(iconified, s),
            |n, s| n.window_listener().map(|l| l.window_iconify(iconified, s)),
        );
    }

    pub fn on_window_maximize(&mut self, maximized: bool) {
        self.fan_out(
            EventKind::WindowMaximize,
            |w, s| w.window_maximize(maximized, s),
            |n, s| n.window_listener().map(|l| l.window_maximize(maximized, s)),
        );
    }

    pub fn on_window_close(&mut self) {
        self.fan_out(
            EventKind::WindowClose,
            |w, s| w.window_closed(s),
            |n, s| n.window_listener().map(|l| l.window_closed(s)),
        );
    }

    /// Untracked keys leave the state alone but are still delivered
    pub fn key_down(&mut self, key: impl Into<KeyCode>, mods: Modifiers) {
        let key = key.into();
        self.state.set_modifiers(mods);
        match key.key() {
            Some(tracked) => self.state.set_key_down(tracked),
            None => untracked(CodeDomain::Key, key.code(), EventKind::KeyDown),
        }
        self.fan_out(
            EventKind::KeyDown,
            |w, s| w.key_down(key, mods, s),
            |n, s| n.key_listener().map(|l| l.key_down(key, mods, s)),
        );
    }

    pub fn key_up(&mut self, key: impl Into<KeyCode>, mods: Modifiers) {
        let key = key.into();
        self.state.set_modifiers(mods);
        match key.key() {
            Some(tracked) => self.state.set_key_up(tracked),
            None => untracked(CodeDomain::Key, key.code(), EventKind::KeyUp),
        }
        self.fan_out(
            EventKind::KeyUp,
            |w, s| w.key_up(key, mods, s),
            |n, s| n.key_listener().map(|l| l.key_up(key, mods, s)),
        );
    }

    /// A repeat implies the key is held, even if its press was missed
    pub fn key_repeat(&mut self, key: impl Into<KeyCode>, mods: Modifiers) {
        let key = key.into();
        self.state.set_modifiers(mods);
        match key.key() {
            Some(tracked) => self.state.set_key_down(tracked),
            None => untracked(CodeDomain::Key, key.code(), EventKind::KeyRepeat),
        }
        self.fan_out(
            EventKind::KeyRepeat,
            |w, s| w.key_repeat(key, mods, s),
            |n, s| n.key_listener().map(|l| l.key_repeat(key, mods, s)),
        );
    }

    pub fn button_down(&mut self, button: impl Into<ButtonCode>, mods: Modifiers) {
        let button = button.into();
        self.state.set_modifiers(mods);
        match button.button() {
            Some(tracked) => self.state.set_button_down(tracked),
            None => untracked(CodeDomain::Button, button.code(), EventKind::ButtonDown),
        }
        self.fan_out(
            EventKind::ButtonDown,
            |w, s| w.mouse_pressed(button, mods, s),
            |n, s| n.mouse_listener().map(|l| l.mouse_pressed(button, mods, s)),
        );
    }

    pub fn button_up(&mut self, button: impl Into<ButtonCode>, mods: Modifiers) {
        let button = button.into();
        self.state.set_modifiers(mods);
        match button.button() {
            Some(tracked) => self.state.set_button_up(tracked),
            None => untracked(CodeDomain::Button, button.code(), EventKind::ButtonUp),
        }
        self.fan_out(
            EventKind::ButtonUp,
            |w, s| w.mouse_released(button, mods, s),
            |n, s| n.mouse_listener().map(|l| l.mouse_released(button, mods, s)),
        );
    }

    /// Delivers one event to the primary listener, then to the subscribers
    ///
    /// The subscriber list is copied before the first node runs. A failing
    /// listener is reported to the sink and does not stop the fan-out.
    fn fan_out<P, N>(&mut self, event: EventKind, primary: P, node: N)
    where
        P: FnOnce(&mut W, &InputState) -> ListenerResult,
        N: Fn(&mut dyn Node, &InputState) -> Option<ListenerResult>,
    {
        if self.trace_dispatch {
            trace!(?event, cursor = ?self.state.cursor(), buttons = self.state.bitmask(), "Dispatching");
        }

        let state = &self.state;
        let primary_listener = &mut self.primary;
        if let Err(cause) = guarded(|| primary(primary_listener, state)) {
            report(self.sink.as_ref(), event, DispatchTarget::Primary, cause);
        }

        let mut dropped = 0;
        for (id, slot) in self.listeners.snapshot(event.category()) {
            let Some(cell) = slot.upgrade() else {
                dropped += 1;
                continue;
            };
            let Ok(mut target) = cell.try_borrow_mut() else {
                report(self.sink.as_ref(), event, DispatchTarget::Node(id), FailureCause::Busy);
                continue;
            };
            let outcome = guarded(|| node(&mut *target, &self.state).unwrap_or(Ok(())));
            if let Err(cause) = outcome {
                report(self.sink.as_ref(), event, DispatchTarget::Node(id), cause);
            }
        }

        if dropped > 0 {
            debug!(?event, dropped, "Skipped listeners that no longer exist");
            self.listeners.prune();
        }
    }
}

fn untracked(domain: CodeDomain, code: i32, event: EventKind) {
    debug!(%domain, code, ?event, "Untracked code, state left unchanged");
}

/// Runs one listener callback, turning errors and panics into a failure cause
fn guarded(call: impl FnOnce() -> ListenerResult) -> Result<(), FailureCause> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(FailureCause::Returned(error)),
        Err(payload) => Err(FailureCause::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn report(sink: &dyn DiagnosticSink, event: EventKind, target: DispatchTarget, cause: FailureCause) {
    sink.listener_failed(&ListenerFailure {
        event,
        target,
        cause,
    });
}
