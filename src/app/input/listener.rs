//! Listener capabilities for the primary window listener and subscriber nodes

use tracing::warn;

use super::error::ListenerFailure;
use super::keys::{ButtonCode, KeyCode, Modifiers};
use super::state::InputState;

/// Result of a listener callback; errors are contained by the dispatcher
pub type ListenerResult = anyhow::Result<()>;

/// Keyboard callbacks
///
/// Every callback gets the input state as it stands after the event was
/// applied, so `input.key_held(key)` is already true inside `key_down`.
/// Keys without a [`Key`](super::keys::Key) arrive as [`KeyCode::Raw`] and are
/// never held.
pub trait KeyListener {
    fn key_down(&mut self, _key: KeyCode, _mods: Modifiers, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn key_up(&mut self, _key: KeyCode, _mods: Modifiers, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    /// Auto-repeat of a held key
    ///
    /// Listeners that do not override this see repeats as additional presses.
    fn key_repeat(&mut self, key: KeyCode, mods: Modifiers, input: &InputState) -> ListenerResult {
        self.key_down(key, mods, input)
    }
}

/// Mouse callbacks
pub trait MouseListener {
    fn mouse_pressed(
        &mut self,
        _button: ButtonCode,
        _mods: Modifiers,
        _input: &InputState,
    ) -> ListenerResult {
        Ok(())
    }

    fn mouse_released(
        &mut self,
        _button: ButtonCode,
        _mods: Modifiers,
        _input: &InputState,
    ) -> ListenerResult {
        Ok(())
    }

    /// Cursor moved with no button held
    fn mouse_moved(&mut self, _dx: f32, _dy: f32, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    /// Cursor moved with at least one button held
    fn mouse_dragged(&mut self, _dx: f32, _dy: f32, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn mouse_scrolled(&mut self, _dx: f32, _dy: f32, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn mouse_entered(&mut self, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn mouse_exited(&mut self, _input: &InputState) -> ListenerResult {
        Ok(())
    }
}

/// Window callbacks
pub trait WindowListener {
    fn window_resized(&mut self, _width: i32, _height: i32, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn window_moved(&mut self, _x: i32, _y: i32, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn window_focus(&mut self, _focused: bool, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn window_iconify(&mut self, _iconified: bool, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn window_maximize(&mut self, _maximized: bool, _input: &InputState) -> ListenerResult {
        Ok(())
    }

    fn window_closed(&mut self, _input: &InputState) -> ListenerResult {
        Ok(())
    }
}

/// The mandatory recipient of every event, ahead of any subscriber
pub trait PrimaryListener: KeyListener + MouseListener + WindowListener {}

impl<T: KeyListener + MouseListener + WindowListener> PrimaryListener for T {}

/// A subscriber registered with the listener registry
///
/// A node only receives callbacks for the categories it registered for, and
/// only when it exposes the matching capability.
pub trait Node {
    fn key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        None
    }

    fn mouse_listener(&mut self) -> Option<&mut dyn MouseListener> {
        None
    }

    fn window_listener(&mut self) -> Option<&mut dyn WindowListener> {
        None
    }
}

/// Receives listener failures contained during fan-out
pub trait DiagnosticSink {
    fn listener_failed(&self, failure: &ListenerFailure);
}

/// Default sink, logs failures as warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn listener_failed(&self, failure: &ListenerFailure) {
        warn!(
            event = ?failure.event,
            target = %failure.target,
            error = %failure.cause,
            "Listener failed during dispatch"
        );
    }
}
