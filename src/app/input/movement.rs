//! Cursor move / drag classification

use super::events::EventKind;
use super::state::InputState;

/// Cursor delta produced by one movement signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub dx: f32,
    pub dy: f32,
    /// At least one button was held while moving
    pub is_drag: bool,
}

impl Movement {
    pub fn kind(&self) -> EventKind {
        if self.is_drag {
            EventKind::CursorDrag
        } else {
            EventKind::CursorMove
        }
    }
}

/// Computes the delta against the last recorded cursor and records the new one
///
/// Any held button makes the movement a drag. The bitmask is compared against
/// zero as an unsigned value, so the eighth button counts like the others.
pub fn classify(state: &mut InputState, x: f32, y: f32) -> Movement {
    let (last_x, last_y) = state.cursor();
    let is_drag = state.bitmask() != 0;
    state.set_cursor(x, y);

    Movement {
        dx: x - last_x,
        dy: y - last_y,
        is_drag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::keys::MouseButton;

    #[test]
    fn test_move_without_buttons() {
        let mut state = InputState::new();
        let movement = classify(&mut state, 5.0, 3.0);
        assert_eq!(
            movement,
            Movement {
                dx: 5.0,
                dy: 3.0,
                is_drag: false
            }
        );
        assert_eq!(movement.kind(), EventKind::CursorMove);
        assert_eq!(state.cursor(), (5.0, 3.0));
    }

    #[test]
    fn test_drag_with_any_button() {
        for button in MouseButton::ALL {
            let mut state = InputState::new();
            state.set_button_down(button);
            let movement = classify(&mut state, 5.0, 3.0);
            assert!(movement.is_drag, "{button:?} should produce a drag");
            assert_eq!((movement.dx, movement.dy), (5.0, 3.0));
        }
    }

    #[test]
    fn test_deltas_chain_between_calls() {
        let mut state = InputState::new();
        classify(&mut state, 10.0, 10.0);
        let movement = classify(&mut state, 7.0, 12.5);
        assert_eq!((movement.dx, movement.dy), (-3.0, 2.5));
    }

    #[test]
    fn test_drag_is_continuous_while_held() {
        let mut state = InputState::new();
        state.set_button_down(MouseButton::Right);
        assert!(classify(&mut state, 1.0, 0.0).is_drag);
        assert!(classify(&mut state, 2.0, 0.0).is_drag);

        state.set_button_up(MouseButton::Right);
        assert!(!classify(&mut state, 3.0, 0.0).is_drag);
    }
}
