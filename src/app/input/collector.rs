//! Raw input collection from winit events

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use super::context::InputContext;
use super::keys::{self, ButtonCode, KEY_UNKNOWN, Key, Modifiers, MouseButton};
use super::listener::PrimaryListener;
use crate::app::config::InputConfig;

/// Translates winit window events into input context signals
pub struct InputCollector {
    scale_factor: f32,
    scroll_line_pixels: f32,
    modifiers: Modifiers,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new(config: &InputConfig) -> Self {
        Self {
            scale_factor: 1.0,
            scroll_line_pixels: config.scroll_line_pixels,
            modifiers: Modifiers::empty(),
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Modifiers from the latest `ModifiersChanged` event
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Handle a winit window event
    ///
    /// Returns true when the event was forwarded to the input context.
    pub fn handle_window_event<W: PrimaryListener>(
        &mut self,
        event: &WindowEvent,
        input: &mut InputContext<W>,
    ) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let key = key_code_from_winit(event.physical_key);
                match (event.state, event.repeat) {
                    (ElementState::Pressed, true) => input.key_repeat(key, self.modifiers),
                    (ElementState::Pressed, false) => input.key_down(key, self.modifiers),
                    (ElementState::Released, _) => input.key_up(key, self.modifiers),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = button_from_winit(*button);
                match state {
                    ElementState::Pressed => input.button_down(button, self.modifiers),
                    ElementState::Released => input.button_up(button, self.modifiers),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                input.on_cursor_move(
                    position.x as f32 / self.scale_factor,
                    position.y as f32 / self.scale_factor,
                );
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let [dx, dy] = scroll_pixels(*delta, self.scroll_line_pixels);
                input.on_scroll(dx, dy);
            }

            WindowEvent::CursorEntered { .. } => input.on_cursor_enter(),
            WindowEvent::CursorLeft { .. } => input.on_cursor_exit(),

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers_from_winit(modifiers.state());
                return false;
            }

            WindowEvent::Resized(size) => {
                input.on_window_resize(saturate(size.width), saturate(size.height));
            }
            WindowEvent::Moved(position) => input.on_window_move(position.x, position.y),
            WindowEvent::Focused(focused) => input.on_window_focus(*focused),
            WindowEvent::Occluded(occluded) => input.on_window_iconify(*occluded),
            WindowEvent::CloseRequested => input.on_window_close(),

            _ => return false,
        }
        true
    }
}

fn saturate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Converts a wheel delta into pixels; line deltas are scaled by `line_pixels`
pub fn scroll_pixels(delta: MouseScrollDelta, line_pixels: f32) -> [f32; 2] {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => [x * line_pixels, y * line_pixels],
        MouseScrollDelta::PixelDelta(pos) => [pos.x as f32, pos.y as f32],
    }
}

pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::CONTROL, state.control_key());
    modifiers.set(Modifiers::ALT, state.alt_key());
    modifiers.set(Modifiers::SUPER, state.super_key());
    modifiers
}

/// Maps a winit mouse button
///
/// `Back`/`Forward` are buttons 4 and 5 and `Other(5..=7)` fill the rest. Any
/// other `Other(n)` is delivered as a raw, untracked button `n`, so it cannot
/// alias a named button.
pub fn button_from_winit(button: winit::event::MouseButton) -> ButtonCode {
    use winit::event::MouseButton as WB;
    match button {
        WB::Left => MouseButton::Left.into(),
        WB::Right => MouseButton::Right.into(),
        WB::Middle => MouseButton::Middle.into(),
        WB::Back => MouseButton::Button4.into(),
        WB::Forward => MouseButton::Button5.into(),
        WB::Other(index @ 5..=7) => ButtonCode::from_raw(i32::from(index)),
        WB::Other(index) => ButtonCode::Raw(i32::from(index)),
    }
}

/// Maps a physical key; keys outside the tracked set arrive as [`KEY_UNKNOWN`]
pub fn key_code_from_winit(physical: PhysicalKey) -> keys::KeyCode {
    match physical {
        PhysicalKey::Code(code) => key_from_winit(code)
            .map_or(keys::KeyCode::Raw(KEY_UNKNOWN), keys::KeyCode::Known),
        PhysicalKey::Unidentified(_) => keys::KeyCode::Raw(KEY_UNKNOWN),
    }
}

/// Maps a winit physical key code onto the tracked key set
pub fn key_from_winit(code: KeyCode) -> Option<Key> {
    use KeyCode as WK;
    let key = match code {
        WK::Space => Key::Space,
        WK::Quote => Key::Apostrophe,
        WK::Comma => Key::Comma,
        WK::Minus => Key::Minus,
        WK::Period => Key::Period,
        WK::Slash => Key::Slash,
        WK::Digit0 => Key::Num0,
        WK::Digit1 => Key::Num1,
        WK::Digit2 => Key::Num2,
        WK::Digit3 => Key::Num3,
        WK::Digit4 => Key::Num4,
        WK::Digit5 => Key::Num5,
        WK::Digit6 => Key::Num6,
        WK::Digit7 => Key::Num7,
        WK::Digit8 => Key::Num8,
        WK::Digit9 => Key::Num9,
        WK::Semicolon => Key::Semicolon,
        WK::Equal => Key::Equal,

        WK::KeyA => Key::A,
        WK::KeyB => Key::B,
        WK::KeyC => Key::C,
        WK::KeyD => Key::D,
        WK::KeyE => Key::E,
        WK::KeyF => Key::F,
        WK::KeyG => Key::G,
        WK::KeyH => Key::H,
        WK::KeyI => Key::I,
        WK::KeyJ => Key::J,
        WK::KeyK => Key::K,
        WK::KeyL => Key::L,
        WK::KeyM => Key::M,
        WK::KeyN => Key::N,
        WK::KeyO => Key::O,
        WK::KeyP => Key::P,
        WK::KeyQ => Key::Q,
        WK::KeyR => Key::R,
        WK::KeyS => Key::S,
        WK::KeyT => Key::T,
        WK::KeyU => Key::U,
        WK::KeyV => Key::V,
        WK::KeyW => Key::W,
        WK::KeyX => Key::X,
        WK::KeyY => Key::Y,
        WK::KeyZ => Key::Z,

        WK::BracketLeft => Key::LeftBracket,
        WK::Backslash => Key::Backslash,
        WK::BracketRight => Key::RightBracket,
        WK::Backquote => Key::GraveAccent,
        WK::IntlBackslash => Key::World1,

        WK::Escape => Key::Escape,
        WK::Enter => Key::Enter,
        WK::Tab => Key::Tab,
        WK::Backspace => Key::Backspace,
        WK::Insert => Key::Insert,
        WK::Delete => Key::Delete,
        WK::ArrowRight => Key::Right,
        WK::ArrowLeft => Key::Left,
        WK::ArrowDown => Key::Down,
        WK::ArrowUp => Key::Up,
        WK::PageUp => Key::PageUp,
        WK::PageDown => Key::PageDown,
        WK::Home => Key::Home,
        WK::End => Key::End,
        WK::CapsLock => Key::CapsLock,
        WK::ScrollLock => Key::ScrollLock,
        WK::NumLock => Key::NumLock,
        WK::PrintScreen => Key::PrintScreen,
        WK::Pause => Key::Pause,

        WK::F1 => Key::F1,
        WK::F2 => Key::F2,
        WK::F3 => Key::F3,
        WK::F4 => Key::F4,
        WK::F5 => Key::F5,
        WK::F6 => Key::F6,
        WK::F7 => Key::F7,
        WK::F8 => Key::F8,
        WK::F9 => Key::F9,
        WK::F10 => Key::F10,
        WK::F11 => Key::F11,
        WK::F12 => Key::F12,
        WK::F13 => Key::F13,
        WK::F14 => Key::F14,
        WK::F15 => Key::F15,
        WK::F16 => Key::F16,
        WK::F17 => Key::F17,
        WK::F18 => Key::F18,
        WK::F19 => Key::F19,
        WK::F20 => Key::F20,
        WK::F21 => Key::F21,
        WK::F22 => Key::F22,
        WK::F23 => Key::F23,
        WK::F24 => Key::F24,
        WK::F25 => Key::F25,

        WK::Numpad0 => Key::Kp0,
        WK::Numpad1 => Key::Kp1,
        WK::Numpad2 => Key::Kp2,
        WK::Numpad3 => Key::Kp3,
        WK::Numpad4 => Key::Kp4,
        WK::Numpad5 => Key::Kp5,
        WK::Numpad6 => Key::Kp6,
        WK::Numpad7 => Key::Kp7,
        WK::Numpad8 => Key::Kp8,
        WK::Numpad9 => Key::Kp9,
        WK::NumpadDecimal => Key::KpDecimal,
        WK::NumpadDivide => Key::KpDivide,
        WK::NumpadMultiply => Key::KpMultiply,
        WK::NumpadSubtract => Key::KpSubtract,
        WK::NumpadAdd => Key::KpAdd,
        WK::NumpadEnter => Key::KpEnter,
        WK::NumpadEqual => Key::KpEqual,

        WK::ShiftLeft => Key::LeftShift,
        WK::ControlLeft => Key::LeftControl,
        WK::AltLeft => Key::LeftAlt,
        WK::SuperLeft => Key::LeftSuper,
        WK::ShiftRight => Key::RightShift,
        WK::ControlRight => Key::RightControl,
        WK::AltRight => Key::RightAlt,
        WK::SuperRight => Key::RightSuper,
        WK::ContextMenu => Key::Menu,

        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_winit(KeyCode::KeyW), Some(Key::W));
        assert_eq!(key_from_winit(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(key_from_winit(KeyCode::NumpadEnter), Some(Key::KpEnter));
        assert_eq!(key_from_winit(KeyCode::F35), None);
    }

    #[test]
    fn test_unmapped_physical_keys_are_forwarded_as_unknown() {
        use winit::keyboard::NativeKeyCode;
        assert_eq!(key_code_from_winit(PhysicalKey::Code(KeyCode::KeyA)), Key::A);
        assert_eq!(
            key_code_from_winit(PhysicalKey::Code(KeyCode::NumpadComma)),
            keys::KeyCode::Raw(KEY_UNKNOWN)
        );
        assert_eq!(
            key_code_from_winit(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            keys::KeyCode::Raw(KEY_UNKNOWN)
        );
    }

    #[test]
    fn test_button_mapping() {
        use winit::event::MouseButton as WB;
        assert_eq!(button_from_winit(WB::Left), MouseButton::Left);
        assert_eq!(button_from_winit(WB::Back), MouseButton::Button4);
        assert_eq!(button_from_winit(WB::Forward), MouseButton::Button5);
        assert_eq!(button_from_winit(WB::Other(5)), MouseButton::Button6);
        assert_eq!(button_from_winit(WB::Other(7)), MouseButton::Button8);
        assert_eq!(button_from_winit(WB::Other(8)), ButtonCode::Raw(8));
    }

    #[test]
    fn test_low_other_buttons_do_not_alias_named_buttons() {
        use winit::event::MouseButton as WB;
        for index in 0..=4_u16 {
            let button = button_from_winit(WB::Other(index));
            assert_eq!(button, ButtonCode::Raw(i32::from(index)));
            assert_eq!(button.button(), None);
        }
    }

    #[test]
    fn test_scroll_line_delta_is_scaled() {
        assert_eq!(
            scroll_pixels(MouseScrollDelta::LineDelta(1.0, -2.0), 20.0),
            [20.0, -40.0]
        );
        assert_eq!(
            scroll_pixels(
                MouseScrollDelta::PixelDelta(PhysicalPosition::new(3.0, 4.5)),
                20.0
            ),
            [3.0, 4.5]
        );
    }

    #[test]
    fn test_modifier_mapping() {
        let state = ModifiersState::SHIFT | ModifiersState::SUPER;
        assert_eq!(
            modifiers_from_winit(state),
            Modifiers::SHIFT | Modifiers::SUPER
        );
    }
}
