//! Tracked input state

use enum_map::EnumMap;

use super::error::InputError;
use super::keys::{ButtonMask, Key, Modifiers, MouseButton, check_button_code, check_key_code};

/// Held keys, held buttons and the last cursor position of one input context
///
/// `button_state[b]` always equals bit `b` of the button bitmask; both are only
/// changed together through [`InputState::set_button_down`] and
/// [`InputState::set_button_up`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    cursor: [f32; 2],
    buttons: ButtonMask,
    button_state: EnumMap<MouseButton, bool>,
    key_state: EnumMap<Key, bool>,
    modifiers: Modifiers,
}

impl InputState {
    /// Creates a state with nothing held and the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_down(&mut self, key: Key) {
        self.key_state[key] = true;
    }

    pub fn set_key_up(&mut self, key: Key) {
        self.key_state[key] = false;
    }

    pub fn set_button_down(&mut self, button: MouseButton) {
        self.button_state[button] = true;
        self.buttons.insert(button.bit());
        debug_assert!(self.is_consistent());
    }

    pub fn set_button_up(&mut self, button: MouseButton) {
        self.button_state[button] = false;
        self.buttons.remove(button.bit());
        debug_assert!(self.is_consistent());
    }

    /// Records a new cursor position; deltas are the caller's job
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = [x, y];
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Returns true while `key` is held
    pub fn key_held(&self, key: Key) -> bool {
        self.key_state[key]
    }

    /// Returns true while `button` is held
    pub fn button_held(&self, button: MouseButton) -> bool {
        self.button_state[button]
    }

    /// Looks up a key by raw code
    ///
    /// Codes inside the tracked range that name no key are never held.
    pub fn key_state(&self, code: i32) -> Result<bool, InputError> {
        check_key_code(code)?;
        Ok(Key::from_code(code).is_some_and(|key| self.key_state[key]))
    }

    /// Looks up a button by raw code
    pub fn button_state(&self, code: i32) -> Result<bool, InputError> {
        check_button_code(code)?;
        Ok(MouseButton::from_code(code).is_some_and(|button| self.button_state[button]))
    }

    /// Held buttons as a raw 8-bit mask
    pub fn bitmask(&self) -> u8 {
        self.buttons.bits()
    }

    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    pub fn cursor(&self) -> (f32, f32) {
        (self.cursor[0], self.cursor[1])
    }

    pub fn cursor_x(&self) -> f32 {
        self.cursor[0]
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor[1]
    }

    /// Modifiers delivered with the latest key or button signal
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Iterates the keys currently held, in code order
    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.key_state
            .iter()
            .filter_map(|(key, held)| held.then_some(key))
    }

    /// Checks that the boolean button array agrees with the bitmask
    pub fn is_consistent(&self) -> bool {
        MouseButton::ALL
            .iter()
            .all(|&button| self.button_state[button] == self.buttons.contains(button.bit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::keys::{BUTTON_LAST, KEY_FIRST, KEY_LAST};

    #[test]
    fn test_new_state_is_empty() {
        let state = InputState::new();
        assert_eq!(state.bitmask(), 0);
        assert_eq!(state.cursor(), (0.0, 0.0));
        assert_eq!(state.held_keys().count(), 0);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_key_down_then_up() {
        let mut state = InputState::new();
        state.set_key_down(Key::W);
        assert!(state.key_held(Key::W));
        assert_eq!(state.key_state(Key::W.code()), Ok(true));
        assert!(!state.key_held(Key::S));

        state.set_key_up(Key::W);
        assert!(!state.key_held(Key::W));
    }

    #[test]
    fn test_button_transitions_keep_bitmask_in_sync() {
        let mut state = InputState::new();

        state.set_button_down(MouseButton::Middle);
        assert_eq!(state.bitmask(), 0b0000_0100);
        assert!(state.button_held(MouseButton::Middle));

        state.set_button_up(MouseButton::Middle);
        assert_eq!(state.bitmask(), 0);

        state.set_button_down(MouseButton::Left);
        state.set_button_down(MouseButton::Middle);
        assert_eq!(state.bitmask(), 0b0000_0101);

        for button in MouseButton::ALL {
            let bit_set = (state.bitmask() >> button.code()) & 1 == 1;
            assert_eq!(state.button_held(button), bit_set);
        }
    }

    #[test]
    fn test_releasing_unheld_button_is_harmless() {
        let mut state = InputState::new();
        state.set_button_up(MouseButton::Right);
        assert_eq!(state.bitmask(), 0);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_highest_button_sets_top_bit() {
        let mut state = InputState::new();
        state.set_button_down(MouseButton::Button8);
        assert_eq!(state.bitmask(), 0b1000_0000);
        assert_eq!(state.button_state(BUTTON_LAST), Ok(true));
    }

    #[test]
    fn test_raw_queries_reject_out_of_range_codes() {
        let state = InputState::new();
        assert!(state.key_state(KEY_FIRST - 1).is_err_and(|e| e.is_invalid_argument()));
        assert!(state.key_state(KEY_LAST + 1).is_err_and(|e| e.is_invalid_argument()));
        assert!(state.button_state(-1).is_err_and(|e| e.is_invalid_argument()));
        assert!(state.button_state(8).is_err_and(|e| e.is_invalid_argument()));
    }

    #[test]
    fn test_unassigned_key_codes_are_never_held() {
        let state = InputState::new();
        // 33 sits between Space and Apostrophe
        assert_eq!(state.key_state(33), Ok(false));
    }

    #[test]
    fn test_held_keys_in_code_order() {
        let mut state = InputState::new();
        state.set_key_down(Key::Escape);
        state.set_key_down(Key::A);
        let held: Vec<_> = state.held_keys().collect();
        assert_eq!(held, vec![Key::A, Key::Escape]);
    }
}
