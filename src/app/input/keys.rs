//! Key, mouse button and modifier identifiers
//!
//! Raw platform codes arrive as integers at the windowing boundary. They are
//! converted here into closed enums once, so everything past the boundary works
//! with codes that are valid by construction.

use std::fmt;

use bitflags::bitflags;
use enum_map::Enum;

use super::error::{CodeDomain, InputError};

/// Lowest tracked key code
pub const KEY_FIRST: i32 = 32;

/// Highest tracked key code
pub const KEY_LAST: i32 = 348;

/// Lowest mouse button code
pub const BUTTON_FIRST: i32 = 0;

/// Highest mouse button code (the button bitmask is 8 bits wide)
pub const BUTTON_LAST: i32 = 7;

/// Number of tracked mouse buttons
pub const BUTTON_COUNT: usize = 8;

macro_rules! keys {
    ($($name:ident = $code:literal),+ $(,)?) => {
        /// Keyboard key, identified by its GLFW-compatible key code
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
        pub enum Key {
            $($name,)+
        }

        impl Key {
            /// Every named key, in ascending code order
            pub const ALL: &'static [Key] = &[$(Key::$name),+];

            /// Platform code of this key
            pub const fn code(self) -> i32 {
                match self {
                    $(Key::$name => $code,)+
                }
            }

            /// Looks up the key with the given code
            ///
            /// Returns `None` for codes outside `KEY_FIRST..=KEY_LAST` and for the
            /// gaps inside that range that name no key.
            pub const fn from_code(code: i32) -> Option<Key> {
                match code {
                    $($code => Some(Key::$name),)+
                    _ => None,
                }
            }
        }
    };
}

keys! {
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,
    World1 = 161,
    World2 = 162,
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,
    F25 = 314,
    Kp0 = 320,
    Kp1 = 321,
    Kp2 = 322,
    Kp3 = 323,
    Kp4 = 324,
    Kp5 = 325,
    Kp6 = 326,
    Kp7 = 327,
    Kp8 = 328,
    Kp9 = 329,
    KpDecimal = 330,
    KpDivide = 331,
    KpMultiply = 332,
    KpSubtract = 333,
    KpAdd = 334,
    KpEnter = 335,
    KpEqual = 336,
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl TryFrom<i32> for Key {
    type Error = InputError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        check_key_code(code)?;
        Key::from_code(code).ok_or(InputError::UnassignedKey(code))
    }
}

/// Mouse button; at most eight are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

impl MouseButton {
    /// Every button, in ascending code order
    pub const ALL: [MouseButton; BUTTON_COUNT] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Button4,
        MouseButton::Button5,
        MouseButton::Button6,
        MouseButton::Button7,
        MouseButton::Button8,
    ];

    /// Platform code of this button (`0..=7`)
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Looks up the button with the given code
    pub fn from_code(code: i32) -> Option<MouseButton> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// The bit this button occupies in the button bitmask
    pub const fn bit(self) -> ButtonMask {
        ButtonMask::from_bits_retain(1 << self as u8)
    }
}

impl TryFrom<i32> for MouseButton {
    type Error = InputError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        check_button_code(code)?;
        MouseButton::from_code(code).ok_or(InputError::InvalidArgument {
            domain: CodeDomain::Button,
            code,
            first: BUTTON_FIRST,
            last: BUTTON_LAST,
        })
    }
}

bitflags! {
    /// Held mouse buttons, bit `i` set while button `i` is down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const BUTTON_4 = 1 << 3;
        const BUTTON_5 = 1 << 4;
        const BUTTON_6 = 1 << 5;
        const BUTTON_7 = 1 << 6;
        const BUTTON_8 = 1 << 7;
    }
}

bitflags! {
    /// Keyboard modifiers delivered alongside key and button signals
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0x01;
        const CONTROL = 0x02;
        const ALT = 0x04;
        const SUPER = 0x08;
        const CAPS_LOCK = 0x10;
        const NUM_LOCK = 0x20;
    }
}

impl Modifiers {
    /// Converts a raw platform modifier word, dropping unknown bits
    pub fn from_raw(mods: i32) -> Self {
        Self::from_bits_truncate((mods & 0xff) as u8)
    }
}

/// Code platforms report for a key they cannot identify
pub const KEY_UNKNOWN: i32 = -1;

/// Key as delivered to listeners
///
/// Codes without a [`Key`] (out of range, gaps in the key table, keys the
/// platform cannot identify) still reach listeners as `Raw`; they are just
/// never tracked as held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Known(Key),
    Raw(i32),
}

impl KeyCode {
    pub const fn from_raw(code: i32) -> Self {
        match Key::from_code(code) {
            Some(key) => KeyCode::Known(key),
            None => KeyCode::Raw(code),
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            KeyCode::Known(key) => key.code(),
            KeyCode::Raw(code) => code,
        }
    }

    pub const fn key(self) -> Option<Key> {
        match self {
            KeyCode::Known(key) => Some(key),
            KeyCode::Raw(_) => None,
        }
    }
}

impl From<Key> for KeyCode {
    fn from(key: Key) -> Self {
        KeyCode::Known(key)
    }
}

impl PartialEq<Key> for KeyCode {
    fn eq(&self, other: &Key) -> bool {
        *self == KeyCode::Known(*other)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Known(key) => write!(f, "{key:?}"),
            KeyCode::Raw(code) => write!(f, "key#{code}"),
        }
    }
}

/// Mouse button as delivered to listeners; `Raw` buttons are never tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonCode {
    Known(MouseButton),
    Raw(i32),
}

impl ButtonCode {
    pub fn from_raw(code: i32) -> Self {
        MouseButton::from_code(code).map_or(ButtonCode::Raw(code), ButtonCode::Known)
    }

    pub const fn code(self) -> i32 {
        match self {
            ButtonCode::Known(button) => button.code(),
            ButtonCode::Raw(code) => code,
        }
    }

    pub const fn button(self) -> Option<MouseButton> {
        match self {
            ButtonCode::Known(button) => Some(button),
            ButtonCode::Raw(_) => None,
        }
    }
}

impl From<MouseButton> for ButtonCode {
    fn from(button: MouseButton) -> Self {
        ButtonCode::Known(button)
    }
}

impl PartialEq<MouseButton> for ButtonCode {
    fn eq(&self, other: &MouseButton) -> bool {
        *self == ButtonCode::Known(*other)
    }
}

impl fmt::Display for ButtonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonCode::Known(button) => write!(f, "{button:?}"),
            ButtonCode::Raw(code) => write!(f, "button#{code}"),
        }
    }
}

/// Fails unless `code` lies in `KEY_FIRST..=KEY_LAST`
pub fn check_key_code(code: i32) -> Result<(), InputError> {
    if (KEY_FIRST..=KEY_LAST).contains(&code) {
        Ok(())
    } else {
        Err(InputError::InvalidArgument {
            domain: CodeDomain::Key,
            code,
            first: KEY_FIRST,
            last: KEY_LAST,
        })
    }
}

/// Fails unless `code` lies in `BUTTON_FIRST..=BUTTON_LAST`
pub fn check_button_code(code: i32) -> Result<(), InputError> {
    if (BUTTON_FIRST..=BUTTON_LAST).contains(&code) {
        Ok(())
    } else {
        Err(InputError::InvalidArgument {
            domain: CodeDomain::Button,
            code,
            first: BUTTON_FIRST,
            last: BUTTON_LAST,
        })
    }
}
