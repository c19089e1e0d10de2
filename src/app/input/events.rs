//! Event kinds and raw boundary signals

use bitflags::bitflags;

/// Listener category an event is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Key,
    Mouse,
    Window,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Key, Category::Mouse, Category::Window];

    /// The flag for this category in a [`Categories`] set
    pub const fn flag(self) -> Categories {
        match self {
            Category::Key => Categories::KEY,
            Category::Mouse => Categories::MOUSE,
            Category::Window => Categories::WINDOW,
        }
    }
}

bitflags! {
    /// Set of listener categories used for registration
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Categories: u8 {
        const KEY = 1 << 0;
        const MOUSE = 1 << 1;
        const WINDOW = 1 << 2;
    }
}

impl Categories {
    /// Iterates the contained categories in key, mouse, window order
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |category| self.contains(category.flag()))
    }
}

/// Kind of a delivered callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    KeyRepeat,
    ButtonDown,
    ButtonUp,
    CursorMove,
    CursorDrag,
    Scroll,
    CursorEnter,
    CursorExit,
    WindowResize,
    WindowMove,
    WindowFocus,
    WindowIconify,
    WindowMaximize,
    WindowClose,
}

impl EventKind {
    /// The listener category this kind fans out to
    pub const fn category(self) -> Category {
        match self {
            EventKind::KeyDown | EventKind::KeyUp | EventKind::KeyRepeat => Category::Key,
            EventKind::ButtonDown
            | EventKind::ButtonUp
            | EventKind::CursorMove
            | EventKind::CursorDrag
            | EventKind::Scroll
            | EventKind::CursorEnter
            | EventKind::CursorExit => Category::Mouse,
            EventKind::WindowResize
            | EventKind::WindowMove
            | EventKind::WindowFocus
            | EventKind::WindowIconify
            | EventKind::WindowMaximize
            | EventKind::WindowClose => Category::Window,
        }
    }
}

/// One raw hardware signal, exactly as the windowing layer reports it
///
/// Codes are untrusted platform integers; validation happens when the signal
/// is dispatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    KeyDown { code: i32, mods: i32 },
    KeyUp { code: i32, mods: i32 },
    KeyRepeat { code: i32, mods: i32 },
    ButtonDown { code: i32, mods: i32 },
    ButtonUp { code: i32, mods: i32 },
    CursorMove { x: f32, y: f32 },
    Scroll { dx: f32, dy: f32 },
    CursorEnter,
    CursorExit,
    WindowResize { width: i32, height: i32 },
    WindowMove { x: i32, y: i32 },
    WindowFocus(bool),
    WindowIconify(bool),
    WindowMaximize(bool),
    WindowClose,
}

impl RawEvent {
    /// Kind this signal is delivered as
    ///
    /// Cursor movement reports [`EventKind::CursorMove`]; whether it becomes a
    /// drag depends on the buttons held when it is dispatched.
    pub const fn kind(&self) -> EventKind {
        match self {
            RawEvent::KeyDown { .. } => EventKind::KeyDown,
            RawEvent::KeyUp { .. } => EventKind::KeyUp,
            RawEvent::KeyRepeat { .. } => EventKind::KeyRepeat,
            RawEvent::ButtonDown { .. } => EventKind::ButtonDown,
            RawEvent::ButtonUp { .. } => EventKind::ButtonUp,
            RawEvent::CursorMove { .. } => EventKind::CursorMove,
            RawEvent::Scroll { .. } => EventKind::Scroll,
            RawEvent::CursorEnter => EventKind::CursorEnter,
            RawEvent::CursorExit => EventKind::CursorExit,
            RawEvent::WindowResize { .. } => EventKind::WindowResize,
            RawEvent::WindowMove { .. } => EventKind::WindowMove,
            RawEvent::WindowFocus(_) => EventKind::WindowFocus,
            RawEvent::WindowIconify(_) => EventKind::WindowIconify,
            RawEvent::WindowMaximize(_) => EventKind::WindowMaximize,
            RawEvent::WindowClose => EventKind::WindowClose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_iterate_in_fixed_order() {
        let all: Vec<_> = Categories::all().categories().collect();
        assert_eq!(all, vec![Category::Key, Category::Mouse, Category::Window]);

        let some: Vec<_> = (Categories::WINDOW | Categories::KEY).categories().collect();
        assert_eq!(some, vec![Category::Key, Category::Window]);
    }

    #[test]
    fn test_event_kinds_route_to_categories() {
        assert_eq!(EventKind::KeyRepeat.category(), Category::Key);
        assert_eq!(EventKind::CursorDrag.category(), Category::Mouse);
        assert_eq!(EventKind::CursorExit.category(), Category::Mouse);
        assert_eq!(EventKind::WindowClose.category(), Category::Window);
    }

    #[test]
    fn test_raw_event_kind() {
        assert_eq!(RawEvent::ButtonDown { code: 0, mods: 0 }.kind(), EventKind::ButtonDown);
        assert_eq!(RawEvent::CursorMove { x: 1.0, y: 2.0 }.kind(), EventKind::CursorMove);
        assert_eq!(RawEvent::WindowFocus(true).kind(), EventKind::WindowFocus);
    }
}
