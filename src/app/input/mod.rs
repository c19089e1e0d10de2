//! Input handling system
//!
//! Turns raw hardware signals into tracked, queryable state and delivers each
//! signal to the primary window listener and then to registered subscriber
//! nodes:
//! - Tracks held keys, held buttons (array plus 8-bit mask) and the cursor
//! - Classifies cursor movement as move or drag
//! - Keeps per-category subscriber sets in registration order
//! - Contains listener failures so one listener cannot starve the rest
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputContext
//!                                      ├─ InputState (+ classify)
//!                                      ├─ primary listener
//!                                      └─ Listeners (by category, in order)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut input = InputContext::new(my_window_listener);
//! input.register_listener(&node, Categories::KEY | Categories::MOUSE);
//!
//! // In window_event()
//! collector.handle_window_event(&event, &mut input);
//!
//! // Anywhere
//! let held = input.key_held(Key::W.code())?;
//! ```

mod collector;
mod context;
mod error;
mod events;
mod keys;
mod listener;
mod movement;
mod registry;
mod state;

// Re-export public API
pub use collector::{
    InputCollector, button_from_winit, key_code_from_winit, key_from_winit, modifiers_from_winit,
    scroll_pixels,
};
pub use context::InputContext;
pub use error::{CodeDomain, DispatchTarget, FailureCause, InputError, ListenerFailure};
pub use events::{Categories, Category, EventKind, RawEvent};
pub use keys::{
    BUTTON_COUNT, BUTTON_FIRST, BUTTON_LAST, ButtonCode, ButtonMask, KEY_FIRST, KEY_LAST,
    KEY_UNKNOWN, Key, KeyCode, Modifiers, MouseButton,
};
pub use listener::{
    DiagnosticSink, KeyListener, ListenerResult, MouseListener, Node, PrimaryListener,
    TracingSink, WindowListener,
};
pub use movement::{Movement, classify};
pub use registry::{ListenerRegistry, Listeners, NodeId, NodeRef, node_ref};
pub use state::InputState;
