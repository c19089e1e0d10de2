//! Input state tracking health check
//!
//! Replays a scripted key/button/cursor sequence through a fresh input
//! context and compares the tracked state against the expected values.

use crate::app::input::{
    InputContext, InputError, KEY_LAST, Key, KeyListener, MouseButton, MouseListener,
    WindowListener,
};
use crate::health::check::{CheckResult, Findings, SystemCheck};

/// Primary listener that ignores everything
struct Idle;

impl KeyListener for Idle {}
impl MouseListener for Idle {}
impl WindowListener for Idle {}

#[derive(Default)]
pub struct InputStateCheck;

impl InputStateCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for InputStateCheck {
    fn name(&self) -> &'static str {
        "Input State"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Replays key, button and cursor signals and verifies tracked state")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();
        let mut input = InputContext::new(Idle);

        let stuck: Vec<Key> = Key::ALL
            .iter()
            .copied()
            .filter(|key| {
                input.on_key_down(key.code(), 0);
                let held = input.key_held(key.code()) == Ok(true);
                input.on_key_up(key.code(), 0);
                !held || input.key_held(key.code()) != Ok(false)
            })
            .collect();
        if stuck.is_empty() {
            findings.ok(format!("{} keys press and release cleanly", Key::ALL.len()));
        } else {
            findings.fail(format!("Keys stuck or never held: {stuck:?}"));
        }

        input.on_button_down(MouseButton::Middle.code(), 0);
        let middle = input.button_bitmask();
        input.on_button_up(MouseButton::Middle.code(), 0);
        let released = input.button_bitmask();
        input.on_button_down(MouseButton::Left.code(), 0);
        input.on_button_down(MouseButton::Middle.code(), 0);
        let both = input.button_bitmask();
        findings.require(
            (middle, released, both) == (0b100, 0, 0b101),
            format!("Button mask {middle:#05b} -> {released:#05b} -> {both:#05b}"),
        );
        findings.require(
            input.state().is_consistent(),
            "Button array agrees with the mask",
        );

        input.on_cursor_move(5.0, 3.0);
        findings.require(
            (input.cursor_x(), input.cursor_y()) == (5.0, 3.0),
            format!("Cursor at ({}, {})", input.cursor_x(), input.cursor_y()),
        );

        let rejected = [
            input.key_held(-1),
            input.key_held(KEY_LAST + 1),
            input.button_held(-1),
            input.button_held(8),
        ]
        .iter()
        .all(|result| matches!(result, Err(InputError::InvalidArgument { .. })));
        findings.require(rejected, "Out-of-range codes are rejected");

        findings.finish(
            "Key, button and cursor state tracked",
            "Input state tracked with warnings",
            "Input state diverged",
        )
    }
}
