//! End-to-end behavior of the input router: state tracking, classification,
//! ordered fan-out and failure containment

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::bail;
use jx3d::app::input::{
    BUTTON_COUNT, ButtonCode, Categories, Category, DiagnosticSink, DispatchTarget, EventKind,
    FailureCause, InputContext, InputError, InputState, KEY_FIRST, KEY_LAST, KEY_UNKNOWN, Key,
    KeyCode, KeyListener, ListenerFailure, ListenerResult, Listeners, Modifiers, MouseButton,
    MouseListener, Node, NodeId, NodeRef, RawEvent, WindowListener, node_ref,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Primary listener that records movement classification
#[derive(Default)]
struct Window {
    log: Log,
}

impl KeyListener for Window {}

impl MouseListener for Window {
    fn mouse_moved(&mut self, dx: f32, dy: f32, _input: &InputState) -> ListenerResult {
        self.log.borrow_mut().push(format!("moved {dx} {dy}"));
        Ok(())
    }

    fn mouse_dragged(&mut self, dx: f32, dy: f32, _input: &InputState) -> ListenerResult {
        self.log.borrow_mut().push(format!("dragged {dx} {dy}"));
        Ok(())
    }
}

impl WindowListener for Window {
    fn window_closed(&mut self, _input: &InputState) -> ListenerResult {
        self.log.borrow_mut().push("closed".to_string());
        Ok(())
    }
}

/// Primary listener that records key and button signals
struct Keyboard {
    fails: bool,
    log: Log,
}

impl KeyListener for Keyboard {
    fn key_down(&mut self, key: KeyCode, _mods: Modifiers, input: &InputState) -> ListenerResult {
        let held = key.key().is_some_and(|key| input.key_held(key));
        self.log
            .borrow_mut()
            .push(format!("primary {key} held={held}"));
        if self.fails {
            bail!("primary rejected {key}");
        }
        Ok(())
    }
}

impl MouseListener for Keyboard {
    fn mouse_pressed(
        &mut self,
        button: ButtonCode,
        _mods: Modifiers,
        _input: &InputState,
    ) -> ListenerResult {
        self.log.borrow_mut().push(format!("primary {button}"));
        Ok(())
    }
}

impl WindowListener for Keyboard {}

#[derive(Clone, Copy)]
enum Behavior {
    Ok,
    Fail,
    Panic,
}

struct Subscriber {
    name: &'static str,
    behavior: Behavior,
    log: Log,
}

impl Subscriber {
    fn node(name: &'static str, behavior: Behavior, log: &Log) -> NodeRef {
        node_ref(Subscriber {
            name,
            behavior,
            log: log.clone(),
        })
    }
}

impl KeyListener for Subscriber {
    fn key_down(&mut self, key: KeyCode, _mods: Modifiers, _input: &InputState) -> ListenerResult {
        self.log.borrow_mut().push(format!("{} {key}", self.name));
        match self.behavior {
            Behavior::Ok => Ok(()),
            Behavior::Fail => bail!("{} rejected {key:?}", self.name),
            Behavior::Panic => panic!("{} blew up", self.name),
        }
    }
}

impl MouseListener for Subscriber {
    fn mouse_pressed(
        &mut self,
        button: ButtonCode,
        _mods: Modifiers,
        _input: &InputState,
    ) -> ListenerResult {
        self.log.borrow_mut().push(format!("{} {button}", self.name));
        Ok(())
    }
}

impl Node for Subscriber {
    fn key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        Some(self)
    }

    fn mouse_listener(&mut self) -> Option<&mut dyn MouseListener> {
        Some(self)
    }
}

#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<Vec<(EventKind, DispatchTarget, String)>>>);

impl DiagnosticSink for RecordingSink {
    fn listener_failed(&self, failure: &ListenerFailure) {
        let cause = match &failure.cause {
            FailureCause::Returned(error) => format!("returned: {error}"),
            FailureCause::Panicked(message) => format!("panicked: {message}"),
            FailureCause::Busy => "busy".to_string(),
        };
        self.0.borrow_mut().push((failure.event, failure.target, cause));
    }
}

fn router(log: &Log) -> (InputContext<Window>, RecordingSink) {
    let sink = RecordingSink::default();
    let input = InputContext::new(Window { log: log.clone() }).with_sink(sink.clone());
    (input, sink)
}

fn keyboard_router(fails: bool, log: &Log) -> (InputContext<Keyboard>, RecordingSink) {
    let sink = RecordingSink::default();
    let primary = Keyboard {
        fails,
        log: log.clone(),
    };
    (InputContext::new(primary).with_sink(sink.clone()), sink)
}

#[test]
fn test_every_key_presses_and_releases() {
    let (mut input, _) = router(&Log::default());

    for key in Key::ALL {
        input.on_key_down(key.code(), 0);
        assert_eq!(input.key_held(key.code()), Ok(true), "{key:?} after press");
        input.on_key_up(key.code(), 0);
        assert_eq!(input.key_held(key.code()), Ok(false), "{key:?} after release");
    }
}

#[test]
fn test_gap_codes_query_as_not_held() {
    let (input, _) = router(&Log::default());
    // 33 sits between Space (32) and Apostrophe (39)
    assert_eq!(input.key_held(33), Ok(false));
    assert_eq!(input.key_held(KEY_FIRST), Ok(false));
    assert_eq!(input.key_held(KEY_LAST), Ok(false));
}

#[test]
fn test_bitmask_follows_button_array() {
    let (mut input, _) = router(&Log::default());

    input.on_button_down(MouseButton::Middle.code(), 0);
    assert_eq!(input.button_bitmask(), 0b100);
    input.on_button_up(MouseButton::Middle.code(), 0);
    assert_eq!(input.button_bitmask(), 0);

    input.on_button_down(MouseButton::Left.code(), 0);
    input.on_button_down(MouseButton::Middle.code(), 0);
    assert_eq!(input.button_bitmask(), 0b101);

    for code in 0..BUTTON_COUNT as i32 {
        let held = input.button_held(code).expect("tracked button");
        assert_eq!(held, input.button_bitmask() & (1 << code) != 0, "button {code}");
    }
    assert!(input.state().is_consistent());
}

#[test]
fn test_all_buttons_held_is_still_a_drag() {
    let log = Log::default();
    let (mut input, _) = router(&log);

    for button in MouseButton::ALL {
        input.button_down(button, Modifiers::empty());
    }
    assert_eq!(input.button_bitmask(), 0xFF);

    input.on_cursor_move(1.0, 1.0);
    assert_eq!(log.borrow().as_slice(), ["dragged 1 1"]);
}

#[test]
fn test_out_of_range_queries_fail() {
    let (input, _) = router(&Log::default());

    for code in [i32::MIN, -1, KEY_FIRST - 1, KEY_LAST + 1, i32::MAX] {
        let err = input.key_held(code).expect_err("out of range key");
        assert!(err.is_invalid_argument(), "{code}: {err}");
    }
    for code in [-1, 8, 100] {
        assert!(matches!(
            input.button_held(code),
            Err(InputError::InvalidArgument { code: c, .. }) if c == code
        ));
    }
}

#[test]
fn test_move_then_drag_deltas() {
    let log = Log::default();
    let (mut input, _) = router(&log);

    input.dispatch(RawEvent::CursorMove { x: 5.0, y: 3.0 });
    input.dispatch(RawEvent::ButtonDown { code: 0, mods: 0 });
    input.dispatch(RawEvent::CursorMove { x: 7.0, y: 3.0 });
    input.dispatch(RawEvent::ButtonUp { code: 0, mods: 0 });
    input.dispatch(RawEvent::CursorMove { x: 6.0, y: 1.0 });

    assert_eq!(
        log.borrow().as_slice(),
        ["moved 5 3", "dragged 2 0", "moved -1 -2"]
    );
    assert_eq!((input.cursor_x(), input.cursor_y()), (6.0, 1.0));
}

#[test]
fn test_double_registration_delivers_once() {
    let log = Log::default();
    let (mut input, _) = router(&log);
    let node = Subscriber::node("n", Behavior::Ok, &log);

    assert_eq!(input.register_listener(&node, Categories::KEY), Categories::KEY);
    assert_eq!(input.register_listener(&node, Categories::KEY), Categories::empty());

    input.key_down(Key::Q, Modifiers::empty());
    assert_eq!(log.borrow().as_slice(), ["n Q"]);
}

#[test]
fn test_categories_are_independent() {
    let log = Log::default();
    let (mut input, _) = router(&log);
    let node = Subscriber::node("n", Behavior::Ok, &log);

    input.register_listener(&node, Categories::KEY | Categories::MOUSE);
    input.unregister_listener(&node, Categories::KEY);

    input.key_down(Key::Q, Modifiers::empty());
    input.button_down(MouseButton::Right, Modifiers::empty());
    assert_eq!(log.borrow().as_slice(), ["n Right"]);
    assert!(input.listeners().contains(&node, Category::Mouse));
    assert!(!input.listeners().contains(&node, Category::Key));
}

#[test]
fn test_failures_do_not_block_later_listeners() {
    let log = Log::default();
    let (mut input, sink) = router(&log);
    let failing = Subscriber::node("failing", Behavior::Fail, &log);
    let panicking = Subscriber::node("panicking", Behavior::Panic, &log);
    let healthy = Subscriber::node("healthy", Behavior::Ok, &log);

    input.register_listener(&failing, Categories::KEY);
    input.register_listener(&panicking, Categories::KEY);
    input.register_listener(&healthy, Categories::KEY);

    input.on_key_down(Key::Z.code(), 0);

    assert_eq!(
        log.borrow().as_slice(),
        ["failing Z", "panicking Z", "healthy Z"]
    );
    let failures = sink.0.borrow();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].0, EventKind::KeyDown);
    assert_eq!(failures[0].1, DispatchTarget::Node(NodeId::of(&failing)));
    assert_eq!(failures[0].2, "returned: failing rejected Z");
    assert_eq!(failures[1].1, DispatchTarget::Node(NodeId::of(&panicking)));
    assert_eq!(failures[1].2, "panicked: panicking blew up");
    assert_eq!(input.key_held(Key::Z.code()), Ok(true));
}

/// Unregisters itself from keys on its first press; registers `late` too
struct SelfRemoving {
    listeners: Listeners,
    this: Option<NodeRef>,
    late: NodeRef,
    log: Log,
}

impl KeyListener for SelfRemoving {
    fn key_down(&mut self, key: KeyCode, _mods: Modifiers, _input: &InputState) -> ListenerResult {
        self.log.borrow_mut().push(format!("self-removing {key}"));
        if let Some(this) = self.this.take() {
            self.listeners.unregister(&this, Categories::KEY);
            self.listeners.register(&self.late, Categories::KEY);
        }
        Ok(())
    }
}

impl Node for SelfRemoving {
    fn key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        Some(self)
    }
}

#[test]
fn test_registry_changes_during_dispatch_apply_to_next_event() {
    let log = Log::default();
    let (mut input, _) = router(&log);
    let late = Subscriber::node("late", Behavior::Ok, &log);
    let after = Subscriber::node("after", Behavior::Ok, &log);

    let remover = Rc::new(RefCell::new(SelfRemoving {
        listeners: input.listeners().clone(),
        this: None,
        late: late.clone(),
        log: log.clone(),
    }));
    let remover_node: NodeRef = remover.clone();
    remover.borrow_mut().this = Some(remover_node.clone());

    input.register_listener(&remover_node, Categories::KEY);
    input.register_listener(&after, Categories::KEY);

    input.key_down(Key::A, Modifiers::empty());
    assert_eq!(log.borrow().as_slice(), ["self-removing A", "after A"]);

    log.borrow_mut().clear();
    input.key_down(Key::B, Modifiers::empty());
    assert_eq!(log.borrow().as_slice(), ["after B", "late B"]);
}

#[test]
fn test_dropped_nodes_are_skipped_and_pruned() {
    let log = Log::default();
    let (mut input, sink) = router(&log);
    let kept = Subscriber::node("kept", Behavior::Ok, &log);
    let dropped = Subscriber::node("dropped", Behavior::Ok, &log);

    input.register_listener(&dropped, Categories::KEY);
    input.register_listener(&kept, Categories::KEY);
    drop(dropped);

    input.key_down(Key::X, Modifiers::empty());
    assert_eq!(log.borrow().as_slice(), ["kept X"]);
    assert_eq!(input.listeners().len(Category::Key), 1);
    assert!(sink.0.borrow().is_empty());
}

#[test]
fn test_untracked_codes_reach_every_listener_without_touching_state() {
    let log = Log::default();
    let (mut input, sink) = keyboard_router(false, &log);
    let node = Subscriber::node("n", Behavior::Ok, &log);
    input.register_listener(&node, Categories::KEY | Categories::MOUSE);

    input.dispatch(RawEvent::KeyDown {
        code: KEY_UNKNOWN,
        mods: 0,
    });
    input.dispatch(RawEvent::KeyDown { code: 33, mods: 0 });
    input.dispatch(RawEvent::ButtonDown { code: 8, mods: 0 });

    assert_eq!(
        log.borrow().as_slice(),
        [
            "primary key#-1 held=false",
            "n key#-1",
            "primary key#33 held=false",
            "n key#33",
            "primary button#8",
            "n button#8",
        ]
    );
    assert_eq!(input.button_bitmask(), 0);
    assert_eq!(input.key_held(33), Ok(false));
    assert!(input.state().held_keys().next().is_none());
    assert!(input.state().is_consistent());
    assert!(sink.0.borrow().is_empty());
}

#[test]
fn test_failing_primary_does_not_stop_fan_out() {
    let log = Log::default();
    let (mut input, sink) = keyboard_router(true, &log);
    let node = Subscriber::node("sub", Behavior::Ok, &log);
    input.register_listener(&node, Categories::KEY);

    input.on_key_down(Key::A.code(), 0);

    assert_eq!(log.borrow().as_slice(), ["primary A held=true", "sub A"]);
    let failures = sink.0.borrow();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].1, DispatchTarget::Primary);
    assert_eq!(failures[0].2, "returned: primary rejected A");
    assert_eq!(input.key_held(Key::A.code()), Ok(true));
}

#[test]
fn test_double_mouse_registration_delivers_once() {
    let log = Log::default();
    let (mut input, _) = router(&log);
    let node = Subscriber::node("n", Behavior::Ok, &log);

    input.register_listener(&node, Categories::MOUSE);
    input.register_listener(&node, Categories::MOUSE);
    input.on_button_down(0, 0);

    assert_eq!(log.borrow().as_slice(), ["n Left"]);
}

#[test]
fn test_borrowed_node_is_reported_busy_and_skipped() {
    let log = Log::default();
    let (mut input, sink) = router(&log);
    let busy = Subscriber::node("busy", Behavior::Ok, &log);
    let free = Subscriber::node("free", Behavior::Ok, &log);
    input.register_listener(&busy, Categories::KEY);
    input.register_listener(&free, Categories::KEY);

    {
        let _held = busy.borrow_mut();
        input.key_down(Key::B, Modifiers::empty());
    }

    assert_eq!(log.borrow().as_slice(), ["free B"]);
    let failures = sink.0.borrow();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, EventKind::KeyDown);
    assert_eq!(failures[0].1, DispatchTarget::Node(NodeId::of(&busy)));
    assert_eq!(failures[0].2, "busy");
}

#[test]
fn test_window_close_reaches_primary() {
    let log = Log::default();
    let (mut input, _) = router(&log);
    input.dispatch(RawEvent::WindowClose);
    assert_eq!(log.borrow().as_slice(), ["closed"]);
}
