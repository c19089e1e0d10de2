//! Listener fan-out health check

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::bail;

use crate::app::input::{
    Categories, Category, DiagnosticSink, InputContext, InputState, Key, KeyCode, KeyListener,
    ListenerFailure, ListenerResult, Modifiers, MouseListener, Node, WindowListener, node_ref,
};
use crate::health::check::{CheckResult, Findings, SystemCheck};

type Trace = Rc<RefCell<Vec<&'static str>>>;

struct Idle;

impl KeyListener for Idle {}
impl MouseListener for Idle {}
impl WindowListener for Idle {}

struct Probe {
    name: &'static str,
    fails: bool,
    trace: Trace,
}

impl KeyListener for Probe {
    fn key_down(&mut self, _key: KeyCode, _mods: Modifiers, _input: &InputState) -> ListenerResult {
        self.trace.borrow_mut().push(self.name);
        if self.fails {
            bail!("{} refuses key presses", self.name);
        }
        Ok(())
    }
}

impl Node for Probe {
    fn key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        Some(self)
    }
}

#[derive(Clone, Default)]
struct CountingSink(Rc<RefCell<usize>>);

impl DiagnosticSink for CountingSink {
    fn listener_failed(&self, _failure: &ListenerFailure) {
        *self.0.borrow_mut() += 1;
    }
}

/// Verifies delivery order, idempotent registration and failure isolation
#[derive(Default)]
pub struct FanOutCheck;

impl FanOutCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for FanOutCheck {
    fn name(&self) -> &'static str {
        "Listener Fan-out"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Delivers key presses to subscriber nodes and checks ordering and isolation")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();
        let trace = Trace::default();
        let sink = CountingSink::default();
        let mut input = InputContext::new(Idle).with_sink(sink.clone());

        let probe = |name, fails| {
            node_ref(Probe {
                name,
                fails,
                trace: trace.clone(),
            })
        };
        let first = probe("first", false);
        let faulty = probe("faulty", true);
        let last = probe("last", false);

        input.register_listener(&first, Categories::KEY);
        input.register_listener(&faulty, Categories::KEY);
        let repeat = input.register_listener(&first, Categories::KEY | Categories::MOUSE);
        input.register_listener(&last, Categories::KEY);

        findings.require(
            repeat == Categories::MOUSE,
            "Repeated registration only adds new categories",
        );

        input.key_down(Key::Enter, Modifiers::empty());
        let order = trace.borrow().clone();
        findings.require(
            order == ["first", "faulty", "last"],
            format!("Delivery order {order:?}"),
        );

        let failures = *sink.0.borrow();
        findings.require(failures == 1, format!("{failures} failure reported to the sink"));

        drop(last);
        trace.borrow_mut().clear();
        input.key_down(Key::Enter, Modifiers::empty());
        let delivered = trace.borrow().clone();
        findings.require(
            delivered == ["first", "faulty"] && input.listeners().len(Category::Key) == 2,
            "Dropped nodes are skipped and pruned",
        );

        findings.finish(
            "Ordered, idempotent, isolated",
            "Fan-out completed with warnings",
            "Fan-out misbehaved",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::check::CheckStatus;

    #[test]
    fn test_fan_out_check_passes() {
        let result = FanOutCheck::new().check();
        assert_eq!(result.status, CheckStatus::Pass, "{:#?}", result.details);
    }
}
