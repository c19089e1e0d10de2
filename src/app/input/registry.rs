//! Subscriber registry
//!
//! Nodes are kept per category in registration order. The registry never owns
//! a node: it stores weak handles, and a node dropped by its owner is skipped
//! at dispatch and pruned.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::debug;

use super::events::{Categories, Category};
use super::listener::Node;

/// Shared handle to a subscriber node
pub type NodeRef = Rc<RefCell<dyn Node>>;

type Slot = Weak<RefCell<dyn Node>>;

/// Wraps a node into a handle that can be registered
pub fn node_ref<N: Node + 'static>(node: N) -> NodeRef {
    Rc::new(RefCell::new(node))
}

/// Identity of a registered node, derived from its allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn of(node: &NodeRef) -> Self {
        Self(Rc::as_ptr(node).cast::<()>() as usize)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node@{:#x}", self.0)
    }
}

/// Per-category sets of subscribers, each in first-registration order
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    key: IndexMap<NodeId, Slot>,
    mouse: IndexMap<NodeId, Slot>,
    window: IndexMap<NodeId, Slot>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self, category: Category) -> &IndexMap<NodeId, Slot> {
        match category {
            Category::Key => &self.key,
            Category::Mouse => &self.mouse,
            Category::Window => &self.window,
        }
    }

    fn slots_mut(&mut self, category: Category) -> &mut IndexMap<NodeId, Slot> {
        match category {
            Category::Key => &mut self.key,
            Category::Mouse => &mut self.mouse,
            Category::Window => &mut self.window,
        }
    }

    /// Adds `node` to every category in `categories`
    ///
    /// Registering again in a category it already belongs to keeps its
    /// original position. Returns the categories that were newly joined.
    pub fn register(&mut self, node: &NodeRef, categories: Categories) -> Categories {
        let id = NodeId::of(node);
        let mut added = Categories::empty();

        for category in categories.categories() {
            let slots = self.slots_mut(category);
            if !slots.contains_key(&id) {
                slots.insert(id, Rc::downgrade(node));
                added |= category.flag();
            }
        }

        debug!(node = %id, ?added, "Registered listener");
        added
    }

    /// Removes `node` from every category in `categories`
    ///
    /// Remaining nodes keep their relative order. Returns the categories the
    /// node was actually removed from.
    pub fn unregister(&mut self, node: &NodeRef, categories: Categories) -> Categories {
        let id = NodeId::of(node);
        let mut removed = Categories::empty();

        for category in categories.categories() {
            if self.slots_mut(category).shift_remove(&id).is_some() {
                removed |= category.flag();
            }
        }

        debug!(node = %id, ?removed, "Unregistered listener");
        removed
    }

    /// Returns true if `node` is registered for `category`
    pub fn contains(&self, node: &NodeRef, category: Category) -> bool {
        self.slots(category).contains_key(&NodeId::of(node))
    }

    /// Node identities for `category` in dispatch order
    pub fn iter(&self, category: Category) -> impl Iterator<Item = NodeId> + '_ {
        self.slots(category).keys().copied()
    }

    /// Copies the dispatch list for `category`
    ///
    /// Fan-out iterates this copy, so changes made by callbacks only affect
    /// later signals.
    pub fn snapshot(&self, category: Category) -> Vec<(NodeId, Slot)> {
        self.slots(category)
            .iter()
            .map(|(id, slot)| (*id, slot.clone()))
            .collect()
    }

    pub fn len(&self, category: Category) -> usize {
        self.slots(category).len()
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL
            .iter()
            .all(|&category| self.slots(category).is_empty())
    }

    /// Drops entries whose node no longer exists; returns how many were removed
    pub fn prune(&mut self) -> usize {
        let mut pruned = 0;
        for category in Category::ALL {
            let slots = self.slots_mut(category);
            let before = slots.len();
            slots.retain(|_, slot| slot.strong_count() > 0);
            pruned += before - slots.len();
        }
        if pruned > 0 {
            debug!(pruned, "Pruned dropped listeners");
        }
        pruned
    }
}

/// Cloneable handle to a registry shared by an input context and its users
///
/// Nodes may hold a clone and register or unregister from inside their own
/// callbacks; the registry is never borrowed while a callback runs.
#[derive(Debug, Clone, Default)]
pub struct Listeners(Rc<RefCell<ListenerRegistry>>);

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, node: &NodeRef, categories: Categories) -> Categories {
        self.0.borrow_mut().register(node, categories)
    }

    pub fn unregister(&self, node: &NodeRef, categories: Categories) -> Categories {
        self.0.borrow_mut().unregister(node, categories)
    }

    pub fn contains(&self, node: &NodeRef, category: Category) -> bool {
        self.0.borrow().contains(node, category)
    }

    pub fn ids(&self, category: Category) -> Vec<NodeId> {
        self.0.borrow().iter(category).collect()
    }

    pub fn snapshot(&self, category: Category) -> Vec<(NodeId, Slot)> {
        self.0.borrow().snapshot(category)
    }

    pub fn len(&self, category: Category) -> usize {
        self.0.borrow().len(category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn prune(&self) -> usize {
        self.0.borrow_mut().prune()
    }
}
