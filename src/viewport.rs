//! Window-scoped event listeners.
//!
//! A drag can leave the control's own bounds before the button is released,
//! so controls listen for moves and releases on the whole viewport while they
//! are mounted. Attaching returns a [`ListenerGuard`]; dropping the guard
//! detaches the listener, so every removal path (explicit unmount, part drop,
//! unwinding) releases it exactly once.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::geometry::Point;

/// An event delivered at viewport scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// Mouse moved, in page coordinates
    PointerMove(Point),
    /// Mouse button released anywhere
    PointerUp,
    /// Pointer left the window
    PointerLeave,
}

/// Receiver of viewport-scoped events.
///
/// Listeners are shared with the viewport and keep any mutable state
/// behind their own interior mutability.
pub trait ViewportListener {
    fn on_viewport_event(&self, event: &ViewportEvent);
}

/// Identifier of an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

type SharedListener = Rc<dyn ViewportListener>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, SharedListener>,
}

/// The window-level event surface.
///
/// Clones share the same registry.
#[derive(Clone, Default)]
pub struct Viewport {
    registry: Rc<RefCell<Registry>>,
}

impl Viewport {
    /// Create an empty viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener until the returned guard is dropped.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn attach(&self, listener: SharedListener) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.insert(id, listener);
        debug!("attached viewport listener {:?}", id);
        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Deliver an event to every attached listener, in attach order.
    ///
    /// Listeners detached during dispatch stop receiving the event.
    pub fn dispatch(&self, event: &ViewportEvent) {
        let snapshot: Vec<(ListenerId, SharedListener)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        for (id, listener) in snapshot {
            if !self.registry.borrow().listeners.contains_key(&id) {
                continue;
            }
            listener.on_viewport_event(event);
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener attached; detaches it on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    id: ListenerId,
}

impl ListenerGuard {
    /// Identifier of the guarded listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.listeners.remove(&self.id);
                debug!("detached viewport listener {:?}", self.id);
            } else {
                warn!("viewport busy while detaching listener {:?}", self.id);
            }
        }
    }
}
