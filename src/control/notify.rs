//! Change notification delivery.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::mem;

use log::trace;

/// Handle returned by [`AnalogControl::subscribe`](super::AnalogControl::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

type Observer = Box<dyn FnMut(f64)>;

/// Observer list plus a queue of values waiting to be delivered.
///
/// While held, posted values are queued; they are delivered when the last
/// hold is released. Observers may subscribe, unsubscribe or post new
/// values while being called; nested posts are appended to the queue and
/// delivered in order by the outermost delivery loop.
#[derive(Default)]
pub(crate) struct Notifier {
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    active: RefCell<BTreeSet<SubscriptionId>>,
    queue: RefCell<VecDeque<f64>>,
    next_id: Cell<u64>,
    holds: Cell<u32>,
    delivering: Cell<bool>,
}

impl Notifier {
    pub(crate) fn subscribe(&self, observer: impl FnMut(f64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.active.borrow_mut().insert(id);
        self.observers.borrow_mut().push((id, Box::new(observer)));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if !self.active.borrow_mut().remove(&id) {
            return false;
        }
        // during delivery the list is checked out; it is pruned on return
        self.observers.borrow_mut().retain(|(sid, _)| *sid != id);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.active.borrow().len()
    }

    pub(crate) fn post(&self, value: f64) {
        self.queue.borrow_mut().push_back(value);
        if self.holds.get() == 0 {
            self.flush();
        }
    }

    pub(crate) fn hold(&self) {
        self.holds.set(self.holds.get() + 1);
    }

    pub(crate) fn release(&self) {
        let holds = self.holds.get().saturating_sub(1);
        self.holds.set(holds);
        if holds == 0 {
            self.flush();
        }
    }

    fn flush(&self) {
        if self.delivering.replace(true) {
            return;
        }
        loop {
            let Some(value) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            let mut observers = mem::take(&mut *self.observers.borrow_mut());
            trace!("delivering {} to {} observers", value, observers.len());
            for (id, observer) in observers.iter_mut() {
                if self.active.borrow().contains(id) {
                    observer(value);
                }
            }
            let mut slot = self.observers.borrow_mut();
            let added = mem::replace(&mut *slot, observers);
            slot.extend(added);
            let active = self.active.borrow();
            slot.retain(|(id, _)| active.contains(id));
        }
        self.delivering.set(false);
    }
}
