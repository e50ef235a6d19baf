//! Shared ownership of a control.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use log::warn;

use crate::viewport::{ViewportEvent, ViewportListener};

use super::notify::Notifier;
use super::{AnalogControl, SubscriptionId};

/// Shared handle to an [`AnalogControl`].
///
/// Clones refer to the same control. Mutation goes through [`Self::update`],
/// which releases the control before change notifications run, so observers
/// may read the control (or the part that owns it) freely.
#[derive(Clone)]
pub struct ControlHandle {
    control: Rc<RefCell<AnalogControl>>,
    notifier: Rc<Notifier>,
}

impl ControlHandle {
    /// Share `control`.
    pub fn new(control: AnalogControl) -> Self {
        let notifier = control.notifier();
        Self {
            control: Rc::new(RefCell::new(control)),
            notifier,
        }
    }

    /// Read access to the control.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a closure passed to [`Self::update`].
    pub fn borrow(&self) -> Ref<'_, AnalogControl> {
        self.control.borrow()
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.control.borrow().value()
    }

    /// Mutate the control, then deliver the notifications it raised.
    ///
    /// # Panics
    ///
    /// Panics if the control is already borrowed, e.g. when `update` is
    /// nested inside another `update` on the same control.
    pub fn update<R>(&self, f: impl FnOnce(&mut AnalogControl) -> R) -> R {
        self.notifier.hold();
        let result = f(&mut self.control.borrow_mut());
        self.notifier.release();
        result
    }

    /// Like [`Self::update`], but returns `None` instead of panicking when
    /// the control is busy.
    pub fn try_update<R>(&self, f: impl FnOnce(&mut AnalogControl) -> R) -> Option<R> {
        self.notifier.hold();
        let result = self.control.try_borrow_mut().ok().map(|mut c| f(&mut c));
        self.notifier.release();
        result
    }

    /// Register a change observer.
    pub fn subscribe(&self, observer: impl FnMut(f64) + 'static) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    /// Remove a change observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Whether both handles refer to the same control.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.control, &other.control)
    }
}

impl ViewportListener for ControlHandle {
    fn on_viewport_event(&self, event: &ViewportEvent) {
        let handled = self.try_update(|control| match *event {
            ViewportEvent::PointerMove(p) => control.update_from_pointer(p.x, p.y),
            ViewportEvent::PointerUp | ViewportEvent::PointerLeave => control.end_interaction(),
        });
        if handled.is_none() {
            warn!("control busy; viewport event {:?} dropped", event);
        }
    }
}

impl fmt::Debug for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control.try_borrow() {
            Ok(control) => f.debug_tuple("ControlHandle").field(&*control).finish(),
            Err(_) => f.write_str("ControlHandle(<busy>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::control::{Axis, Calibration, ControlConfig, ElementEvent, SharedLayout};
    use crate::geometry::Point;
    use crate::viewport::Viewport;
    use approx::assert_relative_eq;

    fn handle() -> ControlHandle {
        let calibration = Calibration::Linear {
            axis: Axis::X,
            origin_offset: 0.0,
            travel: 30.0,
        };
        ControlHandle::new(AnalogControl::new(
            ControlConfig::new(),
            calibration,
            SharedLayout::identity(),
        ))
    }

    #[test]
    fn test_observer_reads_value_during_drag() {
        let control = handle();
        let viewport = Viewport::new();
        let _guard = viewport.attach(Rc::new(control.clone()));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let (reader, sink) = (control.clone(), Rc::clone(&seen));
        control.subscribe(move |v| {
            let current = reader.borrow().value();
            assert_eq!(current, v);
            sink.borrow_mut().push((v, reader.borrow().is_pressed()));
        });

        control.update(|c| c.handle_element_event(&ElementEvent::MouseDown));
        viewport.dispatch(&ViewportEvent::PointerMove(Point::new(15.0, 0.0)));
        viewport.dispatch(&ViewportEvent::PointerUp);

        assert_eq!(*seen.borrow(), vec![(50.0, true)]);
        assert_relative_eq!(control.value(), 50.0);
    }

    #[test]
    fn test_observer_can_update_control() {
        let control = handle();
        let (writer, calls) = (control.clone(), Rc::new(Cell::new(0)));
        let counter = Rc::clone(&calls);
        control.subscribe(move |v| {
            counter.set(counter.get() + 1);
            if v > 80.0 {
                writer.update(|c| c.set_value(80.0));
            }
        });

        control.update(|c| c.set_value(95.0));
        assert_eq!(control.value(), 80.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_try_update_while_borrowed() {
        let control = handle();
        let reading = control.borrow();
        assert!(control.try_update(|c| c.set_value(10.0)).is_none());
        drop(reading);
        assert_eq!(control.try_update(|c| c.set_value(10.0)), Some(()));
        assert_eq!(control.value(), 10.0);
    }
}
