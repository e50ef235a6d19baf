//! The interactive analog control state machine.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::geometry::{sanitize_zoom, PageTransform, Point};

use super::notify::{Notifier, SubscriptionId};
use super::{Calibration, ControlConfig, ElementEvent, Key, LayoutSource, RangeProxy};

/// Interaction state. `Idle` is initial; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Pressed,
}

/// A continuously adjustable control (slider tip, knob, stick axis).
///
/// Turns pointer, touch and keyboard input into a value clamped to
/// `[min, max]`, and notifies subscribers once per accepted change.
///
/// An owned control notifies observers synchronously from inside the
/// mutating call. Share it through a [`ControlHandle`](super::ControlHandle)
/// to have notifications delivered after the control is released.
pub struct AnalogControl {
    config: ControlConfig,
    calibration: Calibration,
    layout: Box<dyn LayoutSource>,
    value: f64,
    state: InteractionState,
    /// Page-to-local mapping captured at the start of the current press
    transform: Option<PageTransform>,
    /// Display zoom captured at the start of the current press
    zoom: f64,
    notifier: Rc<Notifier>,
}

impl AnalogControl {
    /// Create a control reading its geometry from `layout`.
    pub fn new(
        config: ControlConfig,
        calibration: Calibration,
        layout: impl LayoutSource + 'static,
    ) -> Self {
        Self {
            value: config.clamp(config.initial),
            config,
            calibration,
            layout: Box::new(layout),
            state: InteractionState::Idle,
            transform: None,
            zoom: 1.0,
            notifier: Rc::default(),
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current configuration.
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Calibration this control was built with.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.state == InteractionState::Pressed
    }

    /// Attributes for the native range-input proxy.
    pub fn proxy(&self) -> RangeProxy {
        RangeProxy::mirror(&self.config, self.value)
    }

    /// Register a change observer.
    pub fn subscribe(&mut self, observer: impl FnMut(f64) + 'static) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    /// Remove a change observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub(crate) fn notifier(&self) -> Rc<Notifier> {
        Rc::clone(&self.notifier)
    }

    /// Clamp `value` into range and store it.
    ///
    /// Observers are notified only if the stored value changed. NaN is
    /// ignored.
    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        let clamped = self.config.clamp(value);
        if clamped == self.value {
            return;
        }
        self.value = clamped;
        debug!("value changed to {}", clamped);
        self.notifier.post(clamped);
    }

    /// Start a press: capture the anchor transform and zoom.
    ///
    /// Geometry is only re-read when leaving `Idle`. Unavailable geometry is
    /// stored as an absent transform, which turns pointer updates into
    /// no-ops until the next press.
    pub fn begin_interaction(&mut self) {
        if self.state == InteractionState::Idle {
            self.transform = self
                .layout
                .anchor_screen_ctm()
                .and_then(PageTransform::from_screen_ctm);
            self.zoom = sanitize_zoom(self.layout.display_zoom());
            if self.transform.is_none() {
                warn!("anchor geometry unavailable; pointer updates disabled for this press");
            }
            debug!("interaction started (zoom {})", self.zoom);
        }
        self.state = InteractionState::Pressed;
    }

    /// Feed a pointer position in page coordinates.
    pub fn update_from_pointer(&mut self, page_x: f64, page_y: f64) {
        if self.state != InteractionState::Pressed {
            return;
        }
        let Some(transform) = self.transform else {
            return;
        };
        let local = transform.to_local(Point::new(page_x, page_y), self.zoom);
        let reading = self.calibration.value_at(local, &self.config);
        trace!(
            "pointer ({}, {}) -> local {} -> {:?}",
            page_x,
            page_y,
            local,
            reading
        );
        if let Some(value) = reading {
            self.set_value(value);
        }
    }

    /// End a press. The value is left as is.
    pub fn end_interaction(&mut self) {
        if self.state == InteractionState::Pressed {
            debug!("interaction ended at {}", self.value);
        }
        self.state = InteractionState::Idle;
    }

    /// Set the value from the native proxy, bypassing coordinate conversion.
    pub fn handle_direct_input(&mut self, value: f64) {
        self.set_value(value);
    }

    /// Apply a textual proxy edit. Empty or non-numeric text is ignored.
    pub fn handle_proxy_input(&mut self, text: &str) {
        if let Some(value) = RangeProxy::parse_input(text) {
            self.handle_direct_input(value);
        }
    }

    /// Move by one keyboard increment, honouring `step`.
    pub fn step_by(&mut self, key: Key) {
        if let Some(target) = self.proxy().stepped(key) {
            self.handle_direct_input(target);
        }
    }

    /// Route an event raised on the control's own element.
    pub fn handle_element_event(&mut self, event: &ElementEvent) {
        match event {
            ElementEvent::MouseDown | ElementEvent::TouchStart => self.begin_interaction(),
            ElementEvent::KeyDown(key) => {
                self.begin_interaction();
                self.step_by(*key);
            }
            ElementEvent::TouchMove { touches } => {
                if let Some(first) = touches.first() {
                    self.update_from_pointer(first.x, first.y);
                }
            }
            ElementEvent::TouchEnd | ElementEvent::KeyUp => self.end_interaction(),
        }
    }

    /// Replace the value range, re-clamping the current value.
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.config.min = min;
        self.config.max = max;
        self.set_value(self.value);
    }

    /// Replace the lower bound, re-clamping the current value.
    pub fn set_min(&mut self, min: f64) {
        self.set_range(min, self.config.max);
    }

    /// Replace the upper bound, re-clamping the current value.
    pub fn set_max(&mut self, max: f64) {
        self.set_range(self.config.min, max);
    }

    /// Replace the keyboard increment.
    pub fn set_step(&mut self, step: f64) {
        self.config.step = step;
    }
}

impl fmt::Debug for AnalogControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalogControl")
            .field("config", &self.config)
            .field("calibration", &self.calibration)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("transform", &self.transform)
            .field("zoom", &self.zoom)
            .field("observers", &self.notifier.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::control::{Axis, DetachedLayout, SharedLayout};
    use approx::assert_relative_eq;

    /// 0..100 over 30 mm starting at local x = 0, so x = 15 mm is the midpoint.
    fn calibration() -> Calibration {
        Calibration::Linear {
            axis: Axis::X,
            origin_offset: 0.0,
            travel: 30.0,
        }
    }

    fn control(layout: SharedLayout) -> (AnalogControl, Rc<RefCell<Vec<f64>>>) {
        let mut control = AnalogControl::new(ControlConfig::new(), calibration(), layout);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        control.subscribe(move |v| sink.borrow_mut().push(v));
        (control, log)
    }

    #[test]
    fn test_set_value_clamps() {
        let (mut c, _) = control(SharedLayout::identity());
        c.set_value(-5.0);
        assert_eq!(c.value(), 0.0);
        c.set_value(150.0);
        assert_eq!(c.value(), 100.0);
        c.set_value(37.5);
        assert_eq!(c.value(), 37.5);
    }

    #[test]
    fn test_notifies_only_on_change() {
        let (mut c, log) = control(SharedLayout::identity());
        c.set_value(10.0);
        c.set_value(10.0);
        c.set_value(-1.0);
        c.set_value(-20.0); // clamps to 0 again
        c.set_value(f64::NAN);
        assert_eq!(*log.borrow(), vec![10.0, 0.0]);
    }

    #[test]
    fn test_pointer_midpoint() {
        let (mut c, log) = control(SharedLayout::identity());
        c.begin_interaction();
        c.update_from_pointer(15.0, 0.0);
        assert_relative_eq!(c.value(), 50.0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_pointer_ignored_while_idle() {
        let (mut c, log) = control(SharedLayout::identity());
        c.update_from_pointer(15.0, 0.0);
        assert_eq!(c.value(), 0.0);

        c.begin_interaction();
        c.update_from_pointer(3.0, 0.0);
        c.end_interaction();
        c.update_from_pointer(27.0, 0.0);
        assert_relative_eq!(c.value(), 10.0);
        assert_eq!(*log.borrow(), vec![10.0]);
    }

    #[test]
    fn test_end_interaction_keeps_value() {
        let (mut c, _) = control(SharedLayout::identity());
        c.begin_interaction();
        c.update_from_pointer(6.0, 0.0);
        c.end_interaction();
        assert_eq!(c.state(), InteractionState::Idle);
        assert_relative_eq!(c.value(), 20.0);
    }

    #[test]
    fn test_zoom_and_ctm() {
        let layout = SharedLayout::new();
        // 4 px per mm, anchor at page x = 100; display zoom 2
        layout.set_ctm(Some([4.0, 0.0, 0.0, 4.0, 100.0, 0.0]));
        layout.set_zoom(Some(2.0));
        let (mut c, _) = control(layout);
        c.begin_interaction();
        // 320 / 2 = 160 px -> (160 - 100) / 4 = 15 mm
        c.update_from_pointer(320.0, 0.0);
        assert_relative_eq!(c.value(), 50.0);
    }

    #[test]
    fn test_transform_captured_on_press_only() {
        let layout = SharedLayout::identity();
        let (mut c, _) = control(layout.clone());
        c.begin_interaction();
        // layout moves mid-press; the cached transform still applies
        layout.set_ctm(Some([1.0, 0.0, 0.0, 1.0, 15.0, 0.0]));
        c.begin_interaction();
        c.update_from_pointer(15.0, 0.0);
        assert_relative_eq!(c.value(), 50.0);
        c.end_interaction();

        // next press picks up the new layout
        c.begin_interaction();
        c.update_from_pointer(15.0, 0.0);
        assert_relative_eq!(c.value(), 0.0);
    }

    #[test]
    fn test_unavailable_geometry_is_noop() {
        let layout = SharedLayout::new();
        let (mut c, log) = control(layout.clone());
        c.begin_interaction();
        assert!(c.is_pressed());
        c.update_from_pointer(15.0, 0.0);
        assert_eq!(c.value(), 0.0);
        c.end_interaction();

        layout.set_ctm(Some([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]));
        c.begin_interaction();
        c.update_from_pointer(15.0, 0.0);
        assert_relative_eq!(c.value(), 50.0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_detached_layout() {
        let mut c = AnalogControl::new(ControlConfig::new(), calibration(), DetachedLayout);
        c.begin_interaction();
        c.update_from_pointer(15.0, 0.0);
        assert_eq!(c.value(), 0.0);
    }

    #[test]
    fn test_first_touch_wins() {
        let (mut c, _) = control(SharedLayout::identity());
        c.handle_element_event(&ElementEvent::TouchStart);
        c.handle_element_event(&ElementEvent::TouchMove {
            touches: vec![Point::new(15.0, 0.0), Point::new(27.0, 0.0)],
        });
        assert_relative_eq!(c.value(), 50.0);
        c.handle_element_event(&ElementEvent::TouchMove { touches: vec![] });
        assert_relative_eq!(c.value(), 50.0);
        c.handle_element_event(&ElementEvent::TouchEnd);
        assert!(!c.is_pressed());
    }

    #[test]
    fn test_shrinking_max_reclamps_once() {
        let (mut c, log) = control(SharedLayout::identity());
        c.set_value(80.0);
        log.borrow_mut().clear();
        c.set_max(50.0);
        assert_eq!(c.value(), 50.0);
        assert_eq!(*log.borrow(), vec![50.0]);

        // widening the range leaves the value alone
        c.set_max(100.0);
        assert_eq!(c.value(), 50.0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_direct_and_proxy_input_clamp() {
        let (mut c, _) = control(SharedLayout::identity());
        c.handle_direct_input(250.0);
        assert_eq!(c.value(), 100.0);
        c.handle_proxy_input("12");
        assert_eq!(c.value(), 12.0);
        c.handle_proxy_input("");
        assert_eq!(c.value(), 12.0);
    }

    #[test]
    fn test_keyboard_steps() {
        let (mut c, _) = control(SharedLayout::identity());
        c.set_value(99.0);
        c.handle_element_event(&ElementEvent::KeyDown(Key::ArrowRight));
        assert_eq!(c.value(), 100.0);
        c.handle_element_event(&ElementEvent::KeyUp);
        c.handle_element_event(&ElementEvent::KeyDown(Key::ArrowLeft));
        assert_eq!(c.value(), 98.0);
        c.handle_element_event(&ElementEvent::KeyDown(Key::Home));
        assert_eq!(c.value(), 0.0);
        c.handle_element_event(&ElementEvent::KeyUp);
        assert!(!c.is_pressed());
    }

    #[test]
    fn test_unsubscribe() {
        let (mut c, log) = control(SharedLayout::identity());
        let id = c.subscribe(|_| {});
        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        // the first subscriber is still active
        c.set_value(1.0);
        assert_eq!(log.borrow().len(), 1);
    }
}
