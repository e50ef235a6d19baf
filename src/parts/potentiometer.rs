//! Rotary potentiometer with a draggable knob.

use crate::control::{AnalogControl, Calibration, ControlConfig, LayoutSource};
use crate::geometry::Point;
use crate::pin::{analog, ground, power, ElementPin, PinTable};
use crate::viewport::Viewport;

use super::{ControlHandle, Mount, Part, PartKind};

/// Knob angle (screen degrees, clockwise from +x) at `min`: 7:30 o'clock.
pub const KNOB_START_ANGLE: f64 = 135.0;

/// Knob rotation from `min` to `max`, in degrees.
pub const KNOB_SWEEP: f64 = 270.0;

/// Rotary potentiometer. The anchor element is the knob body, a 20 mm
/// square with the shaft at its centre.
#[derive(Debug)]
pub struct Potentiometer {
    pins: PinTable,
    mount: Mount,
}

impl Potentiometer {
    pub const CALIBRATION: Calibration = Calibration::Angular {
        center: Point::new(10.0, 10.0),
        start_angle: KNOB_START_ANGLE,
        sweep: KNOB_SWEEP,
    };

    pub fn new(config: ControlConfig, layout: impl LayoutSource + 'static) -> Self {
        Self {
            pins: PinTable::new(vec![
                ElementPin::new("GND", 29.0, 68.5, 1, vec![ground()]),
                ElementPin::new("SIG", 37.0, 68.5, 2, vec![analog(0)]),
                ElementPin::new("VCC", 44.75, 68.5, 3, vec![power()]),
            ]),
            mount: Mount::new(AnalogControl::new(config, Self::CALIBRATION, layout)),
        }
    }

    /// Knob rotation for rendering, in degrees relative to straight up.
    pub fn knob_rotation(&self) -> f64 {
        let control = self.mount.control().borrow();
        let config = control.config();
        let span = config.span();
        let fraction = if span > 0.0 {
            (control.value() - config.min) / span
        } else {
            0.0
        };
        fraction * KNOB_SWEEP - KNOB_SWEEP / 2.0
    }
}

impl Part for Potentiometer {
    fn kind(&self) -> PartKind {
        PartKind::Potentiometer
    }

    fn pin_info(&self) -> &PinTable {
        &self.pins
    }

    fn value(&self) -> f64 {
        self.mount.value()
    }

    fn control(&self) -> Option<ControlHandle> {
        Some(self.mount.control().clone())
    }

    fn connect(&mut self, viewport: &Viewport) {
        self.mount.connect(viewport);
    }

    fn disconnect(&mut self) {
        self.mount.disconnect();
    }

    fn is_connected(&self) -> bool {
        self.mount.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ElementEvent, SharedLayout};
    use crate::viewport::ViewportEvent;
    use approx::assert_relative_eq;

    #[test]
    fn test_knob_drag() {
        let layout = SharedLayout::new();
        // knob drawn at page (200, 100), 2 px per mm
        layout.set_ctm(Some([2.0, 0.0, 0.0, 2.0, 200.0, 100.0]));
        let mut pot = Potentiometer::new(ControlConfig::new().with_range(0.0, 1023.0), layout);
        let viewport = Viewport::new();
        pot.connect(&viewport);

        let control = pot.control().unwrap();
        control.update(|c| c.handle_element_event(&ElementEvent::MouseDown));

        // centre is page (220, 120); straight up is half way
        viewport.dispatch(&ViewportEvent::PointerMove(Point::new(220.0, 60.0)));
        assert_relative_eq!(pot.value(), 512.0);
        assert_relative_eq!(pot.knob_rotation(), 0.0, epsilon = 0.5);

        // down-right past the end stop
        viewport.dispatch(&ViewportEvent::PointerMove(Point::new(225.0, 160.0)));
        assert_relative_eq!(pot.value(), 1023.0);
        assert_relative_eq!(pot.knob_rotation(), 135.0);

        viewport.dispatch(&ViewportEvent::PointerLeave);
        assert!(!control.borrow().is_pressed());
    }

    #[test]
    fn test_pins() {
        let pot = Potentiometer::new(ControlConfig::new(), SharedLayout::new());
        assert_eq!(pot.pin_info().by_number(2).unwrap().name, "SIG");
        assert!(pot.pin_info().by_name("VCC").unwrap().carries("power"));
        assert!(pot.pin_info().by_name("GND").unwrap().carries("ground"));
    }
}
