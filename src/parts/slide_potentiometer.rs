//! Slide potentiometer: a linear fader with a draggable tip.

use crate::control::{AnalogControl, Axis, Calibration, ControlConfig, LayoutSource};
use crate::pin::{analog, ground, power, ElementPin, PinTable};
use crate::viewport::Viewport;

use super::{ControlHandle, Mount, Part, PartKind};

/// Tip travel between `min` and `max`, in mm.
pub const TIP_TRAVEL_MM: f64 = 30.0;

/// Distance from the case's left edge to the `min` end of the travel, in mm.
pub const CASE_BORDER_MM: f64 = 7.5;

/// Linear fader. The anchor element is the slider case.
#[derive(Debug)]
pub struct SlidePotentiometer {
    pins: PinTable,
    mount: Mount,
}

impl SlidePotentiometer {
    /// Calibration along the case's x axis.
    pub const CALIBRATION: Calibration = Calibration::Linear {
        axis: Axis::X,
        origin_offset: CASE_BORDER_MM,
        travel: TIP_TRAVEL_MM,
    };

    /// Create a slide potentiometer reading the case geometry from `layout`.
    pub fn new(config: ControlConfig, layout: impl LayoutSource + 'static) -> Self {
        Self {
            pins: PinTable::new(vec![
                ElementPin::new("VCC", 1.0, 43.0, 1, vec![power()]),
                ElementPin::new("SIG", 1.0, 66.5, 2, vec![analog(0)]),
                ElementPin::new("GND", 207.0, 43.0, 3, vec![ground()]),
            ]),
            mount: Mount::new(AnalogControl::new(config, Self::CALIBRATION, layout)),
        }
    }

    /// Horizontal tip offset from the centre of travel, in mm, for rendering.
    pub fn tip_offset(&self) -> f64 {
        let control = self.mount.control().borrow();
        let config = control.config();
        let span = config.span();
        if !(span > 0.0) {
            return -TIP_TRAVEL_MM / 2.0;
        }
        (control.value() - config.min) / span * TIP_TRAVEL_MM - TIP_TRAVEL_MM / 2.0
    }
}

impl Part for SlidePotentiometer {
    fn kind(&self) -> PartKind {
        PartKind::SlidePotentiometer
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
