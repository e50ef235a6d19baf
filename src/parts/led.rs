//! Light-emitting diode. Not interactive; the simulator drives it.

use crate::pin::{ground, ElementPin, PinSignalInfo, PinTable};

use super::{Part, PartKind};

/// A single LED.
#[derive(Debug, Clone)]
pub struct Led {
    pins: PinTable,
    lit: bool,
    brightness: f64,
}

impl Led {
    pub fn new() -> Self {
        Self {
            pins: PinTable::new(vec![
                ElementPin::new("A", 25.0, 42.0, 1, vec![PinSignalInfo::Digital]),
                ElementPin::new("C", 15.0, 42.0, 2, vec![ground()]),
            ]),
            lit: false,
            brightness: 1.0,
        }
    }

    /// Switch the LED on or off.
    pub fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
    }

    /// Whether the LED is on.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Set the brightness used while lit, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_brightness(&mut self, brightness: f64) {
        if !brightness.is_nan() {
            self.brightness = brightness.clamp(0.0, 1.0);
        }
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }
}

impl Default for Led {
    fn default() -> Self {
        Self::new()
    }
}

impl Part for Led {
    fn kind(&self) -> PartKind {
        PartKind::Led
    }

    fn pin_info(&self) -> &PinTable {
        &self.pins
    }

    fn value(&self) -> f64 {
        if self.lit {
            self.brightness
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Viewport;

    #[test]
    fn test_externally_driven_value() {
        let mut led = Led::new();
        assert_eq!(led.value(), 0.0);
        led.set_lit(true);
        assert_eq!(led.value(), 1.0);
        led.set_brightness(3.0);
        assert_eq!(led.brightness(), 1.0);
        led.set_brightness(0.25);
        assert_eq!(led.value(), 0.25);
    }

    #[test]
    fn test_connect_attaches_nothing() {
        let mut led = Led::new();
        let viewport = Viewport::new();
        led.connect(&viewport);
        assert_eq!(viewport.listener_count(), 0);
        assert!(led.control().is_none());
    }
}
