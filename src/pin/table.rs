//! Read-only ordered pin collection.

use super::ElementPin;

/// The pins of one part, in authoring order.
///
/// The table is built once per part instance and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PinTable {
    pins: Vec<ElementPin>,
}

impl PinTable {
    /// Wrap an ordered pin list.
    pub fn new(pins: Vec<ElementPin>) -> Self {
        Self { pins }
    }

    /// Find a pin by its physical number.
    pub fn by_number(&self, number: u32) -> Option<&ElementPin> {
        self.pins.iter().find(|p| p.number == number)
    }

    /// Find a pin by its label.
    pub fn by_name(&self, name: &str) -> Option<&ElementPin> {
        self.pins.iter().find(|p| p.name == name)
    }

    /// Iterate pins in authoring order.
    pub fn iter(&self) -> std::slice::Iter<'_, ElementPin> {
        self.pins.iter()
    }

    /// Number of pins.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Whether the table has no pins.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Borrow the pins as a slice.
    pub fn as_slice(&self) -> &[ElementPin] {
        &self.pins
    }
}

impl<'a> IntoIterator for &'a PinTable {
    type Item = &'a ElementPin;
    type IntoIter = std::slice::Iter<'a, ElementPin>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::{analog, ground, power};

    fn table() -> PinTable {
        PinTable::new(vec![
            ElementPin::new("VCC", 1.0, 43.0, 1, vec![power()]),
            ElementPin::new("SIG", 1.0, 66.5, 2, vec![analog(0)]),
            ElementPin::new("GND", 207.0, 43.0, 3, vec![ground()]),
        ])
    }

    #[test]
    fn test_lookup_by_number_and_name() {
        let pins = table();
        assert_eq!(pins.by_number(2).map(|p| p.name.as_str()), Some("SIG"));
        assert_eq!(pins.by_name("GND").map(|p| p.number), Some(3));
        assert!(pins.by_number(4).is_none());
        assert!(pins.by_name("sig").is_none());
    }

    #[test]
    fn test_order_is_preserved() {
        let names: Vec<_> = table().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["VCC", "SIG", "GND"]);
    }
}
