//! Pin table validation.

use std::collections::HashSet;

use crate::error::{PartsError, Result};

use super::ElementPin;

/// Validate a part's pin table.
///
/// Checks:
/// - Pin numbers are 1-based and unique
/// - Pin names are unique
/// - Every pin carries at least one signal
/// - Pin positions are finite
pub fn validate_pins(pins: &[ElementPin]) -> Result<()> {
    let mut numbers = HashSet::new();
    let mut names = HashSet::new();

    for pin in pins {
        if pin.number == 0 {
            return Err(PartsError::ZeroPinNumber {
                name: pin.name.clone(),
            });
        }

        if !numbers.insert(pin.number) {
            return Err(PartsError::DuplicatePinNumber {
                number: pin.number,
                name: pin.name.clone(),
            });
        }

        if !names.insert(pin.name.as_str()) {
            return Err(PartsError::DuplicatePinName {
                name: pin.name.clone(),
            });
        }

        if pin.signals.is_empty() {
            return Err(PartsError::EmptySignals {
                name: pin.name.clone(),
            });
        }

        if !pin.x.is_finite() || !pin.y.is_finite() {
            return Err(PartsError::InvalidPinPosition {
                name: pin.name.clone(),
                x: pin.x,
                y: pin.y,
            });
        }
    }

    Ok(())
}
