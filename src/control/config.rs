//! Value-domain configuration for analog controls.

use crate::error::{PartsError, Result};

/// Default lower bound.
pub const DEFAULT_MIN: f64 = 0.0;

/// Default upper bound.
pub const DEFAULT_MAX: f64 = 100.0;

/// Default keyboard increment.
pub const DEFAULT_STEP: f64 = 2.0;

/// Configuration for an analog control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    /// Lower bound of the value domain.
    pub min: f64,
    /// Upper bound of the value domain.
    pub max: f64,
    /// Increment for discrete (keyboard) adjustments.
    ///
    /// Pointer drags are not snapped to this grid.
    pub step: f64,
    /// Value the control starts with, clamped on construction.
    pub initial: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            initial: DEFAULT_MIN,
        }
    }
}

impl ControlConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value range.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the keyboard increment.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the starting value.
    pub fn with_initial(mut self, initial: f64) -> Self {
        self.initial = initial;
        self
    }

    /// Width of the value range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp `value` into `[min, max]`.
    ///
    /// Never panics. On an inverted range the result is one of the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Check the configuration for authoring mistakes.
    ///
    /// Controls run with whatever configuration they are given; this is for
    /// callers that want to reject bad input up front.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            return Err(PartsError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(PartsError::InvalidStep { step: self.step });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControlConfig::new();
        assert_eq!(config.min, 0.0);
        assert_eq!(config.max, 100.0);
        assert_eq!(config.step, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp() {
        let config = ControlConfig::new();
        assert_eq!(config.clamp(-5.0), 0.0);
        assert_eq!(config.clamp(150.0), 100.0);
        assert_eq!(config.clamp(42.0), 42.0);
        assert_eq!(config.clamp(f64::INFINITY), 100.0);
    }

    #[test]
    fn test_inverted_range_does_not_panic() {
        let config = ControlConfig::new().with_range(10.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(PartsError::InvalidRange { .. })
        ));
        assert_eq!(config.clamp(5.0), 10.0);
    }

    #[test]
    fn test_invalid_step() {
        let config = ControlConfig::new().with_step(0.0);
        assert!(matches!(
            config.validate(),
            Err(PartsError::InvalidStep { .. })
        ));
    }
}
